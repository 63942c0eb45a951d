//! Assistant run streams: decoding raw events, folding them into visible
//! text, and bridging a producer task to a consumer such as an HTTP response.

mod aggregator;
mod bridge;
mod decoder;
mod events;

pub use aggregator::{AggregatedResult, AggregatorState, StreamAggregator, DEFAULT_PREFIX};
pub use bridge::{spawn_bridge, BridgeConfig, BridgeHandle};
pub use decoder::{decode_stream, EventDecoder};
pub use events::{CodeOutput, StreamEvent, ToolCallDelta};
