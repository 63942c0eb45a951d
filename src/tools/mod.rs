//! Local function calling: resolving a run's required action against
//! caller-registered functions.

mod registry;

pub use registry::{ToolFuture, ToolRegistry};
