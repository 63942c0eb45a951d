//! Structured logging setup for binaries embedding the runtime.

mod logging;

pub use logging::{LogFormat, LogLevel, LoggingConfig};
