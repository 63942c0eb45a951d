//! Sample provider payloads shared by unit tests.

mod assistant_fixtures;
mod error_fixtures;
mod file_fixtures;
mod stream_fixtures;

pub use assistant_fixtures::*;
pub use error_fixtures::*;
pub use file_fixtures::*;
pub use stream_fixtures::*;
