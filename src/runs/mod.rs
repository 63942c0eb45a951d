//! Waiting on runs: status polling with backoff inside a time budget, and a
//! driver that answers function calls until the run settles.

mod driver;
mod poller;


pub use driver::RunDriver;
pub use poller::{poll_until, PollOutcome, Pollable, RunPoller};
