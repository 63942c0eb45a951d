//! Hand-written test doubles for the transport, auth, resilience and run
//! seams, so services can be exercised without HTTP.

mod mock_auth;
mod mock_resilience;
mod mock_runs;
mod mock_transport;

pub use mock_auth::MockAuthManager;
pub use mock_resilience::MockResilienceOrchestrator;
pub use mock_runs::ScriptedRunService;
pub use mock_transport::{MockHttpTransport, MockRequest};
