use crate::client::PollConfig;
use crate::errors::{OpenAIError, OpenAIResult, RunError};
use crate::services::assistants::{Run, RunService};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout_at, Instant};

/// A remote resource that moves through pending states until it settles.
pub trait Pollable {
    fn id(&self) -> &str;
    fn status_label(&self) -> String;
    fn is_settled(&self) -> bool;
}

impl Pollable for Run {
    fn id(&self) -> &str {
        &self.id
    }

    fn status_label(&self) -> String {
        self.status.to_string()
    }

    fn is_settled(&self) -> bool {
        self.status.is_settled()
    }
}

/// How a poll ended. Running out of budget is not an error by itself: the
/// last snapshot is handed back with its still-pending status.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome<T = Run> {
    Settled(T),
    Exhausted { last: T, elapsed: Duration },
}

impl<T: Pollable> PollOutcome<T> {
    pub fn is_settled(&self) -> bool {
        matches!(self, PollOutcome::Settled(_))
    }

    pub fn resource(&self) -> &T {
        match self {
            PollOutcome::Settled(resource) | PollOutcome::Exhausted { last: resource, .. } => {
                resource
            }
        }
    }

    pub fn into_resource(self) -> T {
        match self {
            PollOutcome::Settled(resource) | PollOutcome::Exhausted { last: resource, .. } => {
                resource
            }
        }
    }

    /// The settled resource, or [`RunError::PollBudgetExhausted`].
    pub fn into_settled(self) -> OpenAIResult<T> {
        match self {
            PollOutcome::Settled(resource) => Ok(resource),
            PollOutcome::Exhausted { last, elapsed } => Err(RunError::PollBudgetExhausted {
                run_id: last.id().to_string(),
                status: last.status_label(),
                elapsed_ms: elapsed.as_millis() as u64,
            }
            .into()),
        }
    }
}

/// Fetches until the resource settles or `config.max_elapsed` runs out.
///
/// Pending snapshots and retryable transport failures both wait on the same
/// backoff schedule; any other error is returned at once. The budget bounds
/// fetches as well as sleeps: a fetch still running at the deadline is
/// abandoned and counts as a timed out transport failure. One last fetch
/// happens at the deadline.
pub async fn poll_until<T, F, Fut>(config: &PollConfig, mut fetch: F) -> OpenAIResult<PollOutcome<T>>
where
    T: Pollable,
    F: FnMut() -> Fut,
    Fut: Future<Output = OpenAIResult<T>>,
{
    config.validate()?;
    let backoff = config.backoff();
    let started = Instant::now();
    let deadline = started + config.max_elapsed;
    let mut attempt: u32 = 0;
    let mut last: Option<T> = None;

    let last_error = loop {
        let fetched = match timeout_at(deadline, fetch()).await {
            Ok(fetched) => fetched,
            Err(_) => Err(OpenAIError::Timeout {
                timeout_ms: config.max_elapsed.as_millis() as u64,
            }),
        };

        let failure = match fetched {
            Ok(resource) if resource.is_settled() => {
                tracing::debug!(
                    id = resource.id(),
                    status = %resource.status_label(),
                    attempt,
                    "poll settled"
                );
                return Ok(PollOutcome::Settled(resource));
            }
            Ok(resource) => {
                tracing::debug!(
                    id = resource.id(),
                    status = %resource.status_label(),
                    attempt,
                    "still pending"
                );
                last = Some(resource);
                None
            }
            Err(e) if e.is_retryable() => {
                tracing::warn!(error = %e, attempt, "transport failure while polling");
                Some(e)
            }
            Err(e) => return Err(e),
        };

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break failure;
        }
        sleep(backoff.delay(attempt).min(remaining)).await;
        attempt = attempt.saturating_add(1);
    };

    let elapsed = started.elapsed();
    match (last, last_error) {
        (Some(last), _) => {
            tracing::warn!(
                id = last.id(),
                status = %last.status_label(),
                elapsed_ms = elapsed.as_millis() as u64,
                "polling budget exhausted"
            );
            Ok(PollOutcome::Exhausted { last, elapsed })
        }
        (None, Some(e)) => Err(e),
        (None, None) => Err(RunError::InvalidBudget(
            "polling budget ended before the first fetch".to_string(),
        )
        .into()),
    }
}

/// Waits for a run to reach a terminal or `requires_action` status.
pub struct RunPoller<'a> {
    runs: &'a dyn RunService,
    config: PollConfig,
}

impl<'a> RunPoller<'a> {
    pub fn new(runs: &'a dyn RunService, config: PollConfig) -> Self {
        Self { runs, config }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    pub async fn poll(&self, thread_id: &str, run_id: &str) -> OpenAIResult<PollOutcome> {
        let outcome = poll_until(&self.config, || self.runs.retrieve(thread_id, run_id)).await?;
        if let PollOutcome::Settled(run) = &outcome {
            tracing::info!(run_id, status = %run.status, "run settled");
        }
        Ok(outcome)
    }
}
