use crate::client::PollConfig;
use crate::errors::{OpenAIResult, RunError};
use crate::runs::{PollOutcome, RunPoller};
use crate::services::assistants::{CreateRunRequest, RunService, RunStatus};
use crate::streaming::StreamAggregator;
use crate::tools::ToolRegistry;

/// Carries a run to a final state, answering its tool calls on the way.
pub struct RunDriver<'a> {
    runs: &'a dyn RunService,
    tools: &'a ToolRegistry,
    config: PollConfig,
}

impl<'a> RunDriver<'a> {
    pub fn new(runs: &'a dyn RunService, tools: &'a ToolRegistry, config: PollConfig) -> Self {
        Self {
            runs,
            tools,
            config,
        }
    }

    /// Polls the run; each `requires_action` stop is resolved through the
    /// registry and submitted as one batch before polling again. Every poll
    /// gets a fresh budget.
    pub async fn run_to_completion(&self, thread_id: &str, run_id: &str) -> OpenAIResult<PollOutcome> {
        let poller = RunPoller::new(self.runs, self.config.clone());

        loop {
            let outcome = poller.poll(thread_id, run_id).await?;
            let run = match &outcome {
                PollOutcome::Settled(run) if run.status == RunStatus::RequiresAction => run,
                _ => return Ok(outcome),
            };

            let action = run
                .required_action
                .as_ref()
                .ok_or_else(|| RunError::MissingRequiredAction {
                    run_id: run.id.clone(),
                })?;
            let outputs = self.tools.dispatch(action).await?;
            self.runs
                .submit_tool_outputs(thread_id, run_id, outputs)
                .await?;
        }
    }

    pub async fn create_and_run(
        &self,
        thread_id: &str,
        request: CreateRunRequest,
    ) -> OpenAIResult<PollOutcome> {
        let run = self.runs.create(thread_id, request).await?;
        self.run_to_completion(thread_id, &run.id).await
    }

    /// Streams a new run into `aggregator`, continuing with the tool-output
    /// stream whenever the run stops for function calls.
    pub async fn stream_to_completion<F>(
        &self,
        thread_id: &str,
        request: CreateRunRequest,
        aggregator: &mut StreamAggregator,
        mut on_fragment: F,
    ) -> OpenAIResult<()>
    where
        F: FnMut(&str),
    {
        let mut stream = self.runs.create_stream(thread_id, request).await?;

        loop {
            aggregator.drain_with(&mut stream, &mut on_fragment).await?;

            let requires_action = aggregator
                .last_run()
                .map_or(false, |run| run.status == RunStatus::RequiresAction);
            if !requires_action {
                return Ok(());
            }
            // Cleared so a follow-up stream without run events cannot loop.
            let run = match aggregator.take_last_run() {
                Some(run) => run,
                None => return Ok(()),
            };

            let action = run
                .required_action
                .as_ref()
                .ok_or_else(|| RunError::MissingRequiredAction {
                    run_id: run.id.clone(),
                })?;
            let outputs = self.tools.dispatch(action).await?;
            stream = self
                .runs
                .submit_tool_outputs_stream(thread_id, &run.id, outputs)
                .await?;
        }
    }
}
