use crate::errors::{OpenAIError, OpenAIResult};
use crate::streaming::{AggregatedResult, StreamAggregator, StreamEvent, DEFAULT_PREFIX};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Fragments buffered before the producer waits for the consumer.
    pub capacity: usize,
    pub prefix: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

/// Consumer side of a spawned stream producer.
///
/// Dropping the handle cancels the producer, which then stops pulling the
/// remote stream.
pub struct BridgeHandle {
    receiver: mpsc::Receiver<OpenAIResult<String>>,
    token: CancellationToken,
    task: Option<JoinHandle<AggregatedResult>>,
}

impl BridgeHandle {
    /// Next visible fragment; `None` once the producer has finished.
    pub async fn recv(&mut self) -> Option<OpenAIResult<String>> {
        self.receiver.recv().await
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Waits for the producer and returns what it aggregated.
    pub async fn join(mut self) -> OpenAIResult<AggregatedResult> {
        self.receiver.close();
        match self.task.take() {
            Some(task) => task
                .await
                .map_err(|e| OpenAIError::Stream(format!("stream producer failed: {}", e))),
            None => Ok(AggregatedResult::default()),
        }
    }

    /// Adapts the handle into a fragment stream; dropping the stream cancels
    /// the producer.
    pub fn into_stream(mut self) -> impl Stream<Item = OpenAIResult<String>> + Send + 'static {
        async_stream::stream! {
            while let Some(item) = self.recv().await {
                yield item;
            }
        }
    }
}

impl Drop for BridgeHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Spawns a producer task that aggregates `events` and forwards each visible
/// fragment over a bounded channel.
pub fn spawn_bridge<S>(events: S, config: BridgeConfig) -> BridgeHandle
where
    S: Stream<Item = OpenAIResult<StreamEvent>> + Send + 'static,
{
    let (sender, receiver) = mpsc::channel(config.capacity.max(1));
    let token = CancellationToken::new();
    let producer_token = token.clone();

    let task = tokio::spawn(async move {
        let mut aggregator = StreamAggregator::with_prefix(config.prefix);
        futures::pin_mut!(events);

        loop {
            let next = tokio::select! {
                _ = producer_token.cancelled() => {
                    tracing::debug!("stream consumer went away, stopping producer");
                    break;
                }
                next = events.next() => next,
            };

            let item = match next {
                Some(Ok(event)) => match aggregator.handle(&event) {
                    Ok(Some(fragment)) => Ok(fragment),
                    Ok(None) => continue,
                    Err(e) => Err(e),
                },
                Some(Err(e)) => Err(e),
                None => break,
            };
            let failed = item.is_err();

            if let Err(e) = &item {
                tracing::warn!(error = %e, "run stream failed");
            }
            tokio::select! {
                _ = producer_token.cancelled() => break,
                sent = sender.send(item) => {
                    if sent.is_err() {
                        break;
                    }
                }
            }
            if failed {
                break;
            }
        }

        aggregator.finish()
    });

    BridgeHandle {
        receiver,
        token,
        task: Some(task),
    }
}
