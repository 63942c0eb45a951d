use crate::errors::{OpenAIError, OpenAIResult};
use crate::services::assistants::{Annotation, Message, MessageContent, Run, RunStatus};
use crate::streaming::{CodeOutput, StreamEvent, ToolCallDelta};
use futures::{Stream, StreamExt};
use std::ops::Range;

pub const DEFAULT_PREFIX: &str = "assistant > ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    Idle,
    TextOpen,
    ToolOpen,
    Done,
}

/// Everything one run stream produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedResult {
    /// Every fragment that was made visible, concatenated.
    pub transcript: String,
    /// Final message texts with citation spans replaced by `[n]`.
    pub messages: Vec<String>,
    /// Cited, attached and generated file ids in first-seen order.
    pub file_ids: Vec<String>,
    pub logs: Vec<String>,
    pub last_run: Option<Run>,
    pub completed: bool,
}

impl AggregatedResult {
    pub fn requires_action(&self) -> bool {
        self.last_run
            .as_ref()
            .map_or(false, |run| run.status == RunStatus::RequiresAction)
    }
}

/// State machine folding one run's stream events into text and file ids.
#[derive(Debug)]
pub struct StreamAggregator {
    prefix: String,
    state: AggregatorState,
    result: AggregatedResult,
}

impl Default for StreamAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamAggregator {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            state: AggregatorState::Idle,
            result: AggregatedResult::default(),
        }
    }

    pub fn state(&self) -> AggregatorState {
        self.state
    }

    pub fn last_run(&self) -> Option<&Run> {
        self.result.last_run.as_ref()
    }

    /// Forgets the last run snapshot, so a follow-up stream starts clean.
    pub fn take_last_run(&mut self) -> Option<Run> {
        self.result.last_run.take()
    }

    /// Applies one event and returns the fragment it made visible, if any.
    pub fn handle(&mut self, event: &StreamEvent) -> OpenAIResult<Option<String>> {
        let fragment = match event {
            StreamEvent::TextCreated => {
                let mut fragment = String::new();
                if self.state == AggregatorState::TextOpen {
                    fragment.push('\n');
                }
                fragment.push_str(&self.prefix);
                self.state = AggregatorState::TextOpen;
                Some(fragment)
            }
            StreamEvent::TextDelta { value } => {
                self.expect(AggregatorState::TextOpen, "text delta")?;
                Some(value.clone())
            }
            StreamEvent::TextDone => {
                if self.state == AggregatorState::TextOpen {
                    self.state = AggregatorState::Idle;
                    Some("\n".to_string())
                } else {
                    None
                }
            }
            StreamEvent::ToolCallCreated { kind } => {
                let mut fragment = String::new();
                if self.state == AggregatorState::TextOpen {
                    fragment.push('\n');
                }
                fragment.push_str(&format!("{}{}\n", self.prefix, kind));
                self.state = AggregatorState::ToolOpen;
                Some(fragment)
            }
            StreamEvent::ToolCallDelta(delta) => {
                self.expect(AggregatorState::ToolOpen, "tool call delta")?;
                self.tool_delta(delta)
            }
            StreamEvent::MessageDone(message) => {
                self.message_done(message);
                self.state = AggregatorState::Done;
                self.result.completed = true;
                None
            }
            StreamEvent::RunUpdated(run) => {
                tracing::debug!(run_id = %run.id, status = %run.status, "run updated");
                self.result.last_run = Some(run.as_ref().clone());
                None
            }
        };

        if let Some(fragment) = &fragment {
            self.result.transcript.push_str(fragment);
        }
        Ok(fragment.filter(|f| !f.is_empty()))
    }

    fn expect(&self, state: AggregatorState, what: &str) -> OpenAIResult<()> {
        if self.state == state {
            Ok(())
        } else {
            Err(OpenAIError::Stream(format!(
                "{} received in state {:?}",
                what, self.state
            )))
        }
    }

    fn tool_delta(&mut self, delta: &ToolCallDelta) -> Option<String> {
        match delta {
            ToolCallDelta::CodeInterpreter { input, outputs } => {
                let mut fragment = input.clone().unwrap_or_default();
                if !outputs.is_empty() {
                    fragment.push_str("\n\noutput >");
                    for output in outputs {
                        match output {
                            CodeOutput::Logs(logs) => {
                                fragment.push_str(&format!("\n{}", logs));
                                self.result.logs.push(logs.clone());
                            }
                            CodeOutput::Image { file_id } => self.record_file(file_id),
                        }
                    }
                }
                Some(fragment)
            }
            ToolCallDelta::FileSearch | ToolCallDelta::Function { .. } => None,
        }
    }

    fn message_done(&mut self, message: &Message) {
        let mut texts = Vec::new();
        for block in &message.content {
            match block {
                MessageContent::Text { text } => {
                    for annotation in &text.annotations {
                        self.record_file(annotation.file_id());
                    }
                    texts.push(replace_citations(&text.value, &text.annotations));
                }
                MessageContent::ImageFile { image_file } => self.record_file(&image_file.file_id),
                _ => {}
            }
        }
        for attachment in &message.attachments {
            self.record_file(&attachment.file_id);
        }
        self.result.messages.push(texts.join("\n"));
    }

    fn record_file(&mut self, file_id: &str) {
        if !self.result.file_ids.iter().any(|id| id == file_id) {
            self.result.file_ids.push(file_id.to_string());
        }
    }

    /// Feeds a whole stream through [`handle`](Self::handle), passing each
    /// visible fragment to `on_fragment`. The first delivery or protocol
    /// error stops draining and is returned.
    pub async fn drain_with<S, F>(&mut self, stream: S, mut on_fragment: F) -> OpenAIResult<()>
    where
        S: Stream<Item = OpenAIResult<StreamEvent>>,
        F: FnMut(&str),
    {
        futures::pin_mut!(stream);
        while let Some(event) = stream.next().await {
            if let Some(fragment) = self.handle(&event?)? {
                on_fragment(&fragment);
            }
        }
        Ok(())
    }

    pub async fn drain<S>(&mut self, stream: S) -> OpenAIResult<()>
    where
        S: Stream<Item = OpenAIResult<StreamEvent>>,
    {
        self.drain_with(stream, |_| {}).await
    }

    pub fn finish(self) -> AggregatedResult {
        self.result
    }
}

/// Replaces each annotation's span with `[index]`.
///
/// The provider's character range is used when it covers the annotation
/// text; otherwise the first unclaimed occurrence of the text is. Empty
/// spans and spans that cannot be located leave the text untouched.
fn replace_citations(value: &str, annotations: &[Annotation]) -> String {
    let offsets: Vec<usize> = value.char_indices().map(|(offset, _)| offset).collect();
    let byte_offset = |index: usize| offsets.get(index).copied().unwrap_or(value.len());
    let mut spans: Vec<(Range<usize>, usize)> = Vec::new();

    for (index, annotation) in annotations.iter().enumerate() {
        let text = annotation.text();
        if text.is_empty() {
            continue;
        }

        let by_range = annotation
            .span()
            .filter(|(start, end)| start < end && *end <= offsets.len())
            .map(|(start, end)| byte_offset(start)..byte_offset(end))
            .filter(|range| &value[range.clone()] == text);
        let range = by_range.or_else(|| {
            value
                .match_indices(text)
                .map(|(at, _)| at..at + text.len())
                .find(|candidate| !spans.iter().any(|(taken, _)| overlaps(taken, candidate)))
        });

        match range {
            Some(range) if !spans.iter().any(|(taken, _)| overlaps(taken, &range)) => {
                spans.push((range, index))
            }
            _ => tracing::debug!(index, "citation span not found in message text"),
        }
    }

    spans.sort_by_key(|(range, _)| range.start);
    let mut output = String::with_capacity(value.len());
    let mut cursor = 0;
    for (range, index) in spans {
        output.push_str(&value[cursor..range.start]);
        output.push_str(&format!("[{}]", index));
        cursor = range.end;
    }
    output.push_str(&value[cursor..]);
    output
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}
