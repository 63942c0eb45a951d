use crate::errors::{ErrorMapper, OpenAIErrorDetail, OpenAIErrorResponse, OpenAIResult};
use crate::services::assistants::{Message, Run};
use crate::streaming::{CodeOutput, StreamEvent, ToolCallDelta};
use crate::transport::{BoxStream, SseEvent};
use futures::StreamExt;
use serde::Deserialize;

#[derive(Deserialize)]
struct MessageDeltaEvent {
    id: String,
    #[serde(default)]
    delta: MessageDelta,
}

#[derive(Deserialize, Default)]
struct MessageDelta {
    #[serde(default)]
    content: Vec<ContentDelta>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentDelta {
    Text {
        index: u32,
        #[serde(default)]
        text: Option<TextDelta>,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct TextDelta {
    #[serde(default)]
    value: Option<String>,
}

#[derive(Deserialize)]
struct RunStepDeltaEvent {
    id: String,
    #[serde(default)]
    delta: RunStepDelta,
}

#[derive(Deserialize, Default)]
struct RunStepDelta {
    #[serde(default)]
    step_details: Option<StepDetailsDelta>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum StepDetailsDelta {
    ToolCalls {
        #[serde(default)]
        tool_calls: Vec<ToolCallWire>,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ToolCallWire {
    CodeInterpreter {
        index: u32,
        #[serde(default)]
        code_interpreter: Option<CodeInterpreterWire>,
    },
    FileSearch {
        index: u32,
    },
    Function {
        index: u32,
        #[serde(default)]
        function: Option<FunctionWire>,
    },
}

#[derive(Deserialize)]
struct CodeInterpreterWire {
    #[serde(default)]
    input: Option<String>,
    #[serde(default)]
    outputs: Vec<CodeOutputWire>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum CodeOutputWire {
    Logs {
        #[serde(default)]
        logs: String,
    },
    Image {
        image: ImageWire,
    },
}

#[derive(Deserialize)]
struct ImageWire {
    file_id: String,
}

#[derive(Deserialize)]
struct FunctionWire {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<String>,
}

impl ToolCallWire {
    fn index(&self) -> u32 {
        match self {
            ToolCallWire::CodeInterpreter { index, .. }
            | ToolCallWire::FileSearch { index }
            | ToolCallWire::Function { index, .. } => *index,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ToolCallWire::CodeInterpreter { .. } => "code_interpreter",
            ToolCallWire::FileSearch { .. } => "file_search",
            ToolCallWire::Function { .. } => "function",
        }
    }

    fn into_delta(self) -> ToolCallDelta {
        match self {
            ToolCallWire::CodeInterpreter {
                code_interpreter, ..
            } => {
                let (input, outputs) = match code_interpreter {
                    Some(ci) => (ci.input, ci.outputs),
                    None => (None, Vec::new()),
                };
                ToolCallDelta::CodeInterpreter {
                    input,
                    outputs: outputs
                        .into_iter()
                        .map(|output| match output {
                            CodeOutputWire::Logs { logs } => CodeOutput::Logs(logs),
                            CodeOutputWire::Image { image } => CodeOutput::Image {
                                file_id: image.file_id,
                            },
                        })
                        .collect(),
                }
            }
            ToolCallWire::FileSearch { .. } => ToolCallDelta::FileSearch,
            ToolCallWire::Function { function, .. } => {
                let (name, arguments) = match function {
                    Some(f) => (f.name, f.arguments),
                    None => (None, None),
                };
                ToolCallDelta::Function { name, arguments }
            }
        }
    }
}

/// Turns the provider's raw assistant events into [`StreamEvent`]s.
///
/// The provider only sends deltas, so the decoder tracks which text part and
/// which tool call are open to synthesize the created/done boundaries.
#[derive(Debug, Default)]
pub struct EventDecoder {
    open_text: Option<(String, u32)>,
    open_tool: Option<(String, u32)>,
}

impl EventDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, event: &SseEvent) -> OpenAIResult<Vec<StreamEvent>> {
        let name = event.event_type.as_deref().unwrap_or("");
        let mut out = Vec::new();

        match name {
            "thread.message.delta" => {
                let delta: MessageDeltaEvent = event.parse()?;
                for part in delta.delta.content {
                    if let ContentDelta::Text { index, text } = part {
                        let key = (delta.id.clone(), index);
                        if self.open_text.as_ref() != Some(&key) {
                            if self.open_text.take().is_some() {
                                out.push(StreamEvent::TextDone);
                            }
                            out.push(StreamEvent::TextCreated);
                            self.open_text = Some(key);
                        }
                        if let Some(value) = text.and_then(|t| t.value) {
                            if !value.is_empty() {
                                out.push(StreamEvent::TextDelta { value });
                            }
                        }
                    }
                }
            }
            "thread.run.step.delta" => {
                let delta: RunStepDeltaEvent = event.parse()?;
                if let Some(StepDetailsDelta::ToolCalls { tool_calls }) = delta.delta.step_details {
                    for call in tool_calls {
                        let key = (delta.id.clone(), call.index());
                        if self.open_tool.as_ref() != Some(&key) {
                            out.push(StreamEvent::ToolCallCreated {
                                kind: call.kind().to_string(),
                            });
                            self.open_tool = Some(key);
                        }
                        let delta = call.into_delta();
                        if delta.carries_content() {
                            out.push(StreamEvent::ToolCallDelta(delta));
                        }
                    }
                }
            }
            "thread.run.step.completed" => {
                self.open_tool = None;
            }
            "thread.message.completed" => {
                let message: Message = event.parse()?;
                if self.open_text.take().is_some() {
                    out.push(StreamEvent::TextDone);
                }
                out.push(StreamEvent::MessageDone(Box::new(message)));
            }
            "error" => return Err(stream_error(&event.data)),
            run_event if run_event.starts_with("thread.run.") && !run_event.contains(".step") => {
                let run: Run = event.parse()?;
                out.push(StreamEvent::RunUpdated(Box::new(run)));
            }
            other => {
                tracing::trace!(event = other, "ignoring stream event");
            }
        }

        Ok(out)
    }
}

fn stream_error(data: &str) -> crate::errors::OpenAIError {
    let detail = serde_json::from_str::<OpenAIErrorResponse>(data)
        .map(|response| response.error)
        .or_else(|_| serde_json::from_str::<OpenAIErrorDetail>(data));

    match detail {
        Ok(detail) => ErrorMapper::map_error_type(
            detail.error_type.as_deref().unwrap_or("server_error"),
            detail.message,
        ),
        Err(_) => crate::errors::OpenAIError::Stream(data.to_string()),
    }
}

/// Decodes a raw event stream, ending at the provider's `done` marker.
pub fn decode_stream(mut raw: BoxStream<SseEvent>) -> BoxStream<StreamEvent> {
    Box::pin(async_stream::try_stream! {
        let mut decoder = EventDecoder::new();
        while let Some(event) = raw.next().await {
            let event = event?;
            if event.is_done() {
                break;
            }
            for decoded in decoder.decode(&event)? {
                yield decoded;
            }
        }
    })
}
