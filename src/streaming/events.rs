use crate::services::assistants::{Message, Run};

/// One step of an assistant run as seen by the aggregator.
///
/// `TextCreated` and `ToolCallCreated` only open a block; content always
/// arrives through the delta variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    TextCreated,
    TextDelta { value: String },
    TextDone,
    ToolCallCreated { kind: String },
    ToolCallDelta(ToolCallDelta),
    MessageDone(Box<Message>),
    RunUpdated(Box<Run>),
}

impl StreamEvent {
    pub fn text_delta(value: impl Into<String>) -> Self {
        StreamEvent::TextDelta {
            value: value.into(),
        }
    }

    pub fn tool_call_created(kind: impl Into<String>) -> Self {
        StreamEvent::ToolCallCreated { kind: kind.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolCallDelta {
    CodeInterpreter {
        input: Option<String>,
        outputs: Vec<CodeOutput>,
    },
    FileSearch,
    Function {
        name: Option<String>,
        arguments: Option<String>,
    },
}

impl ToolCallDelta {
    pub fn code_input(input: impl Into<String>) -> Self {
        ToolCallDelta::CodeInterpreter {
            input: Some(input.into()),
            outputs: Vec::new(),
        }
    }

    pub fn code_outputs(outputs: Vec<CodeOutput>) -> Self {
        ToolCallDelta::CodeInterpreter {
            input: None,
            outputs,
        }
    }

    pub(crate) fn carries_content(&self) -> bool {
        match self {
            ToolCallDelta::CodeInterpreter { input, outputs } => {
                input.as_deref().map_or(false, |i| !i.is_empty()) || !outputs.is_empty()
            }
            ToolCallDelta::FileSearch => false,
            ToolCallDelta::Function { name, arguments } => {
                name.is_some() || arguments.as_deref().map_or(false, |a| !a.is_empty())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeOutput {
    Logs(String),
    Image { file_id: String },
}
