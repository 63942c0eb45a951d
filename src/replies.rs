//! Picking the assistant's latest answer out of a thread's message list.
//!
//! Message lists come back newest first; the helpers here rely on that.

use crate::services::assistants::{Annotation, Message, MessageContent, MessageRole};
use std::path::Path;

/// A file the assistant wrote, referenced from its reply text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePathRef {
    pub file_id: String,
    /// Extension of the sandbox path the text cites, without the dot.
    pub ext: Option<String>,
}

/// One assistant message flattened for display or download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub id: String,
    pub text: Option<String>,
    pub file_paths: Vec<FilePathRef>,
    pub image_file_ids: Vec<String>,
}

/// Assistant messages newer than the most recent user message, newest
/// first. Empty when the list holds no user message.
pub fn latest_assistant_messages(messages: &[Message]) -> &[Message] {
    match messages
        .iter()
        .position(|message| message.role == MessageRole::User)
    {
        Some(index) => &messages[..index],
        None => &[],
    }
}

/// The most recent assistant message, if any.
pub fn latest_assistant_response(messages: &[Message]) -> Option<&Message> {
    messages.iter().find(|message| message.is_assistant())
}

/// Flattens the latest assistant turn into replies in chronological order.
///
/// Each message becomes one reply carrying its last text block, that
/// block's `file_path` references and the message's image files; a message
/// without text yields one reply per image.
pub fn transform_latest_assistant_messages(messages: &[Message]) -> Vec<AssistantReply> {
    let mut replies = Vec::new();

    for message in latest_assistant_messages(messages) {
        let image_file_ids: Vec<String> = message.image_file_ids().map(String::from).collect();
        let last_text = message.content.iter().rev().find_map(|block| match block {
            MessageContent::Text { text } => Some(text),
            _ => None,
        });

        match last_text {
            Some(text) => replies.push(AssistantReply {
                id: message.id.clone(),
                text: Some(text.value.clone()),
                file_paths: text.annotations.iter().filter_map(file_path_ref).collect(),
                image_file_ids,
            }),
            None => replies.extend(image_file_ids.iter().map(|file_id| AssistantReply {
                id: message.id.clone(),
                text: None,
                file_paths: Vec::new(),
                image_file_ids: vec![file_id.clone()],
            })),
        }
    }

    replies.reverse();
    replies
}

fn file_path_ref(annotation: &Annotation) -> Option<FilePathRef> {
    match annotation {
        Annotation::FilePath {
            text, file_path, ..
        } => Some(FilePathRef {
            file_id: file_path.file_id.clone(),
            ext: Path::new(text)
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned()),
        }),
        Annotation::FileCitation { .. } => None,
    }
}
