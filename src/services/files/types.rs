use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileObject {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub created_at: i64,
    pub filename: String,
    pub purpose: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilePurpose {
    Assistants,
    AssistantsOutput,
    Vision,
}

impl FilePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilePurpose::Assistants => "assistants",
            FilePurpose::AssistantsOutput => "assistants_output",
            FilePurpose::Vision => "vision",
        }
    }
}

impl fmt::Display for FilePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct FileUploadRequest {
    pub file_data: Bytes,
    pub filename: String,
    pub purpose: FilePurpose,
}

impl FileUploadRequest {
    pub fn new(file_data: impl Into<Bytes>, filename: impl Into<String>, purpose: FilePurpose) -> Self {
        Self {
            file_data: file_data.into(),
            filename: filename.into(),
            purpose,
        }
    }

    /// Reads a local file; the upload keeps its base name.
    pub async fn from_path(
        path: impl AsRef<std::path::Path>,
        purpose: FilePurpose,
    ) -> crate::errors::OpenAIResult<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(data, filename, purpose))
    }
}
