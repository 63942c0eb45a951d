use crate::errors::{OpenAIError, OpenAIResult};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};

/// Builder for multipart/form-data requests
pub struct MultipartBuilder {
    form: Form,
    error: Option<OpenAIError>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self {
            form: Form::new(),
            error: None,
        }
    }

    /// Adds a file part; the content type follows the file extension.
    pub fn add_file(mut self, field_name: &str, file_name: &str, data: Bytes) -> Self {
        let content_type = content_type_for(file_name);
        match Part::bytes(data.to_vec())
            .file_name(file_name.to_string())
            .mime_str(content_type.as_ref())
        {
            Ok(part) => self.form = self.form.part(field_name.to_string(), part),
            Err(e) => {
                self.error = Some(OpenAIError::Serialization(format!(
                    "Failed to set MIME type for {}: {}",
                    file_name, e
                )))
            }
        }
        self
    }

    /// Adds a text part to the multipart form
    pub fn add_text(mut self, field_name: &str, value: &str) -> Self {
        self.form = self.form.text(field_name.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> OpenAIResult<Form> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.form),
        }
    }
}

impl Default for MultipartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn content_type_for(file_name: &str) -> mime::Mime {
    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => mime::APPLICATION_PDF,
        Some("json") => mime::APPLICATION_JSON,
        Some("txt") | Some("md") => mime::TEXT_PLAIN,
        Some("csv") => mime::TEXT_CSV,
        Some("html") => mime::TEXT_HTML,
        Some("png") => mime::IMAGE_PNG,
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
