use crate::errors::{OpenAIError, OpenAIResult, ValidationError};
use crate::services::files::FileUploadRequest;

pub struct FileRequestValidator;

impl FileRequestValidator {
    const MAX_FILE_SIZE: usize = 512 * 1024 * 1024;

    pub fn validate(request: &FileUploadRequest) -> OpenAIResult<()> {
        if request.filename.is_empty() {
            return Err(OpenAIError::Validation(
                ValidationError::MissingRequiredField("filename".to_string()),
            ));
        }

        if request.file_data.is_empty() {
            return Err(OpenAIError::Validation(ValidationError::InvalidParameter {
                parameter: "file".to_string(),
                reason: "file cannot be empty".to_string(),
            }));
        }

        if request.file_data.len() > Self::MAX_FILE_SIZE {
            return Err(OpenAIError::Validation(ValidationError::InvalidParameter {
                parameter: "file".to_string(),
                reason: format!(
                    "file is {} bytes, limit is {}",
                    request.file_data.len(),
                    Self::MAX_FILE_SIZE
                ),
            }));
        }

        Ok(())
    }
}
