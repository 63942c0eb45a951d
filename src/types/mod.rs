mod common;

pub use common::{DeletionStatus, ListResponse, Metadata, PaginationParams, SortOrder, Usage};

pub use crate::client::{OpenAIConfig, PollConfig};
