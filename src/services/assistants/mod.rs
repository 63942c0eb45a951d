mod messages;
mod runs;
mod service;
mod threads;
mod types;
mod vector_stores;


pub use messages::{
    Annotation, Attachment, CreateMessageRequest, FileReference, ImageFile, ImageUrl, Message,
    MessageContent, MessageRole, MessageService, MessageServiceImpl, TextContent,
};
pub use runs::{
    CreateRunRequest, FunctionCall, LastError, RequiredAction, Run, RunService, RunServiceImpl,
    RunStatus, SubmitToolOutputs, ToolCall, ToolOutput,
};
pub use service::{AssistantService, AssistantServiceImpl};
pub use threads::{CreateThreadRequest, Thread, ThreadService, ThreadServiceImpl};
pub use types::{
    Assistant, AssistantTool, CodeInterpreterResources, CreateAssistantRequest, FileSearchConfig,
    FileSearchResources, FunctionDefinition, ModifyAssistantRequest, ToolResources,
};
pub use vector_stores::{
    CreateVectorStoreRequest, FileBatchStatus, FileCounts, VectorStore, VectorStoreFileBatch,
    VectorStoreService, VectorStoreServiceImpl,
};
