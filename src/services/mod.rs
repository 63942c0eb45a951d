mod context;

pub mod assistants;
pub mod files;

pub use context::ServiceContext;
