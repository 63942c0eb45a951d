//! Example: Question and answer generator
//!
//! Reads a manual and has the assistant write question/answer pairs, which
//! it hands back through the `transport_qa_data` function. The file, thread
//! and assistant ids are cached in `.env` so later runs reuse them.
//!
//! ## Usage
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! cargo run --example qa_generator -- sample_files/manual.pdf
//! ```

use integrations_openai_assistants::observability::LoggingConfig;
use integrations_openai_assistants::prelude::*;
use integrations_openai_assistants::replies::transform_latest_assistant_messages;
use integrations_openai_assistants::services::assistants::Attachment;
use integrations_openai_assistants::{FilePurpose, FileUploadRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize)]
struct QaPair {
    question: String,
    answer: String,
}

#[derive(Debug, Deserialize)]
struct TransportArgs {
    qa_data: Vec<QaPair>,
}

fn qa_assistant() -> CreateAssistantRequest {
    CreateAssistantRequest::new("gpt-4o")
        .with_name("QA Generator")
        .with_instructions(
            "You read documents and write the questions readers are likely to ask, \
             with answers. Create as many pairs as the user asks for and always send \
             them to the external system with `transport_qa_data`, then report the result.",
        )
        .with_tool(AssistantTool::file_search())
        .with_tool(AssistantTool::function(
            FunctionDefinition::new("transport_qa_data")
                .with_description("Send the generated question and answer pairs to the external system.")
                .with_parameters(json!({
                    "type": "object",
                    "properties": {
                        "qa_data": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "question": {"type": "string", "description": "The question"},
                                    "answer": {"type": "string", "description": "The answer to the question"}
                                },
                                "required": ["question", "answer"]
                            }
                        }
                    },
                    "required": ["qa_data"]
                })),
        ))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    LoggingConfig::from_env().init().map_err(|e| e.to_string())?;

    let manual = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_files/manual.pdf".to_string());
    let env = EnvFile::default();
    env.load()?;

    let config = OpenAIConfig::from_env()?.with_poll_config(
        PollConfig::default().with_max_elapsed(Duration::from_secs(240)),
    );
    let client = OpenAIClientBuilder::new().with_config(config).build()?;

    let file = match env.get("FILE_ID")? {
        Some(id) => client.files().retrieve(&id).await?,
        None => {
            client
                .files()
                .upload(FileUploadRequest::from_path(&manual, FilePurpose::Assistants).await?)
                .await?
        }
    };
    env.update("FILE_ID", &file.id)?;

    let thread = match env.get("THREAD_ID")? {
        Some(id) => client.threads().retrieve(&id).await?,
        None => client.threads().create().await?,
    };
    env.update("THREAD_ID", &thread.id)?;

    let assistant = match env.get("ASSISTANT_ID")? {
        Some(id) => client.assistants().retrieve(&id).await?,
        None => client.assistants().create(qa_assistant()).await?,
    };
    env.update("ASSISTANT_ID", &assistant.id)?;

    client
        .messages()
        .create(
            &thread.id,
            CreateMessageRequest::user(
                "Create 10 new question and answer pairs and send them to the external system.",
            )
            .with_attachment(Attachment::new(
                file.id.clone(),
                vec![AssistantTool::file_search()],
            )),
        )
        .await?;

    let mut tools = ToolRegistry::new();
    tools.register_typed("transport_qa_data", |args: TransportArgs| async move {
        let rendered = serde_json::to_string_pretty(&args.qa_data).map_err(|e| e.to_string());
        rendered.map(|json| {
            println!("{}", json);
            "OK".to_string()
        })
    });

    let run = client
        .run_driver(&tools)
        .create_and_run(&thread.id, CreateRunRequest::new(&assistant.id))
        .await?
        .into_settled()?;
    tracing::info!(run_id = %run.id, status = %run.status, "run settled");

    let messages = client
        .messages()
        .list(&thread.id, PaginationParams::new())
        .await?;
    for reply in transform_latest_assistant_messages(&messages.data) {
        if let Some(text) = reply.text {
            println!("{}", text);
        }
    }
    Ok(())
}
