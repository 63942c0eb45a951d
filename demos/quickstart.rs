//! Example: Math tutor quickstart
//!
//! Creates an assistant with the code interpreter, asks one question on a
//! fresh thread, polls the run until it settles and prints the reply.
//! Everything created is deleted at the end.
//!
//! ## Usage
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! cargo run --example quickstart
//! ```

use integrations_openai_assistants::observability::LoggingConfig;
use integrations_openai_assistants::prelude::*;
use integrations_openai_assistants::replies::latest_assistant_response;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    LoggingConfig::from_env().init().map_err(|e| e.to_string())?;

    let client = OpenAIClientBuilder::new()
        .with_config(OpenAIConfig::from_dotenv()?)
        .build()?;

    let assistant = client
        .assistants()
        .create(
            CreateAssistantRequest::new("gpt-4o")
                .with_name("Math Tutor")
                .with_instructions(
                    "You are a personal math tutor. Write and run code to answer math questions.",
                )
                .with_tool(AssistantTool::code_interpreter()),
        )
        .await?;
    let thread = client.threads().create().await?;
    let cleanup = Cleanup::new().thread(&thread.id).assistant(&assistant.id);

    let result = ask(
        client.as_ref(),
        &thread.id,
        &assistant.id,
        "I need to solve the equation `3x + 11 = 14`. Can you help me?",
    )
    .await;

    let report = cleanup.run(client.as_ref()).await;
    if !report.is_clean() {
        eprintln!("cleanup left {} resources behind", report.failed.len());
    }
    result
}

async fn ask(
    client: &dyn OpenAIClient,
    thread_id: &str,
    assistant_id: &str,
    question: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    client
        .messages()
        .create(thread_id, CreateMessageRequest::user(question))
        .await?;
    let run = client
        .runs()
        .create(thread_id, CreateRunRequest::new(assistant_id))
        .await?;

    let run = client.run_poller().poll(thread_id, &run.id).await?.into_settled()?;
    println!("run {} finished as {}", run.id, run.status);

    let messages = client
        .messages()
        .list(thread_id, PaginationParams::new())
        .await?;
    match latest_assistant_response(&messages.data) {
        Some(reply) => println!("assistant > {}", reply.text()),
        None => println!("assistant gave no answer"),
    }
    Ok(())
}
