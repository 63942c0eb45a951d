//! Example: Code interpreter with streaming
//!
//! Uploads a CSV, asks the assistant to chart it, prints the run as it
//! streams (code, then logs under `output >`) and downloads every file the
//! assistant generated into `./downloads`.
//!
//! ## Usage
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! cargo run --example code_interpreter -- path/to/data.csv
//! ```

use integrations_openai_assistants::observability::LoggingConfig;
use integrations_openai_assistants::prelude::*;
use integrations_openai_assistants::services::assistants::{Attachment, ToolResources};
use integrations_openai_assistants::{FilePurpose, FileUploadRequest};
use std::io::Write;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    LoggingConfig::from_env().init().map_err(|e| e.to_string())?;

    let csv_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_files/revenue.csv".to_string());

    let client = OpenAIClientBuilder::new()
        .with_config(OpenAIConfig::from_dotenv()?)
        .build()?;

    let file = client
        .files()
        .upload(FileUploadRequest::from_path(&csv_path, FilePurpose::Assistants).await?)
        .await?;
    let assistant = client
        .assistants()
        .create(
            CreateAssistantRequest::new("gpt-4o")
                .with_name("Data Visualizer")
                .with_instructions(
                    "You are great at creating beautiful data visualizations. \
                     You analyze data present in .csv files and create charts.",
                )
                .with_tool(AssistantTool::code_interpreter())
                .with_tool_resources(ToolResources::code_interpreter(vec![file.id.clone()])),
        )
        .await?;
    let thread = client.threads().create().await?;
    let cleanup = Cleanup::new()
        .thread(&thread.id)
        .assistant(&assistant.id)
        .file(&file.id);

    let result = async {
        client
            .messages()
            .create(
                &thread.id,
                CreateMessageRequest::user(
                    "Create a bar chart of the yearly totals and summarize the trend.",
                )
                .with_attachment(Attachment::new(
                    file.id.clone(),
                    vec![AssistantTool::code_interpreter()],
                )),
            )
            .await?;

        let tools = ToolRegistry::new();
        let mut aggregator = StreamAggregator::new();
        client
            .run_driver(&tools)
            .stream_to_completion(
                &thread.id,
                CreateRunRequest::new(&assistant.id),
                &mut aggregator,
                |fragment| {
                    print!("{}", fragment);
                    let _ = std::io::stdout().flush();
                },
            )
            .await?;
        println!();

        let result = aggregator.finish();
        for file_id in result.file_ids.iter().filter(|id| **id != file.id) {
            let destination = Path::new("downloads").join(format!("{}.png", file_id));
            let bytes = client.files().download_to(file_id, &destination).await?;
            println!("saved {} ({} bytes)", destination.display(), bytes);
        }
        Ok::<_, OpenAIError>(())
    }
    .await;

    cleanup.run(client.as_ref()).await;
    Ok(result?)
}
