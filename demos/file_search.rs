//! Example: File search over a vector store
//!
//! Indexes the given documents into a vector store, asks a question about
//! them and prints the streamed answer, followed by the cited files.
//!
//! ## Usage
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! cargo run --example file_search -- goog-10k.pdf brka-10k.txt
//! ```

use integrations_openai_assistants::cleanup::Resource;
use integrations_openai_assistants::observability::LoggingConfig;
use integrations_openai_assistants::prelude::*;
use integrations_openai_assistants::services::assistants::{
    CreateVectorStoreRequest, FileBatchStatus, ToolResources,
};
use integrations_openai_assistants::{FilePurpose, FileUploadRequest};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    LoggingConfig::from_env().init().map_err(|e| e.to_string())?;

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        return Err("pass at least one document to index".into());
    }

    let client = OpenAIClientBuilder::new()
        .with_config(OpenAIConfig::from_dotenv()?)
        .build()?;
    let mut cleanup = Cleanup::new();

    let result = async {
        let mut file_ids = Vec::new();
        for path in &paths {
            let file = client
                .files()
                .upload(FileUploadRequest::from_path(path, FilePurpose::Assistants).await?)
                .await?;
            cleanup.push(Resource::File(file.id.clone()));
            file_ids.push(file.id);
        }

        let store = client
            .vector_stores()
            .create(CreateVectorStoreRequest::new("Financial Statements"))
            .await?;
        cleanup.push(Resource::VectorStore(
            store.id.clone(),
        ));

        let batch = client
            .vector_stores()
            .create_file_batch_and_poll(&store.id, file_ids, &client.config().poll)
            .await?
            .into_settled()?;
        if batch.status != FileBatchStatus::Completed {
            println!("indexing ended as {}", batch.status.as_str());
        }
        println!(
            "indexed {}/{} files",
            batch.file_counts.completed, batch.file_counts.total
        );

        let assistant = client
            .assistants()
            .create(
                CreateAssistantRequest::new("gpt-4o")
                    .with_name("Financial Analyst Assistant")
                    .with_instructions(
                        "You are an expert financial analyst. Use your knowledge base \
                         to answer questions about audited financial statements.",
                    )
                    .with_tool(AssistantTool::file_search())
                    .with_tool_resources(ToolResources::file_search(vec![store.id.clone()])),
            )
            .await?;
        cleanup.push(Resource::Assistant(
            assistant.id.clone(),
        ));

        let thread = client.threads().create().await?;
        cleanup.push(Resource::Thread(
            thread.id.clone(),
        ));
        client
            .messages()
            .create(
                &thread.id,
                CreateMessageRequest::user("What was the total revenue at the end of the year?"),
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

        let result = aggregator.finish();
        for (index, file_id) in result.file_ids.iter().enumerate() {
            let name = client
                .files()
                .retrieve(file_id)
                .await
                .map(|file| file.filename)
                .unwrap_or_else(|_| file_id.clone());
            println!("[{}] {}", index, name);
        }
        Ok::<_, OpenAIError>(())
    }
    .await;

    cleanup.run(client.as_ref()).await;
    Ok(result?)
}
