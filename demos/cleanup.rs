//! Example: Account cleanup
//!
//! Deletes assistants, vector stores, files or a single thread. Failures are
//! reported and do not stop the remaining deletions.
//!
//! ## Usage
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! cargo run --example cleanup -- assistants
//! cargo run --example cleanup -- vector-stores
//! cargo run --example cleanup -- files
//! cargo run --example cleanup -- thread thread_abc123
//! ```

use integrations_openai_assistants::cleanup::{
    delete_all_assistants, delete_all_files, delete_all_vector_stores, CleanupReport,
};
use integrations_openai_assistants::observability::LoggingConfig;
use integrations_openai_assistants::prelude::*;

fn print_report(report: &CleanupReport) {
    for resource in &report.deleted {
        println!("deleted {}", resource);
    }
    for (resource, error) in &report.failed {
        println!("failed {}: {}", resource, error);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    LoggingConfig::from_env().init().map_err(|e| e.to_string())?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let client = OpenAIClientBuilder::new()
        .with_config(OpenAIConfig::from_dotenv()?)
        .build()?;

    let report = match args.first().map(String::as_str) {
        Some("assistants") => delete_all_assistants(client.as_ref()).await?,
        Some("vector-stores") => delete_all_vector_stores(client.as_ref()).await?,
        Some("files") => delete_all_files(client.as_ref()).await?,
        Some("thread") => {
            let id = args.get(1).ok_or("thread id required")?;
            Cleanup::new().thread(id).run(client.as_ref()).await
        }
        _ => return Err("usage: cleanup <assistants|vector-stores|files|thread ID>".into()),
    };

    print_report(&report);
    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}
