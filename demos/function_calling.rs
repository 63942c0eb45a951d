//! Example: Function calling
//!
//! A weather bot whose functions run locally. The run driver polls the run,
//! answers every `requires_action` pause in one batch and keeps polling until
//! the run settles.
//!
//! ## Usage
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! cargo run --example function_calling
//! ```

use integrations_openai_assistants::observability::LoggingConfig;
use integrations_openai_assistants::prelude::*;
use integrations_openai_assistants::replies::latest_assistant_response;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    location: String,
    #[serde(default)]
    unit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NicknameArgs {
    location: String,
}

fn tools() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry
        .register_typed("getCurrentWeather", |args: WeatherArgs| async move {
            let unit = args.unit.unwrap_or_else(|| "c".to_string());
            let value = if unit == "c" { "22" } else { "71.6" };
            tracing::info!(location = %args.location, %unit, "weather requested");
            Ok(format!("{}{}", value, unit))
        })
        .register_typed("getNickname", |args: NicknameArgs| async move {
            tracing::info!(location = %args.location, "nickname requested");
            Ok("LA".to_string())
        });
    registry
}

fn weather_assistant() -> CreateAssistantRequest {
    CreateAssistantRequest::new("gpt-4o")
        .with_instructions(
            "You are a weather bot. Use the provided functions to answer questions. \
             Use nicknames to answer the city name.",
        )
        .with_tool(AssistantTool::function(
            FunctionDefinition::new("getCurrentWeather")
                .with_description("Get the weather in location")
                .with_parameters(json!({
                    "type": "object",
                    "properties": {
                        "location": {"type": "string", "description": "The city and state e.g. San Francisco, CA"},
                        "unit": {"type": "string", "enum": ["c", "f"]}
                    },
                    "required": ["location"]
                })),
        ))
        .with_tool(AssistantTool::function(
            FunctionDefinition::new("getNickname")
                .with_description("Get the nickname of a city")
                .with_parameters(json!({
                    "type": "object",
                    "properties": {
                        "location": {"type": "string", "description": "The city and state e.g. San Francisco, CA"}
                    },
                    "required": ["location"]
                })),
        ))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    LoggingConfig::from_env().init().map_err(|e| e.to_string())?;

    let client = OpenAIClientBuilder::new()
        .with_config(OpenAIConfig::from_dotenv()?)
        .build()?;
    let registry = tools();

    let assistant = client.assistants().create(weather_assistant()).await?;
    let thread = client.threads().create().await?;
    let cleanup = Cleanup::new().thread(&thread.id).assistant(&assistant.id);

    let result = async {
        client
            .messages()
            .create(
                &thread.id,
                CreateMessageRequest::user("What's the weather like in Los Angeles right now?"),
            )
            .await?;

        let outcome = client
            .run_driver(&registry)
            .create_and_run(&thread.id, CreateRunRequest::new(&assistant.id))
            .await?;
        let run = outcome.into_settled()?;
        if run.status != RunStatus::Completed {
            println!("run ended as {}", run.status);
        }

        let messages = client
            .messages()
            .list(&thread.id, PaginationParams::new())
            .await?;
        if let Some(reply) = latest_assistant_response(&messages.data) {
            println!("assistant > {}", reply.text());
        }
        Ok::<_, OpenAIError>(())
    }
    .await;

    cleanup.run(client.as_ref()).await;
    Ok(result?)
}
