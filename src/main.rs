use std::error::Error;

use ai_llm_service::telemetry;
use api::core::config::ApiConfig;
use tracing::{Level, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from an optional .env file.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", Level::INFO))
        .with(telemetry::layer())
        .try_init()?;

    let config = ApiConfig::from_env()?;
    info!(
        addr = %config.api_address,
        model = %config.llm.model,
        "starting PCB repair advisor backend"
    );

    api::start(config).await?;

    Ok(())
}
