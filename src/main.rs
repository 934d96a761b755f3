use cenex_ai::api::{run_server, AppState};
use cenex_ai::config::AppConfig;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    // Load Configuration
    let config = AppConfig::load()?;

    // Setup Logging (RUST_LOG wins over the configured level)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Cenex AI...");
    info!("Loaded Configuration: {:?}", config);

    let app_state = Arc::new(AppState::new(config));

    info!("Initializing API Server...");
    run_server(app_state).await?;

    Ok(())
}
