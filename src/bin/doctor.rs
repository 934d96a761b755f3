use cenex_ai::config::{CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH, HOST_VAR, PORT_VAR};
use cenex_ai::doctor::{render_report, run_checks, EnvOverrides};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let overrides = EnvOverrides {
        host: std::env::var(HOST_VAR).ok(),
        port: std::env::var(PORT_VAR).ok(),
    };
    let outcomes = run_checks(&PathBuf::from(path), overrides).await;

    let (report, healthy) = render_report(&outcomes);
    println!("{}", report);

    if healthy {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
