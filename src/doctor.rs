//! Local environment diagnostics
//!
//! Runs a few named checks against the configured environment and explains
//! what to do next when one of them fails.

use std::path::Path;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tracing::debug;

use crate::config::AppConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub ok: bool,
    pub message: String,
}

impl CheckOutcome {
    fn pass(name: &'static str, message: impl Into<String>) -> Self {
        Self { name, ok: true, message: message.into() }
    }

    fn fail(name: &'static str, message: impl Into<String>) -> Self {
        Self { name, ok: false, message: message.into() }
    }

    pub fn line(&self) -> String {
        let marker = if self.ok { "OK" } else { "FAIL" };
        format!("[{}] {}: {}", marker, self.name, self.message)
    }
}

pub const NEXT_STEPS: [&str; 3] = [
    "Check config.yaml (or $CENEX_CONFIG) parses and names a free host:port",
    "Set CENEX_HOST / CENEX_PORT to override the bind address",
    "Re-run the tests: cargo test",
];

/// Loads the config file and applies the address overrides. Falls back to
/// defaults so later checks still run.
pub fn check_config(path: &Path, overrides: EnvOverrides) -> (CheckOutcome, AppConfig) {
    let loaded = AppConfig::from_file(path).and_then(|mut config| {
        config.apply_env_overrides(overrides.host, overrides.port)?;
        Ok(config)
    });

    match loaded {
        Ok(config) if path.exists() => (
            CheckOutcome::pass("config", format!("Loaded {}", path.display())),
            config,
        ),
        Ok(config) => (
            CheckOutcome::pass("config", format!("{} not found, using defaults", path.display())),
            config,
        ),
        Err(e) => (CheckOutcome::fail("config", e.to_string()), AppConfig::default()),
    }
}

pub async fn check_bind(config: &AppConfig) -> CheckOutcome {
    let (host, port) = config.bind_target();

    match TcpListener::bind((host, port)).await {
        Ok(listener) => {
            let bound = listener
                .local_addr()
                .map(|addr| addr.to_string())
                .unwrap_or_else(|_| format!("{}:{}", host, port));
            CheckOutcome::pass("bind", format!("Able to bind {}", bound))
        }
        Err(e) => CheckOutcome::fail("bind", format!("Cannot bind {}:{} ({})", host, port, e)),
    }
}

pub async fn check_network(host: &str, port: u16, wait: Duration) -> CheckOutcome {
    let target = format!("{}:{}", host, port);
    debug!("Probing {} (timeout {:?})", target, wait);

    match timeout(wait, TcpStream::connect(&target)).await {
        Ok(Ok(_)) => CheckOutcome::pass("network", format!("Able to reach {}", target)),
        Ok(Err(e)) => CheckOutcome::fail("network", format!("Failed for {} ({})", target, e)),
        Err(_) => CheckOutcome::fail(
            "network",
            format!("Timed out after {}s reaching {}", wait.as_secs(), target),
        ),
    }
}

/// `CENEX_HOST` / `CENEX_PORT` values, captured once by the caller
#[derive(Clone, Debug, Default)]
pub struct EnvOverrides {
    pub host: Option<String>,
    pub port: Option<String>,
}

pub async fn run_checks(config_path: &Path, overrides: EnvOverrides) -> Vec<CheckOutcome> {
    let (config_outcome, config) = check_config(config_path, overrides);
    let doctor = &config.doctor;

    vec![
        config_outcome,
        check_bind(&config).await,
        check_network(
            &doctor.probe_host,
            doctor.probe_port,
            Duration::from_secs(doctor.timeout_secs),
        )
        .await,
    ]
}

/// Printable report; the flag is true when every check passed.
pub fn render_report(outcomes: &[CheckOutcome]) -> (String, bool) {
    let mut lines: Vec<String> = outcomes.iter().map(CheckOutcome::line).collect();
    let healthy = outcomes.iter().all(|o| o.ok);

    if healthy {
        lines.push(String::new());
        lines.push("Environment looks ready.".to_string());
    } else {
        lines.push(String::new());
        lines.push("Next steps:".to_string());
        for (i, step) in NEXT_STEPS.iter().enumerate() {
            lines.push(format!("{}) {}", i + 1, step));
        }
    }

    (lines.join("\n"), healthy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_line_markers() {
        assert_eq!(CheckOutcome::pass("repo", "fine").line(), "[OK] repo: fine");
        assert_eq!(CheckOutcome::fail("repo", "broken").line(), "[FAIL] repo: broken");
    }

    #[test]
    fn test_report_all_passing() {
        let (report, healthy) = render_report(&[
            CheckOutcome::pass("config", "ok"),
            CheckOutcome::pass("bind", "ok"),
        ]);
        assert!(healthy);
        assert!(report.ends_with("Environment looks ready."));
        assert!(!report.contains("Next steps"));
    }

    #[test]
    fn test_report_with_failure_lists_next_steps() {
        let (report, healthy) = render_report(&[
            CheckOutcome::pass("config", "ok"),
            CheckOutcome::fail("network", "unreachable"),
        ]);
        assert!(!healthy);
        assert!(report.contains("[FAIL] network: unreachable"));
        assert!(report.contains("Next steps:"));
        assert!(report.contains("1) "));
        assert!(report.contains("3) "));
    }

    #[test]
    fn test_check_config_missing_file_uses_defaults() {
        let (outcome, config) =
            check_config(Path::new("/nonexistent/cenex/config.yaml"), EnvOverrides::default());
        assert!(outcome.ok);
        assert!(outcome.message.contains("using defaults"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_check_config_bad_port_override_fails() {
        let overrides = EnvOverrides {
            host: None,
            port: Some("not-a-port".to_string()),
        };
        let (outcome, config) = check_config(Path::new("/nonexistent/cenex/config.yaml"), overrides);
        assert!(!outcome.ok);
        assert!(outcome.message.contains("CENEX_PORT"));
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn test_check_bind_ephemeral_port() {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        let outcome = check_bind(&config).await;
        assert!(outcome.ok, "{}", outcome.message);
    }

    #[tokio::test]
    async fn test_check_bind_accepts_hostname() {
        let mut config = AppConfig::default();
        config.server.host = "localhost".to_string();
        config.server.port = 0;
        let outcome = check_bind(&config).await;
        assert!(outcome.ok, "{}", outcome.message);
    }

    #[tokio::test]
    async fn test_check_bind_port_in_use() {
        let held = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = held.local_addr().unwrap().port();

        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = port;
        let outcome = check_bind(&config).await;
        assert!(!outcome.ok);
    }

    #[tokio::test]
    async fn test_check_network_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let outcome = check_network("127.0.0.1", port, Duration::from_secs(2)).await;
        assert!(outcome.ok, "{}", outcome.message);
    }
}
