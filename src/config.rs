use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const CONFIG_PATH_VAR: &str = "CENEX_CONFIG";
pub const HOST_VAR: &str = "CENEX_HOST";
pub const PORT_VAR: &str = "CENEX_PORT";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DoctorConfig {
    pub probe_host: String,
    pub probe_port: u16,
    pub timeout_secs: u64,
}

impl Default for DoctorConfig {
    fn default() -> Self {
        Self {
            probe_host: "crates.io".to_string(),
            probe_port: 443,
            timeout_secs: 3,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub log_level: String,
    pub doctor: DoctorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            log_level: "info".to_string(),
            doctor: DoctorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `$CENEX_CONFIG` (or `config.yaml`), then apply env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(
            std::env::var(HOST_VAR).ok(),
            std::env::var(PORT_VAR).ok(),
        )?;
        Ok(config)
    }

    /// Read a YAML config. A missing file yields the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // Strip BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn apply_env_overrides(
        &mut self,
        host: Option<String>,
        port: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                var: PORT_VAR.to_string(),
                value: port.clone(),
            })?;
        }
        Ok(())
    }

    /// Host and port for `TcpListener::bind`; the host may be a name or an IP.
    pub fn bind_target(&self) -> (&str, u16) {
        (self.server.host.as_str(), self.server.port)
    }
}
