mod env;

use crate::world::ResetPolicy;
use serde::Deserialize;
use std::path::PathBuf;

/// Complete server configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub listeners: ListenerConfig,
}

/// Bind address and static assets
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served under /static
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP request handling
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Largest accepted request body
    #[serde(default = "default_body_size_limit")]
    pub body_size_limit_bytes: usize,
}

fn default_body_size_limit() -> usize {
    1_048_576 // 1 MB
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            body_size_limit_bytes: default_body_size_limit(),
        }
    }
}

/// Listener bucket behaviour
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListenerConfig {
    #[serde(default)]
    pub reset_policy: ResetPolicy,
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<WorldConfig, Box<dyn std::error::Error + Send + Sync>> {
    let contents = std::fs::read_to_string(path)?;
    let config: WorldConfig = toml::from_str(&contents)?;
    Ok(config)
}
