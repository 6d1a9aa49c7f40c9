use anyhow::{bail, Context, Result};
use mascarin_client::{MascarinClient, StatusPolicy, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Server configuration, read once at startup.
///
/// Sources from lowest to highest priority: defaults, the TOML file,
/// environment variables, then command-line flags (applied in `main`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_name")]
    pub server_name: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the Mascarin API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Surface non-2xx upstream responses as errors instead of forwarding them
    #[serde(default)]
    pub strict_upstream_status: bool,
}

fn default_server_name() -> String {
    "mascarin-mcp".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_api_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: default_server_name(),
            host: default_host(),
            port: default_port(),
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            strict_upstream_status: false,
        }
    }
}

impl ServerConfig {
    /// Load from `config_path` (if it exists) and the process environment.
    pub fn load(config_path: &Path) -> Result<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    pub fn load_with(config_path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            toml::from_str(&content).context("Failed to parse configuration file")?
        } else {
            tracing::info!("Configuration file not found, using defaults");
            Self::default()
        };

        config.apply_env(env)?;
        Ok(config)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |key: &str| env(key).filter(|v| !v.is_empty());

        if let Some(name) = var("MCP_SERVER_NAME") {
            self.server_name = name;
        }
        if let Some(port) = var("MCP_PORT").or_else(|| var("PORT")) {
            self.port = port
                .parse()
                .with_context(|| format!("Invalid port: {}", port))?;
        }
        if let Some(url) = var("MASCARIN_API_URL") {
            self.api_url = url;
        }
        if let Some(secs) = var("MASCARIN_TIMEOUT_SECS") {
            self.request_timeout_secs = secs
                .parse()
                .with_context(|| format!("Invalid MASCARIN_TIMEOUT_SECS: {}", secs))?;
        }
        if let Some(strict) = var("MASCARIN_STRICT_STATUS") {
            self.strict_upstream_status = parse_bool(&strict)
                .with_context(|| format!("Invalid MASCARIN_STRICT_STATUS: {}", strict))?;
        }

        Ok(())
    }

    /// Address to bind the listener to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn status_policy(&self) -> StatusPolicy {
        StatusPolicy::from_strict(self.strict_upstream_status)
    }

    /// Build the upstream API client
    pub fn build_client(&self) -> Result<MascarinClient> {
        MascarinClient::builder()
            .base_url(self.api_url.as_str())
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .status_policy(self.status_policy())
            .build()
            .with_context(|| format!("Invalid Mascarin API URL: {}", self.api_url))
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {:?}", other),
    }
}
