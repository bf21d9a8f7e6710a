// src/config.rs
//
// Configuration file parsing. Supports TOML config files that specify
// the listen port and the upstream provider endpoint; every field has a
// sensible default so a config file is optional.

use crate::provider::DEFAULT_TIMEOUT_SECS;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

// =============================================================================
// Configuration Types
// =============================================================================

/// Root configuration structure.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// HTTP server settings.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Port the API listens on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream provider settings.
#[derive(Debug, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the CoinGecko-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-call timeout in seconds for outbound requests.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_base_url() -> String {
    DEFAULT_COINGECKO_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config: {}", e))
    }
}

/// Returns a default configuration file template.
pub fn default_config_template() -> String {
    format!(
        r#"# crypto-dashboard configuration

[server]
port = {}

[upstream]
base_url = "{}"
timeout_secs = {}
"#,
        DEFAULT_PORT, DEFAULT_COINGECKO_BASE_URL, DEFAULT_TIMEOUT_SECS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.upstream.base_url, DEFAULT_COINGECKO_BASE_URL);
        assert_eq!(config.upstream.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_partial_config_overrides() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9001

            [upstream]
            base_url = "http://localhost:4000"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.upstream.base_url, "http://localhost:4000");
        assert_eq!(config.upstream.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_template_round_trips() {
        let config: Config = toml::from_str(&default_config_template()).unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
    }
}
