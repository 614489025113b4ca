//! TrailPass configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrailPassConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub jobs: JobsConfig,
}

impl TrailPassConfig {
    /// Load config from the default path (~/.trailpass/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::TrailPassError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::error::TrailPassError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TrailPassError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".trailpass")
            .join("config.toml")
    }
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 3002 }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Chain stub configuration. There is no real wallet/blockchain integration;
/// the submit delay stands in for the latency of an external submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_network")]
    pub network: String,
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

fn default_network() -> String { "preprod".into() }
fn default_submit_delay_ms() -> u64 { 1000 }

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            submit_delay_ms: default_submit_delay_ms(),
        }
    }
}

/// Background job periods, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsConfig {
    #[serde(default = "default_chain_monitor_secs")]
    pub chain_monitor_secs: u64,
    #[serde(default = "default_trail_stats_secs")]
    pub trail_stats_secs: u64,
    #[serde(default = "default_health_secs")]
    pub health_secs: u64,
    #[serde(default = "default_network_secs")]
    pub network_secs: u64,
}

fn default_chain_monitor_secs() -> u64 { 15 }
fn default_trail_stats_secs() -> u64 { 30 }
fn default_health_secs() -> u64 { 60 }
fn default_network_secs() -> u64 { 45 }

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            chain_monitor_secs: default_chain_monitor_secs(),
            trail_stats_secs: default_trail_stats_secs(),
            health_secs: default_health_secs(),
            network_secs: default_network_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrailPassConfig::default();
        assert_eq!(config.gateway.port, 3002);
        assert_eq!(config.chain.submit_delay_ms, 1000);
        assert_eq!(config.jobs.chain_monitor_secs, 15);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: TrailPassConfig = toml::from_str(
            r#"
            [gateway]
            port = 8080

            [chain]
            submit_delay_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.gateway.host, "0.0.0.0");
        assert_eq!(config.chain.submit_delay_ms, 0);
        assert_eq!(config.chain.network, "preprod");
        assert_eq!(config.jobs.health_secs, 60);
    }

    #[test]
    fn test_load_from_roundtrip() {
        let dir = std::env::temp_dir().join("trailpass-test-config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut config = TrailPassConfig::default();
        config.gateway.port = 4000;
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = TrailPassConfig::load_from(&path).unwrap();
        assert_eq!(loaded.gateway.port, 4000);
        std::fs::remove_dir_all(&dir).ok();
    }
}
