//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::store::CatalogSeed;
use crate::storage::DEFAULT_INBOX_CAPACITY;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Where the HTTP server listens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Where the listing catalog comes from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Seed file; the built-in sample catalog when absent
    pub path: Option<String>,
}

/// Contact inbox settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Messages kept before the oldest is dropped
    pub inbox_capacity: usize,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
        }
    }
}

/// Simulated delay per operation, in milliseconds
///
/// All zero by default. The storefront this models waited 800 ms on
/// catalog loads, 1500 ms on demos and sign-in, 1000 ms on contact and
/// 3000 ms on uploads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub catalog_ms: u64,
    pub demo_ms: u64,
    pub auth_ms: u64,
    pub contact_ms: u64,
    pub upload_ms: u64,
}

impl LatencyConfig {
    pub fn catalog(&self) -> Duration {
        Duration::from_millis(self.catalog_ms)
    }

    pub fn demo(&self) -> Duration {
        Duration::from_millis(self.demo_ms)
    }

    pub fn auth(&self) -> Duration {
        Duration::from_millis(self.auth_ms)
    }

    pub fn contact(&self) -> Duration {
        Duration::from_millis(self.contact_ms)
    }

    pub fn upload(&self) -> Duration {
        Duration::from_millis(self.upload_ms)
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavoraConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub contact: ContactConfig,
    pub latency: LatencyConfig,
}

impl NavoraConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml_str(&content)?)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document is the default configuration
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|e| {
            ConfigError::ParseError {
                message: format!("invalid bind address '{}': {}", addr, e),
            }
            .into()
        })
    }

    /// Seed for the catalog service: the configured file or the sample
    pub fn load_catalog(&self) -> Result<CatalogSeed> {
        match &self.catalog.path {
            Some(path) => CatalogSeed::from_yaml_file(path),
            None => Ok(CatalogSeed::sample()?),
        }
    }
}
