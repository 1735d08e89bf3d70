//! Sidecar Configuration
//!
//! Local process configuration: the control service endpoint, tenant
//! identity, and the secret material forwarded on registration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::credentials::{Kafka, Registry, TenantCredentials};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Control service endpoint
    pub controller: ControllerConfig,
    /// Tenant identity
    pub tenant: TenantConfig,
    /// Message-broker secrets
    pub kafka: KafkaConfig,
    /// Artifact-registry secrets
    pub registry: RegistryConfig,
    /// Local proxy settings
    pub proxy: ProxyConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ControllerConfig {
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TenantConfig {
    pub id: String,
    pub token: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct KafkaConfig {
    pub api_key: String,
    pub admin_url: String,
    pub rest_url: String,
    pub brokers: Vec<String>,
    pub username: String,
    pub password: String,
    pub sasl: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub url: String,
    pub token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub port: u16,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self { port: 8181 }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        std::fs::write(path, content).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// The credential bundle announced to the control service on
    /// registration.
    pub fn credentials(&self) -> TenantCredentials {
        TenantCredentials {
            kafka: Kafka {
                api_key: self.kafka.api_key.clone(),
                admin_url: self.kafka.admin_url.clone(),
                rest_url: self.kafka.rest_url.clone(),
                brokers: self.kafka.brokers.clone(),
                user: self.kafka.username.clone(),
                password: self.kafka.password.clone(),
                sasl: self.kafka.sasl,
            },
            registry: Registry {
                url: self.registry.url.clone(),
                token: self.registry.token.clone(),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            controller: ControllerConfig {
                url: "http://localhost:8080".to_string(),
            },
            tenant: TenantConfig {
                id: String::new(),
                token: String::new(),
            },
            kafka: KafkaConfig::default(),
            registry: RegistryConfig::default(),
            proxy: ProxyConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Failed to serialize config: {0}")]
    SerializeError(String),

    #[error("Failed to write config: {0}")]
    WriteError(String),
}
