//! Deployment configuration
//!
//! One JSON file per deployment. The consumer group id is required and has
//! no default on purpose: a baked-in literal shared across deployments
//! would silently merge their consumer groups.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consumer::ConsumerConfig;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("config file unreadable: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for this record
    #[error("config file malformed: {0}")]
    Parse(#[from] serde_json::Error),

    /// Consumer group id missing or empty
    #[error("consumer group id must be set per deployment")]
    MissingGroupId,

    /// Topic missing or empty
    #[error("ingest topic must be set")]
    MissingTopic,
}

/// Per-deployment ingestion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Broker host:port pairs (default: ["localhost:9092"])
    #[serde(default = "default_broker_hosts")]
    pub broker_hosts: Vec<String>,

    /// Consumer group identifier; required, per deployment
    #[serde(default)]
    pub group_id: String,

    /// Topic the consumer binds to; required
    #[serde(default)]
    pub topic: String,

    /// Fetcher threads per consumer (default: 1)
    #[serde(default = "default_fetcher_count")]
    pub fetcher_count: u32,

    /// Offset auto-commit interval in seconds (default: 60)
    #[serde(default = "default_commit_interval_secs")]
    pub commit_interval_secs: u64,

    /// Receive-buffer bound in messages (default: 2000)
    #[serde(default = "default_queued_max_messages")]
    pub queued_max_messages: usize,

    /// Streaming-mode fetch timeout in milliseconds (default: 1)
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

fn default_broker_hosts() -> Vec<String> {
    vec!["localhost:9092".to_string()]
}

fn default_fetcher_count() -> u32 {
    1
}

fn default_commit_interval_secs() -> u64 {
    60
}

fn default_queued_max_messages() -> usize {
    2000
}

fn default_fetch_timeout_ms() -> u64 {
    1
}

impl IngestionConfig {
    /// A scaffold config with defaults and the given required identifiers.
    pub fn scaffold(group_id: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            broker_hosts: default_broker_hosts(),
            group_id: group_id.into(),
            topic: topic.into(),
            fetcher_count: default_fetcher_count(),
            commit_interval_secs: default_commit_interval_secs(),
            queued_max_messages: default_queued_max_messages(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }

    /// Loads and validates a config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configs that cannot identify a consumer to the broker.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.group_id.is_empty() {
            return Err(ConfigError::MissingGroupId);
        }
        if self.topic.is_empty() {
            return Err(ConfigError::MissingTopic);
        }
        Ok(())
    }

    /// The consumer binding this deployment describes.
    pub fn consumer_config(&self) -> ConsumerConfig {
        ConsumerConfig {
            group_id: self.group_id.clone(),
            topic: self.topic.clone(),
            fetcher_count: self.fetcher_count,
            commit_interval: Duration::from_secs(self.commit_interval_secs),
            queued_max_messages: self.queued_max_messages,
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_everything_but_identity() {
        let config: IngestionConfig =
            serde_json::from_str(r#"{"group_id": "fleet-a", "topic": "gps"}"#).unwrap();
        assert_eq!(config.broker_hosts, vec!["localhost:9092"]);
        assert_eq!(config.fetcher_count, 1);
        assert_eq!(config.commit_interval_secs, 60);
        assert_eq!(config.queued_max_messages, 2000);
        assert_eq!(config.fetch_timeout_ms, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_group_id_rejected() {
        let config: IngestionConfig = serde_json::from_str(r#"{"topic": "gps"}"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingGroupId)
        ));
    }

    #[test]
    fn test_missing_topic_rejected() {
        let config: IngestionConfig =
            serde_json::from_str(r#"{"group_id": "fleet-a"}"#).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::MissingTopic)));
    }

    #[test]
    fn test_consumer_config_conversion() {
        let config = IngestionConfig::scaffold("fleet-a", "gps");
        let consumer = config.consumer_config();
        assert_eq!(consumer.commit_interval, Duration::from_secs(60));
        assert_eq!(consumer.fetch_timeout, Duration::from_millis(1));
        assert_eq!(consumer.queued_max_messages, 2000);
    }
}
