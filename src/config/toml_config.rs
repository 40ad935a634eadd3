use crate::core::ConfigProvider;
use crate::utils::error::{FootprintError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BROKER_URI: &str = "tcp://192.168.56.1:1883";
pub const DEFAULT_PUBLISH_TOPIC: &str = "footprint/userdata";
pub const DEFAULT_SUBSCRIBE_TOPIC: &str = "footprint/average";
pub const DEFAULT_KEEP_ALIVE_SECONDS: u64 = 30;
pub const DEFAULT_AVERAGE_WAIT_MS: u64 = 1500;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub broker: BrokerConfig,
    pub topics: TopicsConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub uri: String,
    pub client_id: Option<String>,
    pub keep_alive_seconds: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_BROKER_URI.to_string(),
            client_id: None,
            keep_alive_seconds: DEFAULT_KEEP_ALIVE_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicsConfig {
    pub publish: String,
    pub subscribe: String,
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            publish: DEFAULT_PUBLISH_TOPIC.to_string(),
            subscribe: DEFAULT_SUBSCRIBE_TOPIC.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long a one-shot run waits for a first average before comparing.
    pub average_wait_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            average_wait_ms: DEFAULT_AVERAGE_WAIT_MS,
        }
    }
}

/// Paho-style generated id, unique enough per process start.
pub fn generate_client_id() -> String {
    format!("footprint-{}", chrono::Utc::now().timestamp_millis())
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FootprintError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FootprintError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_broker_uri("broker.uri", &self.broker.uri)?;
        if let Some(client_id) = &self.broker.client_id {
            validation::validate_non_empty_string("broker.client_id", client_id)?;
        }
        validation::validate_range(
            "broker.keep_alive_seconds",
            self.broker.keep_alive_seconds,
            5,
            3600,
        )?;
        validation::validate_publish_topic("topics.publish", &self.topics.publish)?;
        validation::validate_topic_filter("topics.subscribe", &self.topics.subscribe)?;
        validation::validate_range("session.average_wait_ms", self.session.average_wait_ms, 0, 60_000)?;
        Ok(())
    }
}

/// Settings after file and command-line layers have been merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub broker_uri: String,
    pub client_id: String,
    pub publish_topic: String,
    pub subscribe_topic: String,
    pub keep_alive_seconds: u64,
    pub average_wait_ms: u64,
}

impl From<TomlConfig> for ResolvedConfig {
    fn from(config: TomlConfig) -> Self {
        Self {
            broker_uri: config.broker.uri,
            client_id: config.broker.client_id.unwrap_or_else(generate_client_id),
            publish_topic: config.topics.publish,
            subscribe_topic: config.topics.subscribe,
            keep_alive_seconds: config.broker.keep_alive_seconds,
            average_wait_ms: config.session.average_wait_ms,
        }
    }
}

impl ConfigProvider for ResolvedConfig {
    fn broker_uri(&self) -> &str {
        &self.broker_uri
    }

    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn publish_topic(&self) -> &str {
        &self.publish_topic
    }

    fn subscribe_topic(&self) -> &str {
        &self.subscribe_topic
    }

    fn keep_alive_seconds(&self) -> u64 {
        self.keep_alive_seconds
    }

    fn average_wait_ms(&self) -> u64 {
        self.average_wait_ms
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

impl Validate for ResolvedConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_broker_uri("broker_uri", &self.broker_uri)?;
        validation::validate_non_empty_string("client_id", &self.client_id)?;
        validation::validate_range("keep_alive_seconds", self.keep_alive_seconds, 5, 3600)?;
        validation::validate_publish_topic("publish_topic", &self.publish_topic)?;
        validation::validate_topic_filter("subscribe_topic", &self.subscribe_topic)?;
        validation::validate_range("average_wait_ms", self.average_wait_ms, 0, 60_000)?;
        Ok(())
    }
}
