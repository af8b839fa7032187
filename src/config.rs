use serde::{Deserialize, Serialize};

use crate::dirs;
use crate::error::Result;

/// User-configurable settings for the relay server and CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Host address for the HTTP server (default: 127.0.0.1)
    #[serde(default = "default_host")]
    pub host: String,

    /// Port for the HTTP server (default: 8787)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Session store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Agent backend settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// Video platform settings
    #[serde(default)]
    pub video: VideoConfig,

    /// Bot verification settings
    #[serde(default)]
    pub verify: VerifyConfig,
}

/// Which session store provider to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// In-process map, for tests and single-instance runs
    Memory,
    /// NATS JetStream key-value bucket, survives restarts
    Nats,
}

/// Session store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_provider")]
    pub provider: StoreProvider,

    /// NATS server URL (used when provider = "nats")
    #[serde(default = "default_nats_url")]
    pub nats_url: String,

    /// KV bucket holding one record per user
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

/// External conversational agent backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// REST base URL for session-create and message-send
    #[serde(default = "default_agent_base_url")]
    pub base_url: String,

    /// OAuth client-credentials token endpoint
    #[serde(default = "default_agent_auth_url")]
    pub auth_url: String,

    #[serde(default)]
    pub client_id: String,

    /// Overridable via $CONCIERGE_AGENT_CLIENT_SECRET
    #[serde(default)]
    pub client_secret: String,

    /// Agent identifier passed when creating a conversation session
    #[serde(default)]
    pub agent_id: String,

    /// Profile name reported by the health endpoint
    #[serde(default = "default_agent_profile")]
    pub profile: String,

    /// Per-send timeout in seconds
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
}

/// External video-call platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    #[serde(default = "default_video_base_url")]
    pub base_url: String,

    /// Overridable via $CONCIERGE_VIDEO_API_KEY
    #[serde(default)]
    pub api_key: String,

    /// Avatar replica used for new conversations
    #[serde(default)]
    pub replica_id: String,

    /// Persona used for new conversations
    #[serde(default)]
    pub persona_id: String,

    /// Publicly reachable chat URL handed to the platform as the
    /// conversation callback; derived from the bind address when empty
    #[serde(default)]
    pub callback_url: String,
}

/// Bot-token verification vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    #[serde(default = "default_verify_url")]
    pub url: String,

    /// Overridable via $CONCIERGE_VERIFY_SECRET
    #[serde(default)]
    pub secret: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_store_provider() -> StoreProvider {
    StoreProvider::Memory
}

fn default_nats_url() -> String {
    "nats://127.0.0.1:4222".to_string()
}

fn default_bucket() -> String {
    "concierge-sessions".to_string()
}

fn default_agent_base_url() -> String {
    "https://agents.example.com/v2".to_string()
}

fn default_agent_auth_url() -> String {
    "https://auth.agents.example.com/oauth2/token".to_string()
}

fn default_agent_profile() -> String {
    "reservations-concierge".to_string()
}

fn default_send_timeout_secs() -> u64 {
    15
}

fn default_video_base_url() -> String {
    "https://video.example.com/v2".to_string()
}

fn default_verify_url() -> String {
    "https://challenge.example.com/siteverify".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            store: StoreConfig::default(),
            agent: AgentConfig::default(),
            video: VideoConfig::default(),
            verify: VerifyConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_store_provider(),
            nats_url: default_nats_url(),
            bucket: default_bucket(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_url: default_agent_base_url(),
            auth_url: default_agent_auth_url(),
            client_id: String::new(),
            client_secret: String::new(),
            agent_id: String::new(),
            profile: default_agent_profile(),
            send_timeout_secs: default_send_timeout_secs(),
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            base_url: default_video_base_url(),
            api_key: String::new(),
            replica_id: String::new(),
            persona_id: String::new(),
            callback_url: String::new(),
        }
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            url: default_verify_url(),
            secret: String::new(),
        }
    }
}

impl RelayConfig {
    /// Load configuration from the default config file path.
    /// Returns default config if the file does not exist.
    /// Secrets can always be supplied via environment variables.
    pub fn load() -> Result<Self> {
        let path = dirs::config_path();
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                crate::error::RelayError::Config(format!(
                    "Failed to read config file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Save the current configuration to the default config file path.
    pub fn save(&self) -> Result<()> {
        let path = dirs::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Pull secrets from the environment, overriding file values.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("CONCIERGE_AGENT_CLIENT_ID") {
            self.agent.client_id = v;
        }
        if let Ok(v) = std::env::var("CONCIERGE_AGENT_CLIENT_SECRET") {
            self.agent.client_secret = v;
        }
        if let Ok(v) = std::env::var("CONCIERGE_VIDEO_API_KEY") {
            self.video.api_key = v;
        }
        if let Ok(v) = std::env::var("CONCIERGE_VERIFY_SECRET") {
            self.verify.secret = v;
        }
    }

    /// Returns the server bind address string (e.g., "127.0.0.1:8787").
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelayConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8787);
        assert_eq!(config.store.provider, StoreProvider::Memory);
        assert_eq!(config.agent.send_timeout_secs, 15);
    }

    #[test]
    fn test_bind_address() {
        let config = RelayConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:8787");
    }

    #[test]
    fn test_config_deserialize() {
        let toml_str = r#"
            host = "0.0.0.0"
            port = 8080

            [store]
            provider = "nats"
            nats_url = "nats://nats.internal:4222"

            [agent]
            client_id = "relay"
        "#;
        let config: RelayConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.store.provider, StoreProvider::Nats);
        assert_eq!(config.store.nats_url, "nats://nats.internal:4222");
        assert_eq!(config.store.bucket, "concierge-sessions");
        assert_eq!(config.agent.client_id, "relay");
    }

    #[test]
    fn test_config_serialize() {
        let config = RelayConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        assert!(serialized.contains("host"));
        assert!(serialized.contains("port"));
        assert!(serialized.contains("[store]"));
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("CONCIERGE_RELAY_HOME", dir.path());

        let mut config = RelayConfig::default();
        config.host = "0.0.0.0".to_string();
        config.port = 9999;
        config.store.provider = StoreProvider::Nats;
        config.save().unwrap();

        let loaded = RelayConfig::load().unwrap();
        assert_eq!(loaded.host, "0.0.0.0");
        assert_eq!(loaded.port, 9999);
        assert_eq!(loaded.store.provider, StoreProvider::Nats);

        std::env::remove_var("CONCIERGE_RELAY_HOME");
    }
}
