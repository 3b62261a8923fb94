use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use smsgate_core::{CONFIG_MAX_LENGTH, CONFIG_PASSWORD, CONFIG_USERNAME, Channel, ChannelUuid};
use smsgate_hormuud::{CHANNEL_TYPE, HormuudConfig};
use tracing::{info, warn};

use crate::error::CliError;

/// Top-level configuration loaded from `smsgate.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct SmsgateConfig {
    /// Token store backend.
    #[serde(default)]
    pub state: StateConfig,
    /// Hormuud endpoint and limit overrides.
    #[serde(default)]
    pub hormuud: HormuudSection,
    /// The channel messages are sent and received on.
    #[serde(default)]
    pub channel: ChannelSection,
}

impl SmsgateConfig {
    /// Load configuration from `path`, or use defaults if the file does not
    /// exist.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(toml::from_str("")?);
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct StateConfig {
    /// Which backend to use: `"memory"` or `"redis"`.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Connection URL for the backend (e.g. `redis://localhost:6379`).
    pub url: Option<String>,

    /// Key prefix for namespacing.
    pub prefix: Option<String>,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: None,
            prefix: None,
        }
    }
}

fn default_backend() -> String {
    "memory".to_owned()
}

#[derive(Debug, Default, Deserialize)]
pub struct HormuudSection {
    pub token_url: Option<String>,
    pub send_url: Option<String>,
    pub max_msg_length: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub token_ttl_seconds: Option<u64>,
}

impl HormuudSection {
    pub fn to_config(&self) -> HormuudConfig {
        let mut config = HormuudConfig::new();
        if let Some(url) = &self.token_url {
            config = config.with_token_url(url);
        }
        if let Some(url) = &self.send_url {
            config = config.with_send_url(url);
        }
        if let Some(length) = self.max_msg_length {
            config = config.with_max_msg_length(length);
        }
        if let Some(secs) = self.timeout_seconds {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.token_ttl_seconds {
            config = config.with_token_ttl(Duration::from_secs(secs));
        }
        config
    }
}

#[derive(Deserialize)]
pub struct ChannelSection {
    /// Channel UUID; cached tokens are keyed on it.
    pub uuid: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
    /// Sender ID.
    #[serde(default)]
    pub address: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub max_length: Option<i64>,
}

impl Default for ChannelSection {
    fn default() -> Self {
        Self {
            uuid: None,
            country: default_country(),
            address: String::new(),
            username: None,
            password: None,
            max_length: None,
        }
    }
}

impl std::fmt::Debug for ChannelSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelSection")
            .field("uuid", &self.uuid)
            .field("country", &self.country)
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("max_length", &self.max_length)
            .finish()
    }
}

fn default_country() -> String {
    "SO".to_owned()
}

impl ChannelSection {
    /// Build the Hormuud channel described by this section.
    pub fn to_channel(&self) -> Result<Channel, CliError> {
        let uuid = match &self.uuid {
            Some(raw) => raw
                .parse::<ChannelUuid>()
                .map_err(|e| CliError::Config(format!("invalid channel uuid '{raw}': {e}")))?,
            None => {
                let uuid = ChannelUuid::new_v4();
                warn!(%uuid, "no channel uuid configured, tokens will not be reused across runs");
                uuid
            }
        };

        let mut channel = Channel::new(uuid, CHANNEL_TYPE, self.country.as_str(), self.address.as_str());
        if let Some(username) = &self.username {
            channel = channel.with_config(CONFIG_USERNAME, username.as_str());
        }
        if let Some(password) = &self.password {
            channel = channel.with_config(CONFIG_PASSWORD, password.as_str());
        }
        if let Some(max_length) = self.max_length {
            channel = channel.with_config(CONFIG_MAX_LENGTH, max_length);
        }
        Ok(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: SmsgateConfig = toml::from_str("").unwrap();
        assert_eq!(config.state.backend, "memory");
        assert!(config.state.url.is_none());
        assert_eq!(config.channel.country, "SO");

        let hormuud = config.hormuud.to_config();
        assert_eq!(hormuud.token_url, "https://smsapi.hormuud.com/token");
        assert_eq!(hormuud.max_msg_length, 160);
    }

    #[test]
    fn full_config() {
        let toml = r#"
            [state]
            backend = "redis"
            url = "redis://cache:6379"
            prefix = "smsgate"

            [hormuud]
            token_url = "http://mock/token"
            send_url = "http://mock/send"
            max_msg_length = 70
            timeout_seconds = 5

            [channel]
            uuid = "8eb23e93-5ecb-45ba-b726-3b064e0c56ab"
            address = "2020"
            username = "foo@bar.com"
            password = "sesame"
            max_length = 100
        "#;
        let config: SmsgateConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.state.backend, "redis");
        assert_eq!(config.state.prefix.as_deref(), Some("smsgate"));

        let hormuud = config.hormuud.to_config();
        assert_eq!(hormuud.token_url, "http://mock/token");
        assert_eq!(hormuud.send_url, "http://mock/send");
        assert_eq!(hormuud.max_msg_length, 70);
        assert_eq!(hormuud.timeout, Duration::from_secs(5));

        let channel = config.channel.to_channel().unwrap();
        assert_eq!(
            channel.uuid.to_string(),
            "8eb23e93-5ecb-45ba-b726-3b064e0c56ab"
        );
        assert_eq!(channel.channel_type.as_str(), "HM");
        assert_eq!(channel.address, "2020");
        assert_eq!(channel.string_config(CONFIG_USERNAME, ""), "foo@bar.com");
        assert_eq!(channel.int_config(CONFIG_MAX_LENGTH), Some(100));
    }

    #[test]
    fn invalid_uuid_is_config_error() {
        let config: SmsgateConfig = toml::from_str("[channel]\nuuid = \"nope\"").unwrap();
        assert!(matches!(
            config.channel.to_channel(),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn debug_redacts_password() {
        let config: SmsgateConfig =
            toml::from_str("[channel]\npassword = \"sesame\"").unwrap();
        let debug = format!("{:?}", config.channel);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sesame"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = SmsgateConfig::load(Path::new("/nonexistent/smsgate.toml")).unwrap();
        assert_eq!(config.state.backend, "memory");
    }
}
