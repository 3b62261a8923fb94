use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{ChannelType, ChannelUuid};

/// Config key holding the provider account username.
pub const CONFIG_USERNAME: &str = "username";

/// Config key holding the provider account password.
pub const CONFIG_PASSWORD: &str = "password";

/// Config key overriding the provider's per-segment character limit.
pub const CONFIG_MAX_LENGTH: &str = "max_length";

/// A provider account bound to one gateway tenant.
///
/// Channels are owned by the gateway and are immutable for the duration of a
/// send; handlers only ever borrow them.
#[derive(Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Stable unique identifier.
    pub uuid: ChannelUuid,

    /// Handler short code (e.g. `"HM"`).
    pub channel_type: ChannelType,

    /// ISO 3166-1 alpha-2 country the channel delivers to.
    pub country: String,

    /// Originating address (sender ID) used on outbound messages.
    pub address: String,

    /// Handler specific configuration (credentials, limits).
    #[serde(default)]
    pub config: HashMap<String, serde_json::Value>,
}

impl Channel {
    /// Create a channel with an empty config map.
    #[must_use]
    pub fn new(
        uuid: ChannelUuid,
        channel_type: impl Into<ChannelType>,
        country: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            uuid,
            channel_type: channel_type.into(),
            country: country.into(),
            address: address.into(),
            config: HashMap::new(),
        }
    }

    /// Set a config value.
    #[must_use]
    pub fn with_config(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Return the string config value for `key`, or `default` when it is
    /// missing or not a string.
    pub fn string_config<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.config
            .get(key)
            .and_then(serde_json::Value::as_str)
            .unwrap_or(default)
    }

    /// Return the integer config value for `key`.
    ///
    /// Numeric strings are accepted as well, since gateways frequently store
    /// every config value as text.
    pub fn int_config(&self, key: &str) -> Option<i64> {
        match self.config.get(key)? {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config: HashMap<&str, String> = self
            .config
            .iter()
            .map(|(k, v)| {
                if k == CONFIG_PASSWORD {
                    (k.as_str(), "[REDACTED]".to_owned())
                } else {
                    (k.as_str(), v.to_string())
                }
            })
            .collect();
        f.debug_struct("Channel")
            .field("uuid", &self.uuid)
            .field("channel_type", &self.channel_type)
            .field("country", &self.country)
            .field("address", &self.address)
            .field("config", &config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> Channel {
        Channel::new(ChannelUuid::new_v4(), "HM", "SO", "2020")
            .with_config(CONFIG_USERNAME, "foo")
            .with_config(CONFIG_PASSWORD, "sesame")
    }

    #[test]
    fn string_config_falls_back_to_default() {
        let ch = channel();
        assert_eq!(ch.string_config(CONFIG_USERNAME, ""), "foo");
        assert_eq!(ch.string_config("missing", "dflt"), "dflt");
    }

    #[test]
    fn int_config_accepts_numbers_and_numeric_strings() {
        let ch = channel()
            .with_config("a", 120)
            .with_config("b", "70")
            .with_config("c", "seventy");
        assert_eq!(ch.int_config("a"), Some(120));
        assert_eq!(ch.int_config("b"), Some(70));
        assert_eq!(ch.int_config("c"), None);
        assert_eq!(ch.int_config("d"), None);
    }

    #[test]
    fn debug_redacts_password() {
        let debug = format!("{:?}", channel());
        assert!(debug.contains("[REDACTED]"));
        assert!(
            !debug.contains("sesame"),
            "password must not appear in debug output"
        );
        assert!(debug.contains("foo"));
    }
}
