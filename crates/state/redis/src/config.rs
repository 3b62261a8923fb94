use std::time::Duration;

/// Connection settings for [`RedisStateStore`](crate::RedisStateStore).
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// e.g. `redis://127.0.0.1:6379`.
    pub url: String,

    /// Written as `prefix:` in front of every key. Leave unset to share the
    /// plain `hm_token_<uuid>` keys with other gateway processes.
    pub prefix: Option<String>,

    /// Maximum pooled connections.
    pub pool_size: usize,

    /// How long to wait for a free pooled connection.
    pub connection_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self::new("redis://127.0.0.1:6379")
    }
}

impl RedisConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            prefix: None,
            pool_size: 10,
            connection_timeout: Duration::from_secs(5),
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_server_without_prefix() {
        let cfg = RedisConfig::default();
        assert_eq!(cfg.url, "redis://127.0.0.1:6379");
        assert!(cfg.prefix.is_none());
        assert_eq!(cfg.pool_size, 10);
        assert_eq!(cfg.connection_timeout, Duration::from_secs(5));
    }

    #[test]
    fn builder_sets_prefix() {
        let cfg = RedisConfig::new("redis://cache:6379").with_prefix("gw");
        assert_eq!(cfg.url, "redis://cache:6379");
        assert_eq!(cfg.prefix.as_deref(), Some("gw"));
    }
}
