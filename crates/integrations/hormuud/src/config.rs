use std::time::Duration;

use smsgate_core::DEFAULT_MAX_MSG_LENGTH;

/// Production token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://smsapi.hormuud.com/token";

/// Production send endpoint.
pub const DEFAULT_SEND_URL: &str = "https://smsapi.hormuud.com/api/SendSMS";

/// Lifetime of a cached bearer token (89 minutes).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(5340);

/// Handler-wide settings for the Hormuud provider.
///
/// Account credentials are per channel and live in the channel config, not
/// here.
#[derive(Debug, Clone)]
pub struct HormuudConfig {
    /// URL of the OAuth-style password grant endpoint.
    pub token_url: String,

    /// URL of the JSON send endpoint.
    pub send_url: String,

    /// Segment length used when the channel does not override it.
    pub max_msg_length: usize,

    /// How long fetched tokens stay in the cache.
    pub token_ttl: Duration,

    /// Timeout applied to every HTTP request.
    pub timeout: Duration,
}

impl Default for HormuudConfig {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_owned(),
            send_url: DEFAULT_SEND_URL.to_owned(),
            max_msg_length: DEFAULT_MAX_MSG_LENGTH,
            token_ttl: DEFAULT_TOKEN_TTL,
            timeout: Duration::from_secs(30),
        }
    }
}

impl HormuudConfig {
    /// Configuration pointing at the production endpoints.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    #[must_use]
    pub fn with_send_url(mut self, url: impl Into<String>) -> Self {
        self.send_url = url.into();
        self
    }

    /// Point both endpoints at `base` (`{base}/token`, `{base}/api/SendSMS`).
    /// Used to target a mock server.
    #[must_use]
    pub fn with_api_base_url(self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.with_token_url(format!("{base}/token"))
            .with_send_url(format!("{base}/api/SendSMS"))
    }

    #[must_use]
    pub fn with_max_msg_length(mut self, length: usize) -> Self {
        self.max_msg_length = length;
        self
    }

    #[must_use]
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
