use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use smsgate_core::{CONFIG_PASSWORD, CONFIG_USERNAME, Channel};
use smsgate_handler::{
    HttpExchange, REDACTED, TokenCache, inject_trace_context, make_http_request,
};
use tracing::{debug, error, warn};

use crate::error::HormuudError;
use crate::types::{TokenRequest, TokenResponse};

/// Result of a token lookup.
///
/// `exchange` is present whenever a request to the token endpoint was made,
/// whether or not a token came out of it.
#[derive(Debug)]
pub struct TokenFetch {
    pub token: Result<String, HormuudError>,
    pub exchange: Option<HttpExchange>,
}

impl TokenFetch {
    fn cached(token: String) -> Self {
        Self {
            token: Ok(token),
            exchange: None,
        }
    }

    fn failed(err: HormuudError, exchange: Option<HttpExchange>) -> Self {
        Self {
            token: Err(err),
            exchange,
        }
    }
}

/// Obtains bearer tokens for a channel, from the cache or the token endpoint.
pub struct TokenFetcher {
    client: Client,
    cache: Arc<dyn TokenCache>,
    token_url: String,
    ttl: Duration,
}

impl TokenFetcher {
    pub fn new(
        client: Client,
        cache: Arc<dyn TokenCache>,
        token_url: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            client,
            cache,
            token_url: token_url.into(),
            ttl,
        }
    }

    /// Return a token for `channel`.
    ///
    /// A cached token is returned as is. Otherwise the channel's `username`
    /// and `password` are exchanged for a new token, which is cached for the
    /// configured TTL.
    pub async fn fetch_token(&self, channel: &Channel) -> TokenFetch {
        match self.cache.get_token(&channel.uuid).await {
            Ok(Some(token)) => {
                debug!(channel_uuid = %channel.uuid, "using cached token");
                return TokenFetch::cached(token);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(channel_uuid = %channel.uuid, error = %e, "token cache read failed");
            }
        }

        let username = channel.string_config(CONFIG_USERNAME, "");
        if username.is_empty() {
            return TokenFetch::failed(missing_config(channel, CONFIG_USERNAME), None);
        }
        let password = channel.string_config(CONFIG_PASSWORD, "");
        if password.is_empty() {
            return TokenFetch::failed(missing_config(channel, CONFIG_PASSWORD), None);
        }

        let mut request = match self
            .client
            .post(&self.token_url)
            .header(ACCEPT, "application/json")
            .form(&TokenRequest::password_grant(username, password))
            .build()
        {
            Ok(request) => request,
            Err(e) => return TokenFetch::failed(HormuudError::Request(e), None),
        };
        inject_trace_context(&mut request);

        let logged_body =
            serde_urlencoded::to_string(TokenRequest::password_grant(username, REDACTED))
                .unwrap_or_default();
        let exchange = make_http_request(&self.client, request, Some(logged_body)).await;
        if let Some(e) = exchange.error.clone() {
            return TokenFetch::failed(e.into(), Some(exchange));
        }

        let token = match serde_json::from_str::<TokenResponse>(&exchange.response) {
            Ok(resp) => resp.access_token.unwrap_or_default(),
            Err(e) => {
                return TokenFetch::failed(
                    HormuudError::Protocol(format!(
                        "error getting access_token from response: {e}"
                    )),
                    Some(exchange),
                );
            }
        };
        if token.is_empty() {
            return TokenFetch::failed(
                HormuudError::Protocol("no access token returned".into()),
                Some(exchange),
            );
        }

        if let Err(e) = self.cache.put_token(&channel.uuid, &token, self.ttl).await {
            error!(channel_uuid = %channel.uuid, error = %e, "error caching HM access token");
        }

        TokenFetch {
            token: Ok(token),
            exchange: Some(exchange),
        }
    }
}

fn missing_config(channel: &Channel, key: &str) -> HormuudError {
    HormuudError::Config(format!(
        "Missing '{key}' config for {} channel",
        channel.channel_type
    ))
}
