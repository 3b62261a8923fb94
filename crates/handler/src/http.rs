//! Recording of provider HTTP exchanges for channel logs.

use std::time::Duration;

use reqwest::{Client, Request};
use smsgate_core::{ChannelLog, ChannelUuid, MsgId};
use thiserror::Error;
use tokio::time::Instant;
use tracing::debug;

/// Placeholder written in place of secret values in logged request bodies.
pub const REDACTED: &str = "********";

/// Why an exchange did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// No response was received (connect failure, timeout, reset).
    #[error("unable to connect to server: {0}")]
    Connection(String),

    /// The provider answered with a non-2xx status.
    #[error("received non 200 status: {0}")]
    Status(u16),
}

/// One request/response round trip with a provider.
#[derive(Debug, Clone)]
pub struct HttpExchange {
    pub method: String,
    pub url: String,
    /// Request body with secrets redacted.
    pub request: String,
    pub status_code: Option<u16>,
    pub response: String,
    pub elapsed: Duration,
    pub error: Option<ExchangeError>,
}

impl HttpExchange {
    /// Returns `true` if a 2xx response was received.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Convert the exchange into a channel log entry.
    ///
    /// The exchange's own error is not attached; callers add the error that
    /// ultimately failed the step with [`ChannelLog::with_error`].
    #[must_use]
    pub fn into_log(
        self,
        description: &str,
        channel_uuid: ChannelUuid,
        msg_id: Option<MsgId>,
    ) -> ChannelLog {
        let mut log = ChannelLog::new(description, channel_uuid, msg_id, self.method, self.url);
        log.request = self.request;
        log.status_code = self.status_code;
        log.response = self.response;
        log.elapsed = self.elapsed;
        log
    }
}

/// Execute `request` and record the exchange.
///
/// Never fails: transport errors and non-2xx statuses end up in
/// [`HttpExchange::error`]. When `logged_body` is given it is recorded
/// instead of the body actually sent, so callers carrying credentials pass a
/// copy of the payload rendered with [`REDACTED`] values.
pub async fn make_http_request(
    client: &Client,
    request: Request,
    logged_body: Option<String>,
) -> HttpExchange {
    let method = request.method().to_string();
    let url = request.url().to_string();
    let body = logged_body.unwrap_or_else(|| {
        request
            .body()
            .and_then(reqwest::Body::as_bytes)
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default()
    });

    let started = Instant::now();
    let mut exchange = HttpExchange {
        method,
        url,
        request: body,
        status_code: None,
        response: String::new(),
        elapsed: Duration::ZERO,
        error: None,
    };

    let response = match client.execute(request).await {
        Ok(response) => response,
        Err(e) => {
            debug!(url = %exchange.url, error = %e, "provider request failed");
            exchange.elapsed = started.elapsed();
            exchange.error = Some(ExchangeError::Connection(e.to_string()));
            return exchange;
        }
    };

    let status = response.status();
    exchange.status_code = Some(status.as_u16());

    match response.text().await {
        Ok(text) => exchange.response = text,
        Err(e) => {
            exchange.elapsed = started.elapsed();
            exchange.error = Some(ExchangeError::Connection(e.to_string()));
            return exchange;
        }
    }
    exchange.elapsed = started.elapsed();

    if !status.is_success() {
        exchange.error = Some(ExchangeError::Status(status.as_u16()));
    }

    debug!(
        url = %exchange.url,
        status = status.as_u16(),
        elapsed = ?exchange.elapsed,
        "provider request completed"
    );

    exchange
}
