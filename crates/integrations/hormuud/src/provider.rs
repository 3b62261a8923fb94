use std::sync::Arc;

use reqwest::Client;
use reqwest::header::ACCEPT;
use smsgate_core::{
    Channel, ChannelLog, ChannelType, DeliveryStatus, IncomingMsg, MsgState, OutboundMessage,
    max_length_for, split_msg, text_and_attachments,
};
use smsgate_handler::{
    ChannelHandler, DeliveryError, HandlerError, TokenCache, inject_trace_context,
    make_http_request,
};
use tracing::{debug, info, instrument, warn};

use crate::config::HormuudConfig;
use crate::error::HormuudError;
use crate::receive::receive_form;
use crate::token::TokenFetcher;
use crate::types::{MtPayload, SendResponse};

/// Channel type code served by this handler.
pub const CHANNEL_TYPE: &str = "HM";

const TOKEN_LOG: &str = "Token Retrieved";
const TOKEN_ERROR: &str = "Token Retrieval Error";
const SEND_LOG: &str = "Message Sent";
const SEND_ERROR: &str = "Message Send Error";

/// Channel handler delivering SMS through the Hormuud API.
///
/// Each send obtains a bearer token (cached per channel), splits the message
/// into segments and posts them one at a time, stopping at the first failed
/// segment. Every HTTP exchange is recorded on the returned status.
pub struct HormuudHandler {
    config: HormuudConfig,
    client: Client,
    tokens: TokenFetcher,
    channel_type: ChannelType,
}

impl HormuudHandler {
    /// Create a handler with its own HTTP client using `config.timeout`.
    pub fn new(config: HormuudConfig, cache: Arc<dyn TokenCache>) -> Result<Self, HormuudError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(config, client, cache))
    }

    /// Create a handler sharing an existing HTTP client.
    pub fn with_client(config: HormuudConfig, client: Client, cache: Arc<dyn TokenCache>) -> Self {
        let tokens = TokenFetcher::new(
            client.clone(),
            cache,
            config.token_url.clone(),
            config.token_ttl,
        );
        Self {
            config,
            client,
            tokens,
            channel_type: ChannelType::from(CHANNEL_TYPE),
        }
    }

    pub fn config(&self) -> &HormuudConfig {
        &self.config
    }
}

impl ChannelHandler for HormuudHandler {
    fn channel_type(&self) -> &ChannelType {
        &self.channel_type
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "Hormuud"
    }

    #[instrument(skip(self, channel, msg), fields(channel_uuid = %channel.uuid, msg_id = %msg.id))]
    async fn send_msg(
        &self,
        channel: &Channel,
        msg: &OutboundMessage,
    ) -> Result<DeliveryStatus, DeliveryError> {
        let mut status = DeliveryStatus::new(channel.uuid, msg.id, MsgState::Errored);

        let fetch = self.tokens.fetch_token(channel).await;
        let token = match (fetch.token, fetch.exchange) {
            (Ok(token), None) => token,
            (Err(e), None) => {
                warn!(error = %e, "unable to fetch token");
                return Err(DeliveryError::new(status, e.into()));
            }
            (result, Some(exchange)) => {
                let log = exchange
                    .into_log(TOKEN_LOG, channel.uuid, Some(msg.id))
                    .with_error(
                        TOKEN_ERROR,
                        result.as_ref().err().map(|e| e as &dyn std::error::Error),
                    );
                status = status.with_log(log);
                match result {
                    Ok(token) => token,
                    Err(e) => {
                        warn!(error = %e, "token request failed");
                        return Ok(status);
                    }
                }
            }
        };

        let limit = max_length_for(channel, self.config.max_msg_length);
        let parts = split_msg(&text_and_attachments(msg), limit);
        let mobile = msg.urn.path().trim_start_matches('+');

        for (segment, part) in parts.iter().enumerate() {
            let payload = MtPayload::new(mobile, part.as_str(), &channel.address);
            let mut request = match self
                .client
                .post(&self.config.send_url)
                .header(ACCEPT, "application/json")
                .bearer_auth(&token)
                .json(&payload)
                .build()
            {
                Ok(request) => request,
                Err(e) => {
                    let log = ChannelLog::new(
                        SEND_LOG,
                        channel.uuid,
                        Some(msg.id),
                        "POST",
                        self.config.send_url.as_str(),
                    )
                    .with_error(SEND_ERROR, Some(&e as &dyn std::error::Error));
                    return Ok(status.with_log(log));
                }
            };
            inject_trace_context(&mut request);

            let exchange = make_http_request(&self.client, request, None).await;
            let failure = exchange.error.clone();
            let external_id = if segment == 0 && failure.is_none() {
                serde_json::from_str::<SendResponse>(&exchange.response)
                    .ok()
                    .and_then(|r| r.message_id().map(str::to_owned))
            } else {
                None
            };

            let log = exchange
                .into_log(SEND_LOG, channel.uuid, Some(msg.id))
                .with_error(
                    SEND_ERROR,
                    failure.as_ref().map(|e| e as &dyn std::error::Error),
                );
            status = status.with_log(log);

            if let Some(e) = failure {
                warn!(segment, error = %e, "segment send failed");
                return Ok(status);
            }

            debug!(segment, "segment sent");
            status = status.with_state(MsgState::Wired);
            if let Some(id) = external_id {
                status = status.with_external_id(id);
            }
        }

        info!(state = %status.state, segments = parts.len(), "message sent");
        Ok(status)
    }

    fn receive(
        &self,
        channel: &Channel,
        form_body: &str,
    ) -> Result<Vec<IncomingMsg>, HandlerError> {
        let msg = receive_form(channel, form_body)?;
        Ok(vec![msg])
    }
}
