use chrono::{DateTime, Utc};
use smsgate_core::{Channel, IncomingMsg, Urn};
use tracing::debug;

use crate::error::HormuudError;
use crate::types::MoPayload;

/// Translate a Hormuud inbound webhook form body into an incoming message.
///
/// `Sender`, `ShortCode` and `TimeSent` (Unix seconds) are required;
/// `MessageText` may be empty. `Sender` must be a valid number, read in the
/// channel's country when given in national format.
pub fn receive_form(channel: &Channel, body: &str) -> Result<IncomingMsg, HormuudError> {
    let payload: MoPayload = serde_urlencoded::from_str(body)
        .map_err(|e| HormuudError::Validation(format!("unable to decode form: {e}")))?;

    let sender = required(payload.sender.as_deref(), "Sender")?;
    required(payload.short_code.as_deref(), "ShortCode")?;
    let time_sent = required(payload.time_sent.as_deref(), "TimeSent")?;

    let received_on = time_sent
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .ok_or_else(|| {
            HormuudError::Validation(format!("field 'TimeSent' is not a valid timestamp: {time_sent}"))
        })?;

    let urn = Urn::tel_for_country(sender, &channel.country)
        .map_err(|e| HormuudError::Validation(e.to_string()))?;

    debug!(channel_uuid = %channel.uuid, urn = %urn, "message received");

    Ok(IncomingMsg::new(channel.uuid, urn, payload.message_text).with_received_on(received_on))
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, HormuudError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| HormuudError::Validation(format!("field '{field}' is required")))
}
