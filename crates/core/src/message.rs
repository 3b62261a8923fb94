use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ChannelUuid, MsgId};
use crate::urn::Urn;

/// A message the gateway wants delivered through a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Gateway-assigned message identifier.
    pub id: MsgId,

    /// Channel the message is sent through.
    pub channel_uuid: ChannelUuid,

    /// Recipient address.
    pub urn: Urn,

    /// Message body.
    #[serde(default)]
    pub text: String,

    /// Attachments as `content-type:url` strings, in display order.
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl OutboundMessage {
    #[must_use]
    pub fn new(id: MsgId, channel_uuid: ChannelUuid, urn: Urn, text: impl Into<String>) -> Self {
        Self {
            id,
            channel_uuid,
            urn,
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    /// Append an attachment (`content-type:url`).
    #[must_use]
    pub fn with_attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachments.push(attachment.into());
        self
    }
}

/// A message received from a provider webhook, ready to hand to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingMsg {
    /// Identifier generated on receipt.
    pub uuid: Uuid,

    /// Channel the message arrived on.
    pub channel_uuid: ChannelUuid,

    /// Sender address.
    pub urn: Urn,

    /// Message body (may be empty).
    pub text: String,

    /// When the provider says the message was sent.
    pub received_on: DateTime<Utc>,
}

impl IncomingMsg {
    /// Create an incoming message stamped with the current time.
    #[must_use]
    pub fn new(channel_uuid: ChannelUuid, urn: Urn, text: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            channel_uuid,
            urn,
            text: text.into(),
            received_on: Utc::now(),
        }
    }

    /// Override the received-on timestamp.
    #[must_use]
    pub fn with_received_on(mut self, received_on: DateTime<Utc>) -> Self {
        self.received_on = received_on;
        self
    }
}
