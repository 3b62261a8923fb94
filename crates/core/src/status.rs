use serde::{Deserialize, Serialize};

use crate::log::ChannelLog;
use crate::types::{ChannelUuid, MsgId};

/// Delivery state of an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MsgState {
    /// Sending failed; the gateway may try again later.
    #[serde(rename = "E")]
    Errored,
    /// Handed to the provider.
    #[serde(rename = "W")]
    Wired,
    /// Provider confirmed it was sent.
    #[serde(rename = "S")]
    Sent,
    /// Permanently failed.
    #[serde(rename = "F")]
    Failed,
}

impl std::fmt::Display for MsgState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Errored => "errored",
            Self::Wired => "wired",
            Self::Sent => "sent",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Result of one send invocation: final state, the provider's external
/// identifier (if any), and every HTTP exchange made along the way.
///
/// A status is created once per send, threaded through each step by value,
/// and handed back to the gateway which then owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryStatus {
    pub channel_uuid: ChannelUuid,
    pub msg_id: MsgId,
    pub state: MsgState,
    pub external_id: Option<String>,
    #[serde(default)]
    pub logs: Vec<ChannelLog>,
}

impl DeliveryStatus {
    /// Create a status for `msg_id` in the given initial state.
    #[must_use]
    pub fn new(channel_uuid: ChannelUuid, msg_id: MsgId, state: MsgState) -> Self {
        Self {
            channel_uuid,
            msg_id,
            state,
            external_id: None,
            logs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: MsgState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Append a diagnostic entry.
    #[must_use]
    pub fn with_log(mut self, log: ChannelLog) -> Self {
        self.logs.push(log);
        self
    }

    /// Returns `true` if any recorded exchange failed.
    pub fn has_error(&self) -> bool {
        self.logs.iter().any(ChannelLog::is_error)
    }
}
