use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ChannelUuid, MsgId};

/// A recorded HTTP exchange with a provider, attached to a delivery status
/// so operators can audit exactly which call failed and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelLog {
    /// What the exchange was for (e.g. `"Message Sent"`).
    pub description: String,

    pub channel_uuid: ChannelUuid,

    /// Message the exchange belongs to, if any.
    pub msg_id: Option<MsgId>,

    pub method: String,
    pub url: String,

    /// Request body with credentials redacted.
    pub request: String,

    /// HTTP status code, absent when no response was received.
    pub status_code: Option<u16>,

    /// Response body, empty when no response was received.
    pub response: String,

    /// Time between sending the request and reading the full response.
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,

    /// Error description, set when the exchange failed.
    pub error: Option<String>,

    pub created_on: DateTime<Utc>,
}

impl ChannelLog {
    /// Create a log entry for an exchange with no error attached.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        channel_uuid: ChannelUuid,
        msg_id: Option<MsgId>,
        method: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            channel_uuid,
            msg_id,
            method: method.into(),
            url: url.into(),
            request: String::new(),
            status_code: None,
            response: String::new(),
            elapsed: Duration::ZERO,
            error: None,
            created_on: Utc::now(),
        }
    }

    /// Attach an error to the entry.
    ///
    /// `label` names the failed step (e.g. `"Message Send Error"`); passing
    /// `None` for `err` leaves the entry unchanged so callers can chain this
    /// unconditionally.
    #[must_use]
    pub fn with_error(mut self, label: &str, err: Option<&dyn std::error::Error>) -> Self {
        if let Some(err) = err {
            self.error = Some(format!("{label}: {err}"));
        }
        self
    }

    /// Returns `true` if the exchange failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
