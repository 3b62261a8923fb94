use serde::{Deserialize, Serialize};

/// Value sent for `mType` and `eType`; the provider picks its defaults.
pub const UNSET_MESSAGE_TYPE: i32 = -1;

/// Value sent for `UDH`; segments are delivered as independent messages.
pub const NO_UDH: &str = "";

/// JSON body of one send request.
#[derive(Debug, Clone, Serialize)]
pub struct MtPayload {
    /// Destination number without a leading `+`.
    pub mobile: String,

    pub message: String,

    /// Channel address.
    #[serde(rename = "senderid")]
    pub sender_id: String,

    #[serde(rename = "mType")]
    pub message_type: i32,

    #[serde(rename = "eType")]
    pub encoding_type: i32,

    #[serde(rename = "UDH")]
    pub udh: String,
}

impl MtPayload {
    pub fn new(mobile: impl Into<String>, message: impl Into<String>, sender_id: &str) -> Self {
        Self {
            mobile: mobile.into(),
            message: message.into(),
            sender_id: sender_id.to_owned(),
            message_type: UNSET_MESSAGE_TYPE,
            encoding_type: UNSET_MESSAGE_TYPE,
            udh: NO_UDH.to_owned(),
        }
    }
}

/// Form body of a token request.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest<'a> {
    #[serde(rename = "Username")]
    pub username: &'a str,

    #[serde(rename = "Password")]
    pub password: &'a str,

    pub grant_type: &'static str,
}

impl<'a> TokenRequest<'a> {
    pub fn password_grant(username: &'a str, password: &'a str) -> Self {
        Self {
            username,
            password,
            grant_type: "password",
        }
    }
}

/// Token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
}

/// Send endpoint response. Only the message ID is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendResponse {
    #[serde(rename = "Data")]
    pub data: Option<SendResponseData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendResponseData {
    #[serde(rename = "MessageID")]
    pub message_id: Option<String>,
}

impl SendResponse {
    /// The provider message ID, if present and non-empty.
    pub fn message_id(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.message_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Inbound webhook form fields.
#[derive(Debug, Clone, Deserialize)]
pub struct MoPayload {
    #[serde(rename = "Sender")]
    pub sender: Option<String>,

    #[serde(rename = "MessageText", default)]
    pub message_text: String,

    #[serde(rename = "ShortCode")]
    pub short_code: Option<String>,

    /// Unix seconds, kept as text so a malformed value can be reported by
    /// field name.
    #[serde(rename = "TimeSent")]
    pub time_sent: Option<String>,
}
