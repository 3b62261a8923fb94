use std::fmt;

use serde::{Deserialize, Serialize};

/// What a stored value represents. Rendered in the middle of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    /// Provider bearer token, one per channel.
    Token,
    Custom(String),
}

impl KeyKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Token => "token",
            Self::Custom(kind) => kind,
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address of one entry in a [`StateStore`](crate::StateStore).
///
/// Renders as `<namespace>_<kind>_<id>`. For provider tokens the namespace is
/// the lowercase channel type and the id the channel UUID, giving keys such as
/// `hm_token_8eb23e93-5ecb-45ba-b726-3b064e0c56ab` that other gateway
/// processes sharing the store also understand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey {
    pub namespace: String,
    pub kind: KeyKind,
    pub id: String,
}

impl StateKey {
    #[must_use]
    pub fn new(namespace: impl Into<String>, kind: KeyKind, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            kind,
            id: id.into(),
        }
    }

    /// Key of the cached token for channel `id` in `namespace`.
    #[must_use]
    pub fn token(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(namespace, KeyKind::Token, id)
    }

    /// The rendered key string.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.namespace, self.kind, self.id)
    }
}
