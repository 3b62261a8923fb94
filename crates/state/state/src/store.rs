use std::time::Duration;

use async_trait::async_trait;

use crate::error::StateError;
use crate::key::StateKey;

/// Shared string store with per-entry expiry.
///
/// Backends own expiry: an entry past its TTL reads as absent and callers
/// never see deadlines. Writes to the same key race freely and the last one
/// wins.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Current value of `key`, or `None` when missing or expired.
    async fn get(&self, key: &StateKey) -> Result<Option<String>, StateError>;

    /// Store `value` under `key`, replacing any previous value and its TTL.
    /// `None` keeps the entry until it is overwritten.
    async fn set(
        &self,
        key: &StateKey,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), StateError>;
}
