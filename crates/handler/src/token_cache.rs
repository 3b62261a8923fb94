use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use smsgate_core::ChannelUuid;
use smsgate_state::{StateError, StateKey, StateStore};

/// Cache of provider bearer tokens, keyed by channel.
///
/// Entries expire on their own after the TTL given to [`put_token`]; there
/// is no invalidation. Concurrent callers may both miss and both fetch, in
/// which case the last write wins.
///
/// [`put_token`]: TokenCache::put_token
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Look up the cached token for `channel`.
    async fn get_token(&self, channel: &ChannelUuid) -> Result<Option<String>, StateError>;

    /// Store `token` for `channel`, expiring after `ttl`.
    async fn put_token(
        &self,
        channel: &ChannelUuid,
        token: &str,
        ttl: Duration,
    ) -> Result<(), StateError>;
}

/// [`TokenCache`] on top of a shared [`StateStore`].
///
/// Tokens live under `<namespace>_token_<channel uuid>`, e.g.
/// `hm_token_8eb23e93-...`.
pub struct StateTokenCache {
    store: Arc<dyn StateStore>,
    namespace: String,
}

impl StateTokenCache {
    /// Create a cache writing keys in `namespace` (normally the lowercase
    /// channel type).
    pub fn new(store: Arc<dyn StateStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    /// The store key used for `channel`.
    #[must_use]
    pub fn key_for(&self, channel: &ChannelUuid) -> StateKey {
        StateKey::token(self.namespace.clone(), channel.to_string())
    }
}

#[async_trait]
impl TokenCache for StateTokenCache {
    async fn get_token(&self, channel: &ChannelUuid) -> Result<Option<String>, StateError> {
        let token = self.store.get(&self.key_for(channel)).await?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    async fn put_token(
        &self,
        channel: &ChannelUuid,
        token: &str,
        ttl: Duration,
    ) -> Result<(), StateError> {
        self.store
            .set(&self.key_for(channel), token, Some(ttl))
            .await
    }
}

#[cfg(test)]
mod tests {
    use smsgate_state_memory::MemoryStateStore;

    use super::*;

    fn cache() -> (StateTokenCache, Arc<MemoryStateStore>) {
        let store = Arc::new(MemoryStateStore::new());
        let cache = StateTokenCache::new(Arc::clone(&store) as Arc<dyn StateStore>, "hm");
        (cache, store)
    }

    #[test]
    fn key_format() {
        let (cache, _) = cache();
        let uuid: ChannelUuid = "8eb23e93-5ecb-45ba-b726-3b064e0c56ab".parse().unwrap();
        assert_eq!(
            cache.key_for(&uuid).canonical(),
            "hm_token_8eb23e93-5ecb-45ba-b726-3b064e0c56ab"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn token_returned_until_ttl_elapses() {
        let (cache, _) = cache();
        let uuid = ChannelUuid::new_v4();

        cache
            .put_token(&uuid, "abc", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get_token(&uuid).await.unwrap().as_deref(), Some("abc"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get_token(&uuid).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn channels_do_not_share_tokens() {
        let (cache, _) = cache();
        let a = ChannelUuid::new_v4();
        let b = ChannelUuid::new_v4();

        cache
            .put_token(&a, "for-a", Duration::from_secs(60))
            .await
            .unwrap();

        assert!(cache.get_token(&b).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_stored_value_is_a_miss() {
        let (cache, store) = cache();
        let uuid = ChannelUuid::new_v4();
        store.set(&cache.key_for(&uuid), "", None).await.unwrap();

        assert!(cache.get_token(&uuid).await.unwrap().is_none());
    }
}
