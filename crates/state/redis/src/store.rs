use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;

use smsgate_state::error::StateError;
use smsgate_state::key::StateKey;
use smsgate_state::store::StateStore;

use crate::config::RedisConfig;
use crate::key_render::render_key;

/// Token store on a shared Redis server.
///
/// Each entry is one Redis string written with `SET ... EX`, so another
/// process reading the same key sees the same token and expiry.
pub struct RedisStateStore {
    pool: Pool,
    prefix: Option<String>,
}

fn backend(err: redis::RedisError) -> StateError {
    StateError::Backend(err.to_string())
}

fn connection(err: impl ToString) -> StateError {
    StateError::Connection(err.to_string())
}

impl RedisStateStore {
    /// Build the connection pool. No connection is opened until first use.
    ///
    /// # Errors
    ///
    /// [`StateError::Connection`] when the URL or pool settings are rejected.
    pub fn new(config: &RedisConfig) -> Result<Self, StateError> {
        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(connection)?
            .max_size(config.pool_size)
            .wait_timeout(Some(config.connection_timeout))
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(connection)?;

        Ok(Self {
            pool,
            prefix: config.prefix.clone(),
        })
    }

    async fn checkout(
        &self,
        key: &StateKey,
    ) -> Result<(deadpool_redis::Connection, String), StateError> {
        let conn = self.pool.get().await.map_err(connection)?;
        Ok((conn, render_key(self.prefix.as_deref(), key)))
    }
}

/// `SET EX` takes whole seconds; round up so a short TTL never means "keep".
fn expire_secs(ttl: Duration) -> u64 {
    let whole = ttl.as_secs();
    if whole == 0 || ttl.subsec_nanos() != 0 {
        whole + 1
    } else {
        whole
    }
}

#[async_trait]
impl StateStore for RedisStateStore {
    async fn get(&self, key: &StateKey) -> Result<Option<String>, StateError> {
        let (mut conn, name) = self.checkout(key).await?;
        conn.get(&name).await.map_err(backend)
    }

    async fn set(
        &self,
        key: &StateKey,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), StateError> {
        let (mut conn, name) = self.checkout(key).await?;
        let () = match ttl {
            Some(ttl) => conn.set_ex(&name, value, expire_secs(ttl)).await,
            None => conn.set(&name, value).await,
        }
        .map_err(backend)?;
        Ok(())
    }
}


#[cfg(all(test, feature = "integration"))]
mod integration_tests {
    use super::*;

    fn test_config() -> RedisConfig {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into());
        RedisConfig::new(url).with_prefix(format!("smsgate-test-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn store_conformance() {
        let config = test_config();
        let store = RedisStateStore::new(&config).expect("pool creation should succeed");
        smsgate_state::testing::run_store_conformance_tests(&store)
            .await
            .expect("conformance tests should pass");
    }

    #[tokio::test]
    async fn entry_expires_on_server() {
        let config = test_config();
        let store = RedisStateStore::new(&config).expect("pool creation should succeed");
        let key = StateKey::token("hm", "expiring");

        store
            .set(&key, "tok", Some(Duration::from_secs(1)))
            .await
            .unwrap();
        assert_eq!(store.get(&key).await.unwrap().as_deref(), Some("tok"));

        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert!(store.get(&key).await.unwrap().is_none());
    }
}
