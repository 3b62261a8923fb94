//! Behavior every [`StateStore`] backend must share.
//!
//! Backends call [`run_store_conformance_tests`] from their own test module
//! with a fresh store. Expiry itself is clock-dependent and is tested per
//! backend.

use std::time::Duration;

use crate::error::StateError;
use crate::key::{KeyKind, StateKey};
use crate::store::StateStore;

/// Run the conformance suite against `store`.
///
/// Assertion failures panic; backend errors are returned.
pub async fn run_store_conformance_tests(store: &dyn StateStore) -> Result<(), StateError> {
    missing_key_reads_none(store).await?;
    written_value_reads_back(store).await?;
    rewrite_replaces_value(store).await?;
    value_with_ttl_is_readable(store).await?;
    channels_do_not_collide(store).await?;
    kinds_do_not_collide(store).await?;
    Ok(())
}

async fn missing_key_reads_none(store: &dyn StateStore) -> Result<(), StateError> {
    let got = store.get(&StateKey::token("conf", "never-written")).await?;
    assert!(got.is_none(), "unwritten key must read as None");
    Ok(())
}

async fn written_value_reads_back(store: &dyn StateStore) -> Result<(), StateError> {
    let key = StateKey::token("conf", "roundtrip");
    store.set(&key, "abc", None).await?;
    assert_eq!(store.get(&key).await?.as_deref(), Some("abc"));
    Ok(())
}

async fn rewrite_replaces_value(store: &dyn StateStore) -> Result<(), StateError> {
    let key = StateKey::token("conf", "rewrite");
    store.set(&key, "stale", Some(Duration::from_secs(60))).await?;
    store.set(&key, "fresh", None).await?;
    assert_eq!(
        store.get(&key).await?.as_deref(),
        Some("fresh"),
        "second write must replace the first"
    );
    Ok(())
}

async fn value_with_ttl_is_readable(store: &dyn StateStore) -> Result<(), StateError> {
    let key = StateKey::token("conf", "ttl");
    store.set(&key, "abc", Some(Duration::from_secs(5340))).await?;
    assert_eq!(store.get(&key).await?.as_deref(), Some("abc"));
    Ok(())
}

async fn channels_do_not_collide(store: &dyn StateStore) -> Result<(), StateError> {
    let first = StateKey::token("conf", "channel-a");
    let second = StateKey::token("conf", "channel-b");
    store.set(&first, "token-a", None).await?;
    assert!(
        store.get(&second).await?.is_none(),
        "a token stored for one channel must not be visible to another"
    );
    Ok(())
}

async fn kinds_do_not_collide(store: &dyn StateStore) -> Result<(), StateError> {
    let token = StateKey::token("conf", "same-id");
    let other = StateKey::new("conf", KeyKind::Custom("other".into()), "same-id");
    store.set(&token, "token", None).await?;
    assert!(store.get(&other).await?.is_none());
    Ok(())
}
