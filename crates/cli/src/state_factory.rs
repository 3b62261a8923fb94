use std::sync::Arc;

use smsgate_state::StateStore;
use smsgate_state_memory::MemoryStateStore;
#[cfg(feature = "redis")]
use smsgate_state_redis::{RedisConfig, RedisStateStore};

use crate::config::StateConfig;
use crate::error::CliError;

/// Construct the token store described by `[state]`.
pub fn create_state(config: &StateConfig) -> Result<Arc<dyn StateStore>, CliError> {
    match config.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryStateStore::new())),
        #[cfg(feature = "redis")]
        "redis" => create_redis(config),
        other => Err(CliError::Config(format!(
            "unsupported state backend: {other} (is the feature enabled?)"
        ))),
    }
}

#[cfg(feature = "redis")]
fn create_redis(config: &StateConfig) -> Result<Arc<dyn StateStore>, CliError> {
    let url = config.url.as_deref().unwrap_or("redis://127.0.0.1:6379");
    let mut redis_config = RedisConfig::new(url);
    redis_config.prefix.clone_from(&config.prefix);
    Ok(Arc::new(RedisStateStore::new(&redis_config)?))
}
