use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use smsgate_state::error::StateError;
use smsgate_state::key::StateKey;
use smsgate_state::store::StateStore;

struct Slot {
    value: String,
    deadline: Option<Instant>,
}

impl Slot {
    fn live_at(&self, now: Instant) -> bool {
        self.deadline.is_none_or(|deadline| now < deadline)
    }
}

/// Process-local token store.
///
/// Expired slots are dropped when next touched. Deadlines come from the tokio
/// clock, so a paused runtime controls expiry in tests.
#[derive(Default)]
pub struct MemoryStateStore {
    slots: DashMap<String, Slot>,
}

impl std::fmt::Debug for MemoryStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStateStore")
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of unexpired entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.slots.iter().filter(|slot| slot.live_at(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, key: &StateKey) -> Result<Option<String>, StateError> {
        let name = key.canonical();
        let now = Instant::now();

        let value = match self.slots.get(&name) {
            Some(slot) if slot.live_at(now) => return Ok(Some(slot.value.clone())),
            Some(_) => None,
            None => return Ok(None),
        };
        self.slots.remove_if(&name, |_, slot| !slot.live_at(now));
        Ok(value)
    }

    async fn set(
        &self,
        key: &StateKey,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), StateError> {
        let slot = Slot {
            value: value.to_owned(),
            deadline: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.slots.insert(key.canonical(), slot);
        Ok(())
    }
}
