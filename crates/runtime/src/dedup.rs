//! Short-lived set of occurrence keys.
//!
//! Hosts may deliver the same occurrence more than once in quick succession,
//! e.g. a death fired by two damage sources in the same tick. The window
//! admits a key once, then forgets it after a fixed delay so an unrelated
//! later occurrence with an equal key is not suppressed.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashSet;
use tokio::runtime::Handle;
use tracing::trace;

use crate::error::{Result, RuntimeError};

/// Concurrent at-most-once gate with delayed self-eviction.
///
/// Claims are a single insert into a sharded concurrent set, so callers on any
/// thread can race on the same key without extra locking. Releases run as
/// detached tasks on the tokio runtime captured at construction; the claiming
/// thread does not wait for them.
pub struct DeduplicationWindow<K> {
    entries: Arc<DashSet<K>>,
    scheduler: Handle,
    release_delay: Duration,
}

impl<K> DeduplicationWindow<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    pub fn new(scheduler: Handle, release_delay: Duration) -> Self {
        Self {
            entries: Arc::new(DashSet::new()),
            scheduler,
            release_delay,
        }
    }

    /// Creates a window scheduling releases on the current tokio runtime.
    pub fn from_current(release_delay: Duration) -> Result<Self> {
        let scheduler = Handle::try_current().map_err(RuntimeError::NoScheduler)?;
        Ok(Self::new(scheduler, release_delay))
    }

    /// Inserts `id`, returning true if it was not already present.
    ///
    /// Does not schedule a release; see [`claim`](Self::claim).
    pub fn try_claim(&self, id: K) -> bool {
        self.entries.insert(id)
    }

    /// Removes `id` once `delay` has elapsed.
    pub fn schedule_release(&self, id: K, delay: Duration) {
        let entries = Arc::clone(&self.entries);
        self.scheduler.spawn(async move {
            tokio::time::sleep(delay).await;
            entries.remove(&id);
            trace!(target: "runtime::dedup", key = ?id, "released");
        });
    }

    /// Claims `id` and, when the claim succeeds, schedules its release after
    /// the window's configured delay.
    pub fn claim(&self, id: K) -> bool {
        if !self.try_claim(id.clone()) {
            return false;
        }
        self.schedule_release(id, self.release_delay);
        true
    }

    pub fn contains(&self, id: &K) -> bool {
        self.entries.contains(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
