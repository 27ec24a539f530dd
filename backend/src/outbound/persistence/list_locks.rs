//! Per-list ordering locks for the SQLite task repository.
//!
//! SQLite transactions alone do not stop two deferred transactions from both
//! reading the same maximum rank. Holding the list's lock around the
//! transaction serialises rank assignment and reorder batches within one
//! list while leaving other lists free.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::{ListId, UserId};

type LockKey = (UserId, ListId);

/// Registry of async locks keyed by list.
#[derive(Debug, Default)]
pub(crate) struct ListLocks {
    locks: Mutex<HashMap<LockKey, Arc<AsyncMutex<()>>>>,
}

impl ListLocks {
    /// Wait for exclusive access to the ordering of one list.
    ///
    /// Entries nobody holds or waits on are pruned on each call.
    pub(crate) async fn acquire(&self, user_id: &UserId, list_id: &ListId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(
                locks
                    .entry((user_id.clone(), list_id.clone()))
                    .or_default(),
            )
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().len()
    }
}
