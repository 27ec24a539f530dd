//! In-memory repository adapters.
//!
//! All three repositories share one [`InMemoryStore`], built once at startup
//! and handed to each adapter. Tasks are bucketed per list; each bucket has
//! its own lock, and its write guard is the ordering critical section for
//! that list. Different lists never contend.
//!
//! Locks are always taken in the order users, lists, task buckets map,
//! single bucket.

mod todo_list_repository;
mod todo_task_repository;
mod user_repository;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{ListId, TaskId, TodoList, TodoTask, User, UserId};

pub use todo_list_repository::InMemoryTodoListRepository;
pub use todo_task_repository::InMemoryTodoTaskRepository;
pub use user_repository::InMemoryUserRepository;

/// Key of a list within the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ListKey {
    pub(crate) user_id: UserId,
    pub(crate) list_id: ListId,
}

impl ListKey {
    pub(crate) fn new(user_id: &UserId, list_id: &ListId) -> Self {
        Self {
            user_id: user_id.clone(),
            list_id: list_id.clone(),
        }
    }
}

/// Tasks of one list, guarded together.
pub(crate) type TaskBucket = RwLock<HashMap<TaskId, TodoTask>>;

/// Shared state behind the in-memory repositories.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    lists: RwLock<HashMap<ListKey, TodoList>>,
    tasks: RwLock<HashMap<ListKey, Arc<TaskBucket>>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Task bucket for a list, if any task was ever created in it.
    fn bucket(&self, key: &ListKey) -> Option<Arc<TaskBucket>> {
        self.tasks.read().get(key).cloned()
    }

    /// Task bucket for a list, creating it on first use.
    fn bucket_or_insert(&self, key: &ListKey) -> Arc<TaskBucket> {
        if let Some(bucket) = self.bucket(key) {
            return bucket;
        }
        Arc::clone(self.tasks.write().entry(key.clone()).or_default())
    }

    /// Run `write` against a list's tasks under the bucket write guard.
    ///
    /// The list read guard is held throughout, so a concurrent list or user
    /// removal either happens first, making this return `None`, or waits
    /// until the write is done and then drops the bucket with its new
    /// contents.
    fn write_live_bucket<R>(
        &self,
        key: &ListKey,
        write: impl FnOnce(&mut HashMap<TaskId, TodoTask>) -> R,
    ) -> Option<R> {
        let lists = self.lists.read();
        if !lists.contains_key(key) {
            return None;
        }
        let bucket = self.bucket_or_insert(key);
        let mut tasks = bucket.write();
        let outcome = write(&mut tasks);
        drop(tasks);
        drop(lists);
        Some(outcome)
    }

    /// Remove a list and its tasks.
    fn remove_list(&self, key: &ListKey) {
        self.lists.write().remove(key);
        self.tasks.write().remove(key);
    }

    /// Remove a user, its lists, and their tasks.
    fn remove_user(&self, user_id: &UserId) {
        let mut users = self.users.write();
        let mut lists = self.lists.write();
        let mut tasks = self.tasks.write();
        users.remove(user_id);
        lists.retain(|key, _| &key.user_id != user_id);
        tasks.retain(|key, _| &key.user_id != user_id);
    }
}

#[cfg(test)]
impl InMemoryStore {
    /// Register an empty list so tasks can be stored under `key`.
    fn seed_list(&self, key: &ListKey) {
        let now = chrono::Utc::now();
        self.lists.write().insert(
            key.clone(),
            TodoList {
                user_id: key.user_id.clone(),
                list_id: key.list_id.clone(),
                name: "Groceries".to_owned(),
                description: None,
                created_at: now,
                updated_at: now,
            },
        );
    }
}
