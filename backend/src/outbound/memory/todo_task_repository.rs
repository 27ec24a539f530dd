//! In-memory todo task repository.
//!
//! A list's bucket write guard spans the whole read-max, assign, insert
//! sequence of `create` and the whole batch rewrite of `reorder`. Readers
//! take the bucket read guard, so they observe a reorder either before or
//! after the batch. Updates patch the stored task under the same write
//! guard, so they only touch the fields they name.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::ordering::{OrderAssignments, apply_reorder, resolve_order, sort_for_display};
use crate::domain::ports::{
    TaskFilter, TaskPatch, TodoTaskPersistenceError, TodoTaskRepository,
};
use crate::domain::{ListId, TaskId, TodoTask, UserId};

use super::{InMemoryStore, ListKey};

/// [`TodoTaskRepository`] over an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryTodoTaskRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryTodoTaskRepository {
    /// Create a repository over a shared store.
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TodoTaskRepository for InMemoryTodoTaskRepository {
    async fn list(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        filter: TaskFilter,
        page: PageRequest,
    ) -> Result<Page<TodoTask>, TodoTaskPersistenceError> {
        let Some(bucket) = self.store.bucket(&ListKey::new(user_id, list_id)) else {
            return Ok(page.slice(Vec::new()));
        };
        let mut tasks: Vec<TodoTask> = bucket
            .read()
            .values()
            .filter(|task| filter.completed.is_none_or(|wanted| task.completed == wanted))
            .cloned()
            .collect();
        sort_for_display(&mut tasks);
        Ok(page.slice(tasks))
    }

    async fn find(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<Option<TodoTask>, TodoTaskPersistenceError> {
        Ok(self
            .store
            .bucket(&ListKey::new(user_id, list_id))
            .and_then(|bucket| bucket.read().get(task_id).cloned()))
    }

    async fn create(
        &self,
        mut task: TodoTask,
        requested_order: Option<i32>,
    ) -> Result<TodoTask, TodoTaskPersistenceError> {
        let key = ListKey::new(&task.user_id, &task.list_id);
        self.store
            .write_live_bucket(&key, |tasks| {
                task.order = resolve_order(requested_order, || tasks.values().map(|t| t.order));
                tasks.insert(task.task_id.clone(), task.clone());
            })
            .ok_or_else(|| TodoTaskPersistenceError::missing_list(task.list_id.as_str()))?;
        Ok(task)
    }

    async fn update(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<Option<TodoTask>, TodoTaskPersistenceError> {
        let Some(bucket) = self.store.bucket(&ListKey::new(user_id, list_id)) else {
            return Ok(None);
        };
        let mut tasks = bucket.write();
        Ok(tasks.get_mut(task_id).map(|task| {
            patch.apply_to(task);
            task.clone()
        }))
    }

    async fn delete(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<(), TodoTaskPersistenceError> {
        if let Some(bucket) = self.store.bucket(&ListKey::new(user_id, list_id)) {
            bucket.write().remove(task_id);
        }
        Ok(())
    }

    async fn reorder(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        assignments: &OrderAssignments,
        at: DateTime<Utc>,
    ) -> Result<Vec<TodoTask>, TodoTaskPersistenceError> {
        let Some(bucket) = self.store.bucket(&ListKey::new(user_id, list_id)) else {
            return Ok(Vec::new());
        };
        let mut tasks = bucket.write();
        apply_reorder(tasks.values_mut(), assignments, at);
        let mut ordered: Vec<TodoTask> = tasks.values().cloned().collect();
        drop(tasks);
        sort_for_display(&mut ordered);
        Ok(ordered)
    }
}

#[cfg(test)]
#[path = "todo_task_repository_tests.rs"]
mod tests;
