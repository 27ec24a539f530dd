//! Port abstraction for todo task persistence adapters and their errors.
//!
//! Adapters own the per-list critical section for ordering. `create` without
//! a requested order and `reorder` must not interleave their
//! read-modify-write sequences within one list, and a reader must see a
//! reorder batch either fully applied or not at all. Plain `update` and
//! `delete` calls only need single-record atomicity; `update` writes only the
//! fields its patch names, so it never reverts a concurrent reorder.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::ordering::OrderAssignments;
use crate::domain::patch::{apply_text, apply_value};
use crate::domain::{ListId, TaskId, TodoTask, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by todo task repository adapters.
    pub enum TodoTaskPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "todo task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "todo task repository query failed: {message}",
        /// The parent list disappeared before the task could be stored.
        MissingList { list_id: String } => "todo list {list_id} no longer exists",
    }
}

/// Filter applied when listing a list's tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Keep only tasks whose completion flag matches.
    pub completed: Option<bool>,
}

/// Field changes applied to a stored task.
///
/// `None` fields are left as stored. `description`, when present, is
/// already known to be non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPatch {
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub order: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl TaskPatch {
    /// Apply the named fields to `task` and stamp its modification time.
    pub fn apply_to(&self, task: &mut TodoTask) {
        apply_text(&mut task.description, self.description.clone());
        apply_value(&mut task.completed, self.completed);
        apply_value(&mut task.order, self.order);
        task.updated_at = self.updated_at;
    }
}

/// Storage for todo tasks, scoped by owner and list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoTaskRepository: Send + Sync {
    /// Page through a list's tasks in display order.
    async fn list(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        filter: TaskFilter,
        page: PageRequest,
    ) -> Result<Page<TodoTask>, TodoTaskPersistenceError>;

    /// Fetch one task.
    async fn find(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<Option<TodoTask>, TodoTaskPersistenceError>;

    /// Insert a new task and return it with its final order.
    ///
    /// `requested_order` is stored verbatim when present. Otherwise the task
    /// is ranked one past the list's current maximum, or `0` for an empty
    /// list, inside the list's ordering critical section.
    async fn create(
        &self,
        task: TodoTask,
        requested_order: Option<i32>,
    ) -> Result<TodoTask, TodoTaskPersistenceError>;

    /// Apply a patch to one stored task and return the result.
    ///
    /// The read and write happen as one step, so fields the patch leaves out
    /// keep whatever value is current at that moment. Returns `None` when the
    /// task does not exist.
    async fn update(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<Option<TodoTask>, TodoTaskPersistenceError>;

    /// Remove one task.
    async fn delete(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<(), TodoTaskPersistenceError>;

    /// Apply a batch of rank assignments atomically and return every task of
    /// the list in display order.
    ///
    /// Assignments naming tasks outside the list are ignored.
    async fn reorder(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        assignments: &OrderAssignments,
        at: DateTime<Utc>,
    ) -> Result<Vec<TodoTask>, TodoTaskPersistenceError>;
}
