//! Driving port for creating, updating, deleting, and reordering tasks.

use async_trait::async_trait;

use crate::domain::{Error, ListId, TaskId, TodoTask, UserId};

/// Payload for creating a task.
///
/// `completed` defaults to `false`. Without an `order` the task is appended
/// after the list's current last task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTodoTaskRequest {
    pub description: String,
    pub completed: Option<bool>,
    pub order: Option<i32>,
}

/// Patch for an existing task.
///
/// A blank description is ignored; `completed` and `order` apply whenever
/// present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTodoTaskRequest {
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub order: Option<i32>,
}

/// One entry of a reorder batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOrder {
    pub task_id: TaskId,
    pub order: i32,
}

/// Domain use-case port for task mutations.
#[async_trait]
pub trait TodoTasksCommand: Send + Sync {
    /// Create a task in an existing list.
    async fn create_task(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        request: CreateTodoTaskRequest,
    ) -> Result<TodoTask, Error>;

    /// Apply a patch to a task.
    async fn update_task(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
        request: UpdateTodoTaskRequest,
    ) -> Result<TodoTask, Error>;

    /// Delete one task.
    async fn delete_task(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<(), Error>;

    /// Rewrite the order of several tasks at once and return the whole list
    /// in display order.
    async fn reorder_tasks(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        orders: Vec<TaskOrder>,
    ) -> Result<Vec<TodoTask>, Error>;
}
