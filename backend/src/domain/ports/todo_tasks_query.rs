//! Driving port for reading todo tasks.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, ListId, TaskId, TodoTask, UserId};

use super::TaskFilter;

/// Domain use-case port for task lookups.
#[async_trait]
pub trait TodoTasksQuery: Send + Sync {
    /// Page through a list's tasks in display order.
    async fn list_tasks(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        filter: TaskFilter,
        page: PageRequest,
    ) -> Result<Page<TodoTask>, Error>;

    /// Fetch one task.
    async fn get_task(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<TodoTask, Error>;
}
