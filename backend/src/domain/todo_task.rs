//! Todo task entity.

use chrono::{DateTime, Utc};

use super::{ListId, TaskId, UserId};

/// Unit of work inside a list.
///
/// `order` is the task's display rank among its siblings. Ranks need not be
/// contiguous and may collide; see [`crate::domain::ordering`] for how ties
/// are broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTask {
    pub user_id: UserId,
    pub list_id: ListId,
    pub task_id: TaskId,
    pub description: String,
    pub completed: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
