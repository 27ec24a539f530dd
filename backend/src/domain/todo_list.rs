//! Todo list entity.

use chrono::{DateTime, Utc};

use super::{ListId, UserId};

/// Named collection of tasks owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    pub user_id: UserId,
    pub list_id: ListId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
