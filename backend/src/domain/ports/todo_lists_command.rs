//! Driving port for creating, updating, and deleting todo lists.

use async_trait::async_trait;

use crate::domain::{Error, ListId, TodoList, UserId};

/// Payload for creating a list. `name` must not be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTodoListRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Patch for an existing list. Absent or blank fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTodoListRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Domain use-case port for list mutations.
#[async_trait]
pub trait TodoListsCommand: Send + Sync {
    /// Create a list under an existing user.
    async fn create_list(
        &self,
        user_id: &UserId,
        request: CreateTodoListRequest,
    ) -> Result<TodoList, Error>;

    /// Apply a patch to a list.
    async fn update_list(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        request: UpdateTodoListRequest,
    ) -> Result<TodoList, Error>;

    /// Delete a list along with its tasks.
    async fn delete_list(&self, user_id: &UserId, list_id: &ListId) -> Result<(), Error>;
}
