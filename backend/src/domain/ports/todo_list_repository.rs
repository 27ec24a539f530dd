//! Port abstraction for todo list persistence adapters and their errors.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{ListId, TodoList, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by todo list repository adapters.
    pub enum TodoListPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "todo list repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "todo list repository query failed: {message}",
    }
}

/// Storage for todo lists, scoped by owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoListRepository: Send + Sync {
    /// Page through one user's lists ordered by creation time.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<TodoList>, TodoListPersistenceError>;

    /// Fetch one list.
    async fn find(
        &self,
        user_id: &UserId,
        list_id: &ListId,
    ) -> Result<Option<TodoList>, TodoListPersistenceError>;

    /// Insert a new list.
    async fn insert(&self, list: &TodoList) -> Result<(), TodoListPersistenceError>;

    /// Overwrite a stored list.
    async fn update(&self, list: &TodoList) -> Result<(), TodoListPersistenceError>;

    /// Remove a list together with its tasks.
    async fn delete(&self, user_id: &UserId, list_id: &ListId)
    -> Result<(), TodoListPersistenceError>;
}
