//! Driving port for reading todo lists.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, ListId, TodoList, UserId};

/// Domain use-case port for list lookups.
#[async_trait]
pub trait TodoListsQuery: Send + Sync {
    /// Page through the lists owned by `user_id`.
    async fn list_lists(&self, user_id: &UserId, page: PageRequest)
    -> Result<Page<TodoList>, Error>;

    /// Fetch one list.
    async fn get_list(&self, user_id: &UserId, list_id: &ListId) -> Result<TodoList, Error>;
}
