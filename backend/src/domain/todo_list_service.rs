//! Todo list domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};

use crate::domain::patch::{apply_optional_text, apply_text, is_blank, meaningful};
use crate::domain::ports::{
    CreateTodoListRequest, TodoListPersistenceError, TodoListRepository, TodoListsCommand,
    TodoListsQuery, UpdateTodoListRequest, UserRepository,
};
use crate::domain::user_service::{map_user_repository_error, user_not_found};
use crate::domain::{Error, ListId, TodoList, UserId};

/// Not-found error for a missing list.
pub(crate) fn list_not_found(list_id: &ListId) -> Error {
    Error::not_found(format!("List with ID {list_id} not found"))
}

/// Map list repository failures onto domain errors.
pub(crate) fn map_list_repository_error(error: TodoListPersistenceError) -> Error {
    match error {
        TodoListPersistenceError::Connection { message } => {
            Error::internal(format!("todo list repository unavailable: {message}"))
        }
        TodoListPersistenceError::Query { message } => {
            Error::internal(format!("todo list repository error: {message}"))
        }
    }
}

/// Resolve the ownership chain `user → list`, failing with not-found at the
/// first missing link.
pub(crate) async fn require_list<U, L>(
    users: &U,
    lists: &L,
    user_id: &UserId,
    list_id: &ListId,
) -> Result<TodoList, Error>
where
    U: UserRepository + ?Sized,
    L: TodoListRepository + ?Sized,
{
    require_user(users, user_id).await?;
    lists
        .find(user_id, list_id)
        .await
        .map_err(map_list_repository_error)?
        .ok_or_else(|| list_not_found(list_id))
}

async fn require_user<U>(users: &U, user_id: &UserId) -> Result<(), Error>
where
    U: UserRepository + ?Sized,
{
    users
        .find_by_id(user_id)
        .await
        .map_err(map_user_repository_error)?
        .map(|_| ())
        .ok_or_else(|| user_not_found(user_id))
}

/// List service implementing [`TodoListsQuery`] and [`TodoListsCommand`].
#[derive(Clone)]
pub struct TodoListService<L, U> {
    lists: Arc<L>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<L, U> TodoListService<L, U> {
    /// Create a service over the list and user repositories.
    pub fn new(lists: Arc<L>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            lists,
            users,
            clock,
        }
    }
}

#[async_trait]
impl<L, U> TodoListsQuery for TodoListService<L, U>
where
    L: TodoListRepository,
    U: UserRepository,
{
    async fn list_lists(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<TodoList>, Error> {
        require_user(self.users.as_ref(), user_id).await?;
        self.lists
            .list_for_user(user_id, page)
            .await
            .map_err(map_list_repository_error)
    }

    async fn get_list(&self, user_id: &UserId, list_id: &ListId) -> Result<TodoList, Error> {
        require_list(self.users.as_ref(), self.lists.as_ref(), user_id, list_id).await
    }
}

#[async_trait]
impl<L, U> TodoListsCommand for TodoListService<L, U>
where
    L: TodoListRepository,
    U: UserRepository,
{
    async fn create_list(
        &self,
        user_id: &UserId,
        request: CreateTodoListRequest,
    ) -> Result<TodoList, Error> {
        require_user(self.users.as_ref(), user_id).await?;
        if is_blank(&request.name) {
            return Err(Error::validation(["List name is required"]));
        }

        let now = self.clock.utc();
        let list = TodoList {
            user_id: user_id.clone(),
            list_id: ListId::random(),
            name: request.name,
            description: meaningful(request.description),
            created_at: now,
            updated_at: now,
        };
        self.lists
            .insert(&list)
            .await
            .map_err(map_list_repository_error)?;
        Ok(list)
    }

    async fn update_list(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        request: UpdateTodoListRequest,
    ) -> Result<TodoList, Error> {
        let mut list =
            require_list(self.users.as_ref(), self.lists.as_ref(), user_id, list_id).await?;

        apply_text(&mut list.name, request.name);
        apply_optional_text(&mut list.description, request.description);
        list.updated_at = self.clock.utc();

        self.lists
            .update(&list)
            .await
            .map_err(map_list_repository_error)?;
        Ok(list)
    }

    async fn delete_list(&self, user_id: &UserId, list_id: &ListId) -> Result<(), Error> {
        require_list(self.users.as_ref(), self.lists.as_ref(), user_id, list_id).await?;
        self.lists
            .delete(user_id, list_id)
            .await
            .map_err(map_list_repository_error)
    }
}

#[cfg(test)]
#[path = "todo_list_service_tests.rs"]
mod tests;
