//! Todo task domain service.
//!
//! Every operation first resolves the ownership chain `user → list` so a
//! missing parent yields not-found before storage is touched. Rank
//! assignment and reordering are delegated to the repository, which runs
//! them inside the list's ordering critical section.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};

use crate::domain::ordering::OrderAssignments;
use crate::domain::patch::{is_blank, meaningful};
use crate::domain::ports::{
    CreateTodoTaskRequest, TaskFilter, TaskOrder, TaskPatch, TodoListRepository,
    TodoTaskPersistenceError, TodoTaskRepository, TodoTasksCommand, TodoTasksQuery,
    UpdateTodoTaskRequest, UserRepository,
};
use crate::domain::todo_list_service::require_list;
use crate::domain::{Error, ListId, TaskId, TodoTask, UserId};

fn task_not_found(task_id: &TaskId) -> Error {
    Error::not_found(format!("Task with ID {task_id} not found"))
}

fn map_task_repository_error(error: TodoTaskPersistenceError) -> Error {
    match error {
        TodoTaskPersistenceError::Connection { message } => {
            Error::internal(format!("todo task repository unavailable: {message}"))
        }
        TodoTaskPersistenceError::Query { message } => {
            Error::internal(format!("todo task repository error: {message}"))
        }
        TodoTaskPersistenceError::MissingList { list_id } => {
            Error::not_found(format!("List with ID {list_id} not found"))
        }
    }
}

/// Task service implementing [`TodoTasksQuery`] and [`TodoTasksCommand`].
#[derive(Clone)]
pub struct TodoTaskService<T, L, U> {
    tasks: Arc<T>,
    lists: Arc<L>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<T, L, U> TodoTaskService<T, L, U> {
    /// Create a service over the task, list, and user repositories.
    pub fn new(tasks: Arc<T>, lists: Arc<L>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            tasks,
            lists,
            users,
            clock,
        }
    }
}

impl<T, L, U> TodoTaskService<T, L, U>
where
    T: TodoTaskRepository,
    L: TodoListRepository,
    U: UserRepository,
{
    async fn require_parent(&self, user_id: &UserId, list_id: &ListId) -> Result<(), Error> {
        require_list(self.users.as_ref(), self.lists.as_ref(), user_id, list_id)
            .await
            .map(|_| ())
    }

    async fn require_task(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<TodoTask, Error> {
        self.tasks
            .find(user_id, list_id, task_id)
            .await
            .map_err(map_task_repository_error)?
            .ok_or_else(|| task_not_found(task_id))
    }
}

#[async_trait]
impl<T, L, U> TodoTasksQuery for TodoTaskService<T, L, U>
where
    T: TodoTaskRepository,
    L: TodoListRepository,
    U: UserRepository,
{
    async fn list_tasks(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        filter: TaskFilter,
        page: PageRequest,
    ) -> Result<Page<TodoTask>, Error> {
        self.require_parent(user_id, list_id).await?;
        self.tasks
            .list(user_id, list_id, filter, page)
            .await
            .map_err(map_task_repository_error)
    }

    async fn get_task(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<TodoTask, Error> {
        self.require_parent(user_id, list_id).await?;
        self.require_task(user_id, list_id, task_id).await
    }
}

#[async_trait]
impl<T, L, U> TodoTasksCommand for TodoTaskService<T, L, U>
where
    T: TodoTaskRepository,
    L: TodoListRepository,
    U: UserRepository,
{
    async fn create_task(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        request: CreateTodoTaskRequest,
    ) -> Result<TodoTask, Error> {
        self.require_parent(user_id, list_id).await?;
        if is_blank(&request.description) {
            return Err(Error::validation(["Task description is required"]));
        }

        let now = self.clock.utc();
        let draft = TodoTask {
            user_id: user_id.clone(),
            list_id: list_id.clone(),
            task_id: TaskId::random(),
            description: request.description,
            completed: request.completed.unwrap_or(false),
            // Replaced by the repository with the final rank.
            order: 0,
            created_at: now,
            updated_at: now,
        };
        self.tasks
            .create(draft, request.order)
            .await
            .map_err(map_task_repository_error)
    }

    async fn update_task(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
        request: UpdateTodoTaskRequest,
    ) -> Result<TodoTask, Error> {
        self.require_parent(user_id, list_id).await?;
        let patch = TaskPatch {
            description: meaningful(request.description),
            completed: request.completed,
            order: request.order,
            updated_at: self.clock.utc(),
        };

        self.tasks
            .update(user_id, list_id, task_id, &patch)
            .await
            .map_err(map_task_repository_error)?
            .ok_or_else(|| task_not_found(task_id))
    }

    async fn delete_task(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<(), Error> {
        self.require_parent(user_id, list_id).await?;
        self.require_task(user_id, list_id, task_id).await?;
        self.tasks
            .delete(user_id, list_id, task_id)
            .await
            .map_err(map_task_repository_error)
    }

    async fn reorder_tasks(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        orders: Vec<TaskOrder>,
    ) -> Result<Vec<TodoTask>, Error> {
        let assignments =
            OrderAssignments::new(orders.into_iter().map(|entry| (entry.task_id, entry.order)))
                .map_err(|err| Error::validation([err.to_string()]))?;
        self.require_parent(user_id, list_id).await?;
        self.tasks
            .reorder(user_id, list_id, &assignments, self.clock.utc())
            .await
            .map_err(map_task_repository_error)
    }
}

#[cfg(test)]
#[path = "todo_task_service_tests.rs"]
mod tests;
