//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`, so they depend on
//! the driving ports only and stay testable without storage.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    TodoListRepository, TodoListsCommand, TodoListsQuery, TodoTaskRepository, TodoTasksCommand,
    TodoTasksQuery, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{TodoListService, TodoTaskService, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User reads.
    pub users: Arc<dyn UsersQuery>,
    /// User writes.
    pub users_command: Arc<dyn UsersCommand>,
    /// Todo list reads.
    pub lists: Arc<dyn TodoListsQuery>,
    /// Todo list writes.
    pub lists_command: Arc<dyn TodoListsCommand>,
    /// Task reads.
    pub tasks: Arc<dyn TodoTasksQuery>,
    /// Task writes, including reorder batches.
    pub tasks_command: Arc<dyn TodoTasksCommand>,
}

impl HttpState {
    /// Wire the domain services over one set of repositories.
    ///
    /// The three repositories must share a backing store so ownership checks
    /// and cascades see the same data.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use todo_backend::inbound::http::state::HttpState;
    /// use todo_backend::outbound::memory::{
    ///     InMemoryStore, InMemoryTodoListRepository, InMemoryTodoTaskRepository,
    ///     InMemoryUserRepository,
    /// };
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_repositories(
    ///     Arc::new(InMemoryUserRepository::new(Arc::clone(&store))),
    ///     Arc::new(InMemoryTodoListRepository::new(Arc::clone(&store))),
    ///     Arc::new(InMemoryTodoTaskRepository::new(store)),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = state;
    /// ```
    pub fn from_repositories<U, L, T>(
        users: Arc<U>,
        lists: Arc<L>,
        tasks: Arc<T>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        L: TodoListRepository + 'static,
        T: TodoTaskRepository + 'static,
    {
        let user_service = Arc::new(UserService::new(Arc::clone(&users), Arc::clone(&clock)));
        let list_service = Arc::new(TodoListService::new(
            Arc::clone(&lists),
            Arc::clone(&users),
            Arc::clone(&clock),
        ));
        let task_service = Arc::new(TodoTaskService::new(tasks, lists, users, clock));

        Self {
            users: user_service.clone(),
            users_command: user_service,
            lists: list_service.clone(),
            lists_command: list_service,
            tasks: task_service.clone(),
            tasks_command: task_service,
        }
    }
}
