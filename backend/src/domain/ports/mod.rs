//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound storage adapters.
//! Driving ports (`*Query`, `*Command`) are implemented by the domain services
//! and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod todo_list_repository;
mod todo_lists_command;
mod todo_lists_query;
mod todo_task_repository;
mod todo_tasks_command;
mod todo_tasks_query;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use todo_list_repository::MockTodoListRepository;
pub use todo_list_repository::{TodoListPersistenceError, TodoListRepository};
pub use todo_lists_command::{CreateTodoListRequest, TodoListsCommand, UpdateTodoListRequest};
pub use todo_lists_query::TodoListsQuery;
#[cfg(test)]
pub use todo_task_repository::MockTodoTaskRepository;
pub use todo_task_repository::{
    TaskFilter, TaskPatch, TodoTaskPersistenceError, TodoTaskRepository,
};
pub use todo_tasks_command::{
    CreateTodoTaskRequest, TaskOrder, TodoTasksCommand, UpdateTodoTaskRequest,
};
pub use todo_tasks_query::TodoTasksQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_command::{CreateUserRequest, UpdateUserRequest, UsersCommand};
pub use users_query::UsersQuery;
