//! Domain entities, ordering rules, services, and ports.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failures.
//! - `User`, `TodoList`, `TodoTask` and their identifiers.
//! - `ordering`: rank assignment and reorder rules for tasks.
//! - `UserService`, `TodoListService`, `TodoTaskService`: driving-port
//!   implementations over the repository ports.

pub mod error;
mod ids;
pub mod ordering;
pub mod patch;
pub mod ports;
mod todo_list;
mod todo_list_service;
mod todo_task;
mod todo_task_service;
mod trace_id;
mod user;
mod user_service;

pub use self::error::{Error, ErrorCode, VALIDATION_PREFIX};
pub use self::ids::{IdValidationError, ListId, TaskId, UserId};
pub use self::todo_list::TodoList;
pub use self::todo_list_service::TodoListService;
pub use self::todo_task::TodoTask;
pub use self::todo_task_service::TodoTaskService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::User;
pub use self::user_service::UserService;
