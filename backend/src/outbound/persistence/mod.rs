//! SQLite persistence adapters using Diesel ORM.
//!
//! The repositories implement the domain storage ports over a `bb8` pool of
//! `diesel-async` wrapped SQLite connections.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Validation lives in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Mapped errors**: Diesel and pool failures become the port's
//!   persistence error types, with driver detail logged at debug level.
//!
//! # Example
//!
//! ```ignore
//! use todo_backend::outbound::persistence::{
//!     DbPool, DieselUserRepository, PoolConfig, run_migrations,
//! };
//!
//! run_migrations("todo.db")?;
//! let pool = DbPool::new(PoolConfig::new("todo.db")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_todo_list_repository;
mod diesel_todo_task_repository;
mod diesel_user_repository;
mod error_mapping;
mod list_locks;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_todo_list_repository::DieselTodoListRepository;
pub use diesel_todo_task_repository::DieselTodoTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbConnection, DbPool, PoolConfig, PoolError};
