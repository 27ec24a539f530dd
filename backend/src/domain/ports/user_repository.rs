//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds the email address.
        DuplicateEmail { email: String } => "user with email {email} already exists",
    }
}

/// Storage for users.
///
/// Deleting a user removes every list and task it owns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Page through users ordered by creation time.
    async fn list(&self, page: PageRequest) -> Result<Page<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by email, ignoring ASCII case.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new user, refusing an email another user holds.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Overwrite a stored user, refusing an email another user holds.
    async fn update(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Remove a user together with its lists and tasks.
    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError>;
}
