//! Driving port for creating, updating, and deleting users.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Payload for registering a user. Both fields are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
}

/// Patch for an existing user. Absent or blank fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Domain use-case port for user mutations.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a user with a server-generated identifier.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error>;

    /// Apply a patch to a user.
    async fn update_user(&self, user_id: &UserId, request: UpdateUserRequest)
    -> Result<User, Error>;

    /// Delete a user along with its lists and tasks.
    async fn delete_user(&self, user_id: &UserId) -> Result<(), Error>;
}
