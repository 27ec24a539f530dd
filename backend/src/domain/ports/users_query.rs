//! Driving port for reading users.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, User, UserId};

/// Domain use-case port for user lookups.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Page through all users.
    async fn list_users(&self, page: PageRequest) -> Result<Page<User>, Error>;

    /// Fetch one user, failing with not-found when absent.
    async fn get_user(&self, user_id: &UserId) -> Result<User, Error>;

    /// Find the user holding `email`, ignoring ASCII case.
    async fn find_user_by_email(&self, email: &str) -> Result<User, Error>;
}
