//! User entity.

use chrono::{DateTime, Utc};

use super::UserId;

/// Registered user owning todo lists.
///
/// Email addresses are unique across users, compared without regard to
/// ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this user's email matches `email` ignoring ASCII case.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}
