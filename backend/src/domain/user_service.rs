//! User domain service.
//!
//! Implements the user driving ports over a [`UserRepository`]. Email
//! uniqueness is checked here for a readable conflict and again by the
//! repository, which is authoritative under concurrent writes.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};

use crate::domain::patch::{apply_text, is_blank, meaningful};
use crate::domain::ports::{
    CreateUserRequest, UpdateUserRequest, UserPersistenceError, UserRepository, UsersCommand,
    UsersQuery,
};
use crate::domain::{Error, User, UserId};

const DUPLICATE_EMAIL: &str = "User with this email already exists";

/// Not-found error for a missing user.
pub(crate) fn user_not_found(user_id: &UserId) -> Error {
    Error::not_found(format!("User with ID {user_id} not found"))
}

/// Map user repository failures onto domain errors.
pub(crate) fn map_user_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict(DUPLICATE_EMAIL),
    }
}

/// User service implementing [`UsersQuery`] and [`UsersCommand`].
#[derive(Clone)]
pub struct UserService<R> {
    users: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UserService<R> {
    /// Create a service over the given repository.
    pub fn new(users: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    async fn require_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| user_not_found(user_id))
    }

    /// Fail with a conflict when a user other than `owner` holds `email`.
    async fn ensure_email_free(&self, email: &str, owner: Option<&UserId>) -> Result<(), Error> {
        let holder = self
            .users
            .find_by_email(email)
            .await
            .map_err(map_user_repository_error)?;
        match holder {
            Some(existing) if Some(&existing.id) != owner => Err(Error::conflict(DUPLICATE_EMAIL)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self, page: PageRequest) -> Result<Page<User>, Error> {
        self.users
            .list(page)
            .await
            .map_err(map_user_repository_error)
    }

    async fn get_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.require_user(user_id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, Error> {
        if is_blank(email) {
            return Err(Error::validation(["Email is required"]));
        }
        let email = email.trim();
        self.users
            .find_by_email(email)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("User with email {email} not found")))
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error> {
        let mut problems = Vec::new();
        if is_blank(&request.username) {
            problems.push("Username is required");
        }
        if is_blank(&request.email) {
            problems.push("Email is required");
        }
        if !problems.is_empty() {
            return Err(Error::validation(problems));
        }

        let email = request.email.trim().to_owned();
        self.ensure_email_free(&email, None).await?;

        let user = User {
            id: UserId::random(),
            username: request.username.trim().to_owned(),
            email,
            created_at: self.clock.utc(),
        };
        self.users
            .insert(&user)
            .await
            .map_err(map_user_repository_error)?;
        Ok(user)
    }

    async fn update_user(
        &self,
        user_id: &UserId,
        request: UpdateUserRequest,
    ) -> Result<User, Error> {
        let mut user = self.require_user(user_id).await?;

        if let Some(email) = meaningful(request.email) {
            let email = email.trim().to_owned();
            if !user.has_email(&email) {
                self.ensure_email_free(&email, Some(user_id)).await?;
            }
            user.email = email;
        }
        apply_text(&mut user.username, request.username.map(|name| name.trim().to_owned()));

        self.users
            .update(&user)
            .await
            .map_err(map_user_repository_error)?;
        Ok(user)
    }

    async fn delete_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.require_user(user_id).await?;
        self.users
            .delete(user_id)
            .await
            .map_err(map_user_repository_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
