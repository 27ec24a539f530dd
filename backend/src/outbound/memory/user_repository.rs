//! In-memory user repository.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

use super::InMemoryStore;

/// [`UserRepository`] over an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    /// Create a repository over a shared store.
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

fn email_taken<'a>(
    mut users: impl Iterator<Item = &'a User>,
    email: &str,
    except: &UserId,
) -> bool {
    users.any(|user| &user.id != except && user.has_email(email))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self, page: PageRequest) -> Result<Page<User>, UserPersistenceError> {
        let mut users: Vec<User> = self.store.users.read().values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(page.slice(users))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.store.users.read().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .store
            .users
            .read()
            .values()
            .find(|user| user.has_email(email))
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.store.users.write();
        if email_taken(users.values(), &user.email, &user.id) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_str()));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.store.users.write();
        if email_taken(users.values(), &user.email, &user.id) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_str()));
        }
        if let Some(slot) = users.get_mut(&user.id) {
            *slot = user.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        self.store.remove_user(id);
        Ok(())
    }
}
