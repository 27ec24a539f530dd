//! In-memory todo list repository.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{TodoListPersistenceError, TodoListRepository};
use crate::domain::{ListId, TodoList, UserId};

use super::{InMemoryStore, ListKey};

/// [`TodoListRepository`] over an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryTodoListRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryTodoListRepository {
    /// Create a repository over a shared store.
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TodoListRepository for InMemoryTodoListRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<TodoList>, TodoListPersistenceError> {
        let mut lists: Vec<TodoList> = self
            .store
            .lists
            .read()
            .iter()
            .filter(|(key, _)| &key.user_id == user_id)
            .map(|(_, list)| list.clone())
            .collect();
        lists.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.list_id.cmp(&b.list_id))
        });
        Ok(page.slice(lists))
    }

    async fn find(
        &self,
        user_id: &UserId,
        list_id: &ListId,
    ) -> Result<Option<TodoList>, TodoListPersistenceError> {
        Ok(self
            .store
            .lists
            .read()
            .get(&ListKey::new(user_id, list_id))
            .cloned())
    }

    async fn insert(&self, list: &TodoList) -> Result<(), TodoListPersistenceError> {
        self.store
            .lists
            .write()
            .insert(ListKey::new(&list.user_id, &list.list_id), list.clone());
        Ok(())
    }

    async fn update(&self, list: &TodoList) -> Result<(), TodoListPersistenceError> {
        let key = ListKey::new(&list.user_id, &list.list_id);
        if let Some(slot) = self.store.lists.write().get_mut(&key) {
            *slot = list.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        user_id: &UserId,
        list_id: &ListId,
    ) -> Result<(), TodoListPersistenceError> {
        self.store.remove_list(&ListKey::new(user_id, list_id));
        Ok(())
    }
}
