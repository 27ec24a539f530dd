//! SQLite-backed `TodoListRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageRequest};

use crate::domain::ports::{TodoListPersistenceError, TodoListRepository};
use crate::domain::{ListId, TodoList, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error, sql_bound, sql_count};
use super::models::TodoListRow;
use super::pool::{DbPool, PoolError};
use super::schema::{todo_lists, todo_tasks};

/// Diesel-backed implementation of the [`TodoListRepository`] port.
#[derive(Clone)]
pub struct DieselTodoListRepository {
    pool: DbPool,
}

impl DieselTodoListRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> TodoListPersistenceError {
    map_pool_error(error, |message| TodoListPersistenceError::connection(message))
}

fn diesel_error(error: &DieselError) -> TodoListPersistenceError {
    map_diesel_error(
        error,
        |message| TodoListPersistenceError::query(message),
        |message| TodoListPersistenceError::connection(message),
    )
}

fn to_domain(row: TodoListRow) -> Result<TodoList, TodoListPersistenceError> {
    TodoList::try_from(row).map_err(|err| TodoListPersistenceError::query(err.to_string()))
}

#[async_trait]
impl TodoListRepository for DieselTodoListRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<TodoList>, TodoListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let total: i64 = todo_lists::table
            .filter(todo_lists::user_id.eq(user_id.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;
        let rows: Vec<TodoListRow> = todo_lists::table
            .filter(todo_lists::user_id.eq(user_id.as_str()))
            .order((todo_lists::created_at.asc(), todo_lists::list_id.asc()))
            .limit(sql_bound(page.limit()))
            .offset(sql_bound(page.offset()))
            .select(TodoListRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;

        let items = rows
            .into_iter()
            .map(to_domain)
            .collect::<Result<Vec<_>, _>>()?;
        let total = sql_count(total).map_err(|err| diesel_error(&err))?;
        Ok(page.page_of(items, total))
    }

    async fn find(
        &self,
        user_id: &UserId,
        list_id: &ListId,
    ) -> Result<Option<TodoList>, TodoListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        todo_lists::table
            .find((user_id.as_str(), list_id.as_str()))
            .select(TodoListRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?
            .map(to_domain)
            .transpose()
    }

    async fn insert(&self, list: &TodoList) -> Result<(), TodoListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(todo_lists::table)
            .values(TodoListRow::from(list))
            .execute(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;
        Ok(())
    }

    async fn update(&self, list: &TodoList) -> Result<(), TodoListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::update(todo_lists::table.find((list.user_id.as_str(), list.list_id.as_str())))
            .set((
                todo_lists::name.eq(&list.name),
                todo_lists::description.eq(list.description.as_deref()),
                todo_lists::updated_at.eq(list.updated_at.naive_utc()),
            ))
            .execute(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;
        Ok(())
    }

    async fn delete(
        &self,
        user_id: &UserId,
        list_id: &ListId,
    ) -> Result<(), TodoListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let (user_id, list_id) = (user_id.as_str(), list_id.as_str());

        conn.transaction::<_, DieselError, _>(|conn| {
            async move {
                diesel::delete(
                    todo_tasks::table
                        .filter(todo_tasks::user_id.eq(user_id))
                        .filter(todo_tasks::list_id.eq(list_id)),
                )
                .execute(conn)
                .await?;
                diesel::delete(todo_lists::table.find((user_id, list_id)))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| diesel_error(&err))
    }
}
