//! SQLite-backed `UserRepository` implementation using Diesel ORM.
//!
//! The `email` column uses `COLLATE NOCASE` with a unique index, so both
//! lookups and the uniqueness guarantee ignore ASCII case.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageRequest};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

use super::error_mapping::{
    is_unique_violation, map_diesel_error, map_pool_error, sql_bound, sql_count,
};
use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::{todo_lists, todo_tasks, users};

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, |message| UserPersistenceError::connection(message))
}

fn diesel_error(error: &DieselError) -> UserPersistenceError {
    map_diesel_error(
        error,
        |message| UserPersistenceError::query(message),
        |message| UserPersistenceError::connection(message),
    )
}

fn write_error(error: &DieselError, email: &str) -> UserPersistenceError {
    if is_unique_violation(error) {
        UserPersistenceError::duplicate_email(email)
    } else {
        diesel_error(error)
    }
}

fn to_domain(row: UserRow) -> Result<User, UserPersistenceError> {
    User::try_from(row).map_err(|err| UserPersistenceError::query(err.to_string()))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self, page: PageRequest) -> Result<Page<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let total: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;
        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::user_id.asc()))
            .limit(sql_bound(page.limit()))
            .offset(sql_bound(page.offset()))
            .select(UserRow::as_select())
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

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        users::table
            .find(id.as_str())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        users::table
            .filter(users::email.eq(email.trim()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?
            .map(to_domain)
            .transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(users::table)
            .values(UserRow::from(user))
            .execute(&mut conn)
            .await
            .map_err(|err| write_error(&err, &user.email))?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::update(users::table.find(user.id.as_str()))
            .set((
                users::username.eq(&user.username),
                users::email.eq(&user.email),
            ))
            .execute(&mut conn)
            .await
            .map_err(|err| write_error(&err, &user.email))?;
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let user_id = id.as_str();

        conn.transaction::<_, DieselError, _>(|conn| {
            async move {
                diesel::delete(todo_tasks::table.filter(todo_tasks::user_id.eq(user_id)))
                    .execute(conn)
                    .await?;
                diesel::delete(todo_lists::table.filter(todo_lists::user_id.eq(user_id)))
                    .execute(conn)
                    .await?;
                diesel::delete(users::table.find(user_id))
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
