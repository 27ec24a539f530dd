//! SQLite-backed `TodoTaskRepository` implementation using Diesel ORM.
//!
//! Rank assignment and reorder batches run inside the list's [`ListLocks`]
//! entry and a single transaction whose first statement is a write. SQLite
//! then takes the write lock up front, so a concurrent writer waits on the
//! busy timeout instead of failing on a stale read snapshot. Readers under
//! WAL see the list either before or after a batch commits.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sql_types::{Bool, Text, Timestamp};
use diesel::sqlite::Sqlite;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageRequest};

use crate::domain::ordering::OrderAssignments;
use crate::domain::ports::{
    TaskFilter, TaskPatch, TodoTaskPersistenceError, TodoTaskRepository,
};
use crate::domain::{ListId, TaskId, TodoTask, UserId};

use super::error_mapping::{
    is_foreign_key_violation, map_diesel_error, map_pool_error, sql_bound, sql_count,
};
use super::list_locks::ListLocks;
use super::models::{TodoTaskChangeset, TodoTaskRow};
use super::pool::{DbConnection, DbPool, PoolError};
use super::schema::todo_tasks;

/// Appends a task one past the list's highest rank, or at `0` when the list
/// is empty, computing the rank in the same statement as the insert.
const INSERT_AT_END: &str = "\
INSERT INTO todo_tasks \
    (user_id, list_id, task_id, description, completed, sort_order, created_at, updated_at) \
SELECT ?, ?, ?, ?, ?, MIN(COALESCE(MAX(sort_order) + 1, 0), 2147483647), ?, ? \
FROM todo_tasks WHERE user_id = ? AND list_id = ?";

/// Diesel-backed implementation of the [`TodoTaskRepository`] port.
#[derive(Clone)]
pub struct DieselTodoTaskRepository {
    pool: DbPool,
    locks: Arc<ListLocks>,
}

impl DieselTodoTaskRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// Clones share one lock registry. Build a single repository per pool so
    /// every writer of a list goes through the same lock.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            locks: Arc::new(ListLocks::default()),
        }
    }
}

fn pool_error(error: PoolError) -> TodoTaskPersistenceError {
    map_pool_error(error, |message| TodoTaskPersistenceError::connection(message))
}

fn diesel_error(error: &DieselError) -> TodoTaskPersistenceError {
    map_diesel_error(
        error,
        |message| TodoTaskPersistenceError::query(message),
        |message| TodoTaskPersistenceError::connection(message),
    )
}

/// Insert failures, where a foreign key violation means the list was removed
/// after the caller checked it.
fn insert_error(error: &DieselError, list_id: &ListId) -> TodoTaskPersistenceError {
    if is_foreign_key_violation(error) {
        TodoTaskPersistenceError::missing_list(list_id.as_str())
    } else {
        diesel_error(error)
    }
}

fn to_domain(row: TodoTaskRow) -> Result<TodoTask, TodoTaskPersistenceError> {
    TodoTask::try_from(row).map_err(|err| TodoTaskPersistenceError::query(err.to_string()))
}

fn filtered<'a>(
    user_id: &'a str,
    list_id: &'a str,
    filter: TaskFilter,
) -> todo_tasks::BoxedQuery<'a, Sqlite> {
    let mut query = todo_tasks::table
        .filter(todo_tasks::user_id.eq(user_id))
        .filter(todo_tasks::list_id.eq(list_id))
        .into_boxed();
    if let Some(completed) = filter.completed {
        query = query.filter(todo_tasks::completed.eq(completed));
    }
    query
}

async fn load_in_display_order(
    conn: &mut DbConnection,
    user_id: &str,
    list_id: &str,
) -> Result<Vec<TodoTaskRow>, DieselError> {
    filtered(user_id, list_id, TaskFilter::default())
        .order((
            todo_tasks::sort_order.asc(),
            todo_tasks::created_at.asc(),
            todo_tasks::task_id.asc(),
        ))
        .select(TodoTaskRow::as_select())
        .load(conn)
        .await
}

async fn insert_at_end(conn: &mut DbConnection, row: &TodoTaskRow) -> Result<i32, DieselError> {
    diesel::sql_query(INSERT_AT_END)
        .bind::<Text, _>(row.user_id.clone())
        .bind::<Text, _>(row.list_id.clone())
        .bind::<Text, _>(row.task_id.clone())
        .bind::<Text, _>(row.description.clone())
        .bind::<Bool, _>(row.completed)
        .bind::<Timestamp, _>(row.created_at)
        .bind::<Timestamp, _>(row.updated_at)
        .bind::<Text, _>(row.user_id.clone())
        .bind::<Text, _>(row.list_id.clone())
        .execute(conn)
        .await?;

    todo_tasks::table
        .find((
            row.user_id.as_str(),
            row.list_id.as_str(),
            row.task_id.as_str(),
        ))
        .select(todo_tasks::sort_order)
        .first(conn)
        .await
}

#[async_trait]
impl TodoTaskRepository for DieselTodoTaskRepository {
    async fn list(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        filter: TaskFilter,
        page: PageRequest,
    ) -> Result<Page<TodoTask>, TodoTaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let total: i64 = filtered(user_id.as_str(), list_id.as_str(), filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;
        let rows: Vec<TodoTaskRow> = filtered(user_id.as_str(), list_id.as_str(), filter)
            .order((
                todo_tasks::sort_order.asc(),
                todo_tasks::created_at.asc(),
                todo_tasks::task_id.asc(),
            ))
            .limit(sql_bound(page.limit()))
            .offset(sql_bound(page.offset()))
            .select(TodoTaskRow::as_select())
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
        task_id: &TaskId,
    ) -> Result<Option<TodoTask>, TodoTaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        todo_tasks::table
            .find((user_id.as_str(), list_id.as_str(), task_id.as_str()))
            .select(TodoTaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?
            .map(to_domain)
            .transpose()
    }

    async fn create(
        &self,
        mut task: TodoTask,
        requested_order: Option<i32>,
    ) -> Result<TodoTask, TodoTaskPersistenceError> {
        let mut row = TodoTaskRow::from(&task);

        if let Some(order) = requested_order {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            row.sort_order = order;
            diesel::insert_into(todo_tasks::table)
                .values(&row)
                .execute(&mut conn)
                .await
                .map_err(|err| insert_error(&err, &task.list_id))?;
            task.order = order;
            return Ok(task);
        }

        let _guard = self.locks.acquire(&task.user_id, &task.list_id).await;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = &row;
        task.order = conn
            .transaction::<_, DieselError, _>(|conn| insert_at_end(conn, row).scope_boxed())
            .await
            .map_err(|err| insert_error(&err, &task.list_id))?;
        Ok(task)
    }

    async fn update(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<Option<TodoTask>, TodoTaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let key = (user_id.as_str(), list_id.as_str(), task_id.as_str());
        let changes = TodoTaskChangeset::from(patch);

        let row = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    diesel::update(todo_tasks::table.find(key))
                        .set(&changes)
                        .execute(conn)
                        .await?;
                    todo_tasks::table
                        .find(key)
                        .select(TodoTaskRow::as_select())
                        .first(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| diesel_error(&err))?;

        row.map(to_domain).transpose()
    }

    async fn delete(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Result<(), TodoTaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(todo_tasks::table.find((
            user_id.as_str(),
            list_id.as_str(),
            task_id.as_str(),
        )))
        .execute(&mut conn)
        .await
        .map_err(|err| diesel_error(&err))?;
        Ok(())
    }

    async fn reorder(
        &self,
        user_id: &UserId,
        list_id: &ListId,
        assignments: &OrderAssignments,
        at: DateTime<Utc>,
    ) -> Result<Vec<TodoTask>, TodoTaskPersistenceError> {
        let _guard = self.locks.acquire(user_id, list_id).await;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let (user_id, list_id) = (user_id.as_str(), list_id.as_str());
        let updated_at = at.naive_utc();

        let rows = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    // Unknown task ids match no row and are skipped.
                    for (task_id, order) in assignments.iter() {
                        diesel::update(todo_tasks::table.find((user_id, list_id, task_id.as_str())))
                            .set((
                                todo_tasks::sort_order.eq(order),
                                todo_tasks::updated_at.eq(updated_at),
                            ))
                            .execute(conn)
                            .await?;
                    }
                    load_in_display_order(conn, user_id, list_id).await
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| diesel_error(&err))?;

        rows.into_iter().map(to_domain).collect()
    }
}
