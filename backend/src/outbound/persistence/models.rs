//! Row types for the SQLite tables and their conversions to domain entities.
//!
//! Timestamps are stored as naive UTC values.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::ports::TaskPatch;
use crate::domain::{IdValidationError, ListId, TaskId, TodoList, TodoTask, User, UserId};

use super::schema::{todo_lists, todo_tasks, users};

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at.naive_utc(),
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = IdValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(row.user_id)?,
            username: row.username,
            email: row.email,
            created_at: row.created_at.and_utc(),
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = todo_lists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct TodoListRow {
    pub user_id: String,
    pub list_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<&TodoList> for TodoListRow {
    fn from(list: &TodoList) -> Self {
        Self {
            user_id: list.user_id.to_string(),
            list_id: list.list_id.to_string(),
            name: list.name.clone(),
            description: list.description.clone(),
            created_at: list.created_at.naive_utc(),
            updated_at: list.updated_at.naive_utc(),
        }
    }
}

impl TryFrom<TodoListRow> for TodoList {
    type Error = IdValidationError;

    fn try_from(row: TodoListRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::new(row.user_id)?,
            list_id: ListId::new(row.list_id)?,
            name: row.name,
            description: row.description,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = todo_tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct TodoTaskRow {
    pub user_id: String,
    pub list_id: String,
    pub task_id: String,
    pub description: String,
    pub completed: bool,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<&TodoTask> for TodoTaskRow {
    fn from(task: &TodoTask) -> Self {
        Self {
            user_id: task.user_id.to_string(),
            list_id: task.list_id.to_string(),
            task_id: task.task_id.to_string(),
            description: task.description.clone(),
            completed: task.completed,
            sort_order: task.order,
            created_at: task.created_at.naive_utc(),
            updated_at: task.updated_at.naive_utc(),
        }
    }
}

/// Columns written by a task patch. `None` fields are left out of the `SET`
/// clause.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = todo_tasks)]
pub(crate) struct TodoTaskChangeset {
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub sort_order: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl From<&TaskPatch> for TodoTaskChangeset {
    fn from(patch: &TaskPatch) -> Self {
        Self {
            description: patch.description.clone(),
            completed: patch.completed,
            sort_order: patch.order,
            updated_at: patch.updated_at.naive_utc(),
        }
    }
}

impl TryFrom<TodoTaskRow> for TodoTask {
    type Error = IdValidationError;

    fn try_from(row: TodoTaskRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::new(row.user_id)?,
            list_id: ListId::new(row.list_id)?,
            task_id: TaskId::new(row.task_id)?,
            description: row.description,
            completed: row.completed,
            order: row.sort_order,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        })
    }
}
