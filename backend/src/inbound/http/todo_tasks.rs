//! Task API handlers, including the batch reorder endpoint.
//!
//! ```text
//! PUT /users/{userId}/lists/{listId}/tasks/reorder
//! {"taskOrders":[{"taskId":"t2","order":0},{"taskId":"t0","order":2}]}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::NextToken;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::TodoTask;
use crate::domain::ports::{
    CreateTodoTaskRequest, TaskFilter, TaskOrder, UpdateTodoTaskRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, TaskListParams};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    page_request, parse_list_id, parse_task_id, parse_user_id,
};

/// Request body for creating a task.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoTaskInput {
    /// Task text; required.
    #[serde(default)]
    #[schema(example = "Buy milk")]
    pub description: String,
    /// Completion flag; defaults to `false`.
    pub completed: Option<bool>,
    /// Display rank. When absent the task goes one past the list's highest
    /// rank, or `0` in an empty list.
    pub order: Option<i32>,
}

impl From<CreateTodoTaskInput> for CreateTodoTaskRequest {
    fn from(value: CreateTodoTaskInput) -> Self {
        Self {
            description: value.description,
            completed: value.completed,
            order: value.order,
        }
    }
}

/// Request body for patching a task.
///
/// A blank description is ignored; `completed` and `order` apply whenever
/// present.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoTaskInput {
    /// New task text.
    pub description: Option<String>,
    /// New completion flag.
    pub completed: Option<bool>,
    /// New display rank.
    pub order: Option<i32>,
}

impl From<UpdateTodoTaskInput> for UpdateTodoTaskRequest {
    fn from(value: UpdateTodoTaskInput) -> Self {
        Self {
            description: value.description,
            completed: value.completed,
            order: value.order,
        }
    }
}

/// One entry of a reorder batch.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskOrderInput {
    /// Task to move.
    pub task_id: String,
    /// New display rank.
    pub order: i32,
}

/// Request body for the reorder endpoint.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReorderTasksInput {
    /// Rank assignments; must not be empty. Unknown task ids are ignored.
    #[serde(default)]
    pub task_orders: Vec<TaskOrderInput>,
}

/// Task as returned by the API. Timestamps are Unix seconds.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoTaskOutput {
    /// Owner identifier.
    pub user_id: String,
    /// Containing list identifier.
    pub list_id: String,
    /// Server-generated identifier.
    pub task_id: String,
    /// Task text.
    pub description: String,
    /// Completion flag.
    pub completed: bool,
    /// Display rank.
    pub order: i32,
    /// Creation time in Unix seconds.
    pub created_at: i64,
    /// Last modification time in Unix seconds.
    pub updated_at: i64,
}

impl From<TodoTask> for TodoTaskOutput {
    fn from(task: TodoTask) -> Self {
        Self {
            user_id: task.user_id.into(),
            list_id: task.list_id.into(),
            task_id: task.task_id.into(),
            description: task.description,
            completed: task.completed,
            order: task.order,
            created_at: task.created_at.timestamp(),
            updated_at: task.updated_at.timestamp(),
        }
    }
}

/// One page of tasks.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoTaskPage {
    /// Tasks in display order: rank, then creation time.
    pub tasks: Vec<TodoTaskOutput>,
    /// Token for the next page; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "50")]
    pub next_token: Option<NextToken>,
}

/// Every task of a list after a reorder, in display order.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReorderTasksOutput {
    /// Tasks in display order.
    pub tasks: Vec<TodoTaskOutput>,
}

fn outputs(tasks: Vec<TodoTask>) -> Vec<TodoTaskOutput> {
    tasks.into_iter().map(TodoTaskOutput::from).collect()
}

/// List a list's tasks in display order.
#[utoipa::path(
    get,
    path = "/users/{userId}/lists/{listId}/tasks",
    params(
        ("userId" = String, Path, description = "Owner identifier"),
        ("listId" = String, Path, description = "List identifier"),
        TaskListParams
    ),
    responses(
        (status = 200, description = "Tasks", body = TodoTaskPage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User or list not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "listTodoTasks"
)]
#[get("/users/{userId}/lists/{listId}/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    query: web::Query<TaskListParams>,
) -> ApiResult<web::Json<TodoTaskPage>> {
    let (user_id, list_id) = path.into_inner();
    let (user_id, list_id) = (parse_user_id(user_id)?, parse_list_id(list_id)?);
    let TaskListParams {
        max_results,
        next_token,
        completed,
    } = query.into_inner();
    let page = page_request(max_results, next_token.as_deref())?;
    let (tasks, next_token) = state
        .tasks
        .list_tasks(&user_id, &list_id, TaskFilter { completed }, page)
        .await?
        .into_parts();
    Ok(web::Json(TodoTaskPage {
        tasks: outputs(tasks),
        next_token,
    }))
}

/// Create a task.
#[utoipa::path(
    post,
    path = "/users/{userId}/lists/{listId}/tasks",
    params(
        ("userId" = String, Path, description = "Owner identifier"),
        ("listId" = String, Path, description = "List identifier")
    ),
    request_body = CreateTodoTaskInput,
    responses(
        (status = 200, description = "Created task", body = TodoTaskOutput),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User or list not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "createTodoTask"
)]
#[post("/users/{userId}/lists/{listId}/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<CreateTodoTaskInput>,
) -> ApiResult<web::Json<TodoTaskOutput>> {
    let (user_id, list_id) = path.into_inner();
    let (user_id, list_id) = (parse_user_id(user_id)?, parse_list_id(list_id)?);
    let task = state
        .tasks_command
        .create_task(&user_id, &list_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(task.into()))
}

/// Rewrite the ranks of several tasks as one atomic batch.
///
/// Readers see either none or all of the batch. Task ids the list does not
/// contain are skipped.
#[utoipa::path(
    put,
    path = "/users/{userId}/lists/{listId}/tasks/reorder",
    params(
        ("userId" = String, Path, description = "Owner identifier"),
        ("listId" = String, Path, description = "List identifier")
    ),
    request_body = ReorderTasksInput,
    responses(
        (status = 200, description = "All tasks of the list in their new order", body = ReorderTasksOutput),
        (status = 400, description = "Empty or duplicated batch", body = ErrorSchema),
        (status = 404, description = "User or list not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "reorderTodoTasks"
)]
#[put("/users/{userId}/lists/{listId}/tasks/reorder")]
pub async fn reorder_tasks(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<ReorderTasksInput>,
) -> ApiResult<web::Json<ReorderTasksOutput>> {
    let (user_id, list_id) = path.into_inner();
    let (user_id, list_id) = (parse_user_id(user_id)?, parse_list_id(list_id)?);
    let orders = payload
        .into_inner()
        .task_orders
        .into_iter()
        .map(|entry| {
            Ok(TaskOrder {
                task_id: parse_task_id(entry.task_id)?,
                order: entry.order,
            })
        })
        .collect::<ApiResult<Vec<_>>>()?;
    let tasks = state
        .tasks_command
        .reorder_tasks(&user_id, &list_id, orders)
        .await?;
    Ok(web::Json(ReorderTasksOutput {
        tasks: outputs(tasks),
    }))
}

/// Fetch one task.
#[utoipa::path(
    get,
    path = "/users/{userId}/lists/{listId}/tasks/{taskId}",
    params(
        ("userId" = String, Path, description = "Owner identifier"),
        ("listId" = String, Path, description = "List identifier"),
        ("taskId" = String, Path, description = "Task identifier")
    ),
    responses(
        (status = 200, description = "Task", body = TodoTaskOutput),
        (status = 404, description = "User, list, or task not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "getTodoTask"
)]
#[get("/users/{userId}/lists/{listId}/tasks/{taskId}")]
pub async fn get_task(
    state: web::Data<HttpState>,
    path: web::Path<(String, String, String)>,
) -> ApiResult<web::Json<TodoTaskOutput>> {
    let (user_id, list_id, task_id) = path.into_inner();
    let task = state
        .tasks
        .get_task(
            &parse_user_id(user_id)?,
            &parse_list_id(list_id)?,
            &parse_task_id(task_id)?,
        )
        .await?;
    Ok(web::Json(task.into()))
}

/// Patch a task.
#[utoipa::path(
    put,
    path = "/users/{userId}/lists/{listId}/tasks/{taskId}",
    params(
        ("userId" = String, Path, description = "Owner identifier"),
        ("listId" = String, Path, description = "List identifier"),
        ("taskId" = String, Path, description = "Task identifier")
    ),
    request_body = UpdateTodoTaskInput,
    responses(
        (status = 200, description = "Updated task", body = TodoTaskOutput),
        (status = 404, description = "User, list, or task not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "updateTodoTask"
)]
#[put("/users/{userId}/lists/{listId}/tasks/{taskId}")]
pub async fn update_task(
    state: web::Data<HttpState>,
    path: web::Path<(String, String, String)>,
    payload: web::Json<UpdateTodoTaskInput>,
) -> ApiResult<web::Json<TodoTaskOutput>> {
    let (user_id, list_id, task_id) = path.into_inner();
    let task = state
        .tasks_command
        .update_task(
            &parse_user_id(user_id)?,
            &parse_list_id(list_id)?,
            &parse_task_id(task_id)?,
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(task.into()))
}

/// Delete a task.
#[utoipa::path(
    delete,
    path = "/users/{userId}/lists/{listId}/tasks/{taskId}",
    params(
        ("userId" = String, Path, description = "Owner identifier"),
        ("listId" = String, Path, description = "List identifier"),
        ("taskId" = String, Path, description = "Task identifier")
    ),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "User, list, or task not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "deleteTodoTask"
)]
#[delete("/users/{userId}/lists/{listId}/tasks/{taskId}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    path: web::Path<(String, String, String)>,
) -> ApiResult<HttpResponse> {
    let (user_id, list_id, task_id) = path.into_inner();
    state
        .tasks_command
        .delete_task(
            &parse_user_id(user_id)?,
            &parse_list_id(list_id)?,
            &parse_task_id(task_id)?,
        )
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests;
