//! Todo list API handlers, nested under their owner.

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::NextToken;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::TodoList;
use crate::domain::ports::{CreateTodoListRequest, UpdateTodoListRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PageParams};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{page_request, parse_list_id, parse_user_id};

/// Request body for creating a list.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoListInput {
    /// List name; required.
    #[serde(default)]
    #[schema(example = "Groceries")]
    pub name: String,
    /// Optional free text.
    pub description: Option<String>,
}

impl From<CreateTodoListInput> for CreateTodoListRequest {
    fn from(value: CreateTodoListInput) -> Self {
        Self {
            name: value.name,
            description: value.description,
        }
    }
}

/// Request body for patching a list. Absent or blank fields stay as they are.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoListInput {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl From<UpdateTodoListInput> for UpdateTodoListRequest {
    fn from(value: UpdateTodoListInput) -> Self {
        Self {
            name: value.name,
            description: value.description,
        }
    }
}

/// List as returned by the API. Timestamps are Unix seconds.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoListOutput {
    /// Owner identifier.
    pub user_id: String,
    /// Server-generated identifier.
    pub list_id: String,
    /// List name.
    pub name: String,
    /// Optional free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation time in Unix seconds.
    pub created_at: i64,
    /// Last modification time in Unix seconds.
    pub updated_at: i64,
}

impl From<TodoList> for TodoListOutput {
    fn from(list: TodoList) -> Self {
        Self {
            user_id: list.user_id.into(),
            list_id: list.list_id.into(),
            name: list.name,
            description: list.description,
            created_at: list.created_at.timestamp(),
            updated_at: list.updated_at.timestamp(),
        }
    }
}

/// One page of lists.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoListPage {
    /// Lists ordered by creation time.
    pub lists: Vec<TodoListOutput>,
    /// Token for the next page; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "50")]
    pub next_token: Option<NextToken>,
}

/// List a user's todo lists in creation order.
#[utoipa::path(
    get,
    path = "/users/{userId}/lists",
    params(("userId" = String, Path, description = "Owner identifier"), PageParams),
    responses(
        (status = 200, description = "Lists", body = TodoListPage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "listTodoLists"
)]
#[get("/users/{userId}/lists")]
pub async fn list_lists(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<PageParams>,
) -> ApiResult<web::Json<TodoListPage>> {
    let user_id = parse_user_id(path.into_inner())?;
    let PageParams {
        max_results,
        next_token,
    } = query.into_inner();
    let page = page_request(max_results, next_token.as_deref())?;
    let (lists, next_token) = state.lists.list_lists(&user_id, page).await?.into_parts();
    Ok(web::Json(TodoListPage {
        lists: lists.into_iter().map(TodoListOutput::from).collect(),
        next_token,
    }))
}

/// Create a list for a user.
#[utoipa::path(
    post,
    path = "/users/{userId}/lists",
    params(("userId" = String, Path, description = "Owner identifier")),
    request_body = CreateTodoListInput,
    responses(
        (status = 200, description = "Created list", body = TodoListOutput),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "createTodoList"
)]
#[post("/users/{userId}/lists")]
pub async fn create_list(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CreateTodoListInput>,
) -> ApiResult<web::Json<TodoListOutput>> {
    let user_id = parse_user_id(path.into_inner())?;
    let list = state
        .lists_command
        .create_list(&user_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(list.into()))
}

/// Fetch one list.
#[utoipa::path(
    get,
    path = "/users/{userId}/lists/{listId}",
    params(
        ("userId" = String, Path, description = "Owner identifier"),
        ("listId" = String, Path, description = "List identifier")
    ),
    responses(
        (status = 200, description = "List", body = TodoListOutput),
        (status = 404, description = "User or list not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "getTodoList"
)]
#[get("/users/{userId}/lists/{listId}")]
pub async fn get_list(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<TodoListOutput>> {
    let (user_id, list_id) = path.into_inner();
    let (user_id, list_id) = (parse_user_id(user_id)?, parse_list_id(list_id)?);
    let list = state.lists.get_list(&user_id, &list_id).await?;
    Ok(web::Json(list.into()))
}

/// Patch a list's name or description.
#[utoipa::path(
    put,
    path = "/users/{userId}/lists/{listId}",
    params(
        ("userId" = String, Path, description = "Owner identifier"),
        ("listId" = String, Path, description = "List identifier")
    ),
    request_body = UpdateTodoListInput,
    responses(
        (status = 200, description = "Updated list", body = TodoListOutput),
        (status = 404, description = "User or list not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "updateTodoList"
)]
#[put("/users/{userId}/lists/{listId}")]
pub async fn update_list(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateTodoListInput>,
) -> ApiResult<web::Json<TodoListOutput>> {
    let (user_id, list_id) = path.into_inner();
    let (user_id, list_id) = (parse_user_id(user_id)?, parse_list_id(list_id)?);
    let list = state
        .lists_command
        .update_list(&user_id, &list_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(list.into()))
}

/// Delete a list together with its tasks.
#[utoipa::path(
    delete,
    path = "/users/{userId}/lists/{listId}",
    params(
        ("userId" = String, Path, description = "Owner identifier"),
        ("listId" = String, Path, description = "List identifier")
    ),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "User or list not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "deleteTodoList"
)]
#[delete("/users/{userId}/lists/{listId}")]
pub async fn delete_list(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (user_id, list_id) = path.into_inner();
    let (user_id, list_id) = (parse_user_id(user_id)?, parse_list_id(list_id)?);
    state.lists_command.delete_list(&user_id, &list_id).await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests;
