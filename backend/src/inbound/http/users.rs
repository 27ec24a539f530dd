//! Users API handlers.
//!
//! ```text
//! POST /users {"username":"alice","email":"a@x.com"}
//! GET /users/lookup?email=a@x.com
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::NextToken;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;
use crate::domain::ports::{CreateUserRequest, UpdateUserRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{EmailLookupParams, ErrorSchema, PageParams};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{page_request, parse_user_id};

/// Request body for `POST /users`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    /// Display name; required.
    #[serde(default)]
    #[schema(example = "alice")]
    pub username: String,
    /// Email address; required and unique ignoring case.
    #[serde(default)]
    #[schema(example = "a@x.com")]
    pub email: String,
}

impl From<CreateUserInput> for CreateUserRequest {
    fn from(value: CreateUserInput) -> Self {
        Self {
            username: value.username,
            email: value.email,
        }
    }
}

/// Request body for `PUT /users/{userId}`. Absent or blank fields stay as
/// they are.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    /// New display name.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
}

impl From<UpdateUserInput> for UpdateUserRequest {
    fn from(value: UpdateUserInput) -> Self {
        Self {
            username: value.username,
            email: value.email,
        }
    }
}

/// User as returned by the API. Timestamps are Unix seconds.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserOutput {
    /// Server-generated identifier.
    pub user_id: String,
    /// Display name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Creation time in Unix seconds.
    #[schema(example = 1_715_938_200)]
    pub created_at: i64,
}

impl From<User> for UserOutput {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id.into(),
            username: user.username,
            email: user.email,
            created_at: user.created_at.timestamp(),
        }
    }
}

/// One page of users.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    /// Users ordered by creation time.
    pub users: Vec<UserOutput>,
    /// Token for the next page; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "50")]
    pub next_token: Option<NextToken>,
}

/// List users in creation order.
#[utoipa::path(
    get,
    path = "/users",
    params(PageParams),
    responses(
        (status = 200, description = "Users", body = UserPage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<PageParams>,
) -> ApiResult<web::Json<UserPage>> {
    let PageParams {
        max_results,
        next_token,
    } = query.into_inner();
    let page = page_request(max_results, next_token.as_deref())?;
    let (users, next_token) = state.users.list_users(page).await?.into_parts();
    Ok(web::Json(UserPage {
        users: users.into_iter().map(UserOutput::from).collect(),
        next_token,
    }))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserInput,
    responses(
        (status = 200, description = "Created user", body = UserOutput),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserInput>,
) -> ApiResult<web::Json<UserOutput>> {
    let user = state
        .users_command
        .create_user(payload.into_inner().into())
        .await?;
    Ok(web::Json(user.into()))
}

/// Find a user by email, ignoring case.
#[utoipa::path(
    get,
    path = "/users/lookup",
    params(EmailLookupParams),
    responses(
        (status = 200, description = "Matching user", body = UserOutput),
        (status = 400, description = "Email missing", body = ErrorSchema),
        (status = 404, description = "No user has this email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "lookupUser"
)]
#[get("/users/lookup")]
pub async fn lookup_user(
    state: web::Data<HttpState>,
    query: web::Query<EmailLookupParams>,
) -> ApiResult<web::Json<UserOutput>> {
    let email = query.into_inner().email.unwrap_or_default();
    let user = state.users.find_user_by_email(&email).await?;
    Ok(web::Json(user.into()))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{userId}",
    params(("userId" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserOutput),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{userId}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserOutput>> {
    let user_id = parse_user_id(path.into_inner())?;
    let user = state.users.get_user(&user_id).await?;
    Ok(web::Json(user.into()))
}

/// Patch a user's username or email.
#[utoipa::path(
    put,
    path = "/users/{userId}",
    params(("userId" = String, Path, description = "User identifier")),
    request_body = UpdateUserInput,
    responses(
        (status = 200, description = "Updated user", body = UserOutput),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{userId}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserInput>,
) -> ApiResult<web::Json<UserOutput>> {
    let user_id = parse_user_id(path.into_inner())?;
    let user = state
        .users_command
        .update_user(&user_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(user.into()))
}

/// Delete a user together with their lists and tasks.
#[utoipa::path(
    delete,
    path = "/users/{userId}",
    params(("userId" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{userId}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(path.into_inner())?;
    state.users_command.delete_user(&user_id).await?;
    Ok(HttpResponse::Ok().finish())
}
