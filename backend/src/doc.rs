//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint and the request/response shapes.
//! Swagger UI serves it in debug builds and `openapi-dump` prints it for
//! external tooling.

use utoipa::OpenApi;

use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::todo_lists::{
    CreateTodoListInput, TodoListOutput, TodoListPage, UpdateTodoListInput,
};
use crate::inbound::http::todo_tasks::{
    CreateTodoTaskInput, ReorderTasksInput, ReorderTasksOutput, TaskOrderInput, TodoTaskOutput,
    TodoTaskPage, UpdateTodoTaskInput,
};
use crate::inbound::http::users::{CreateUserInput, UpdateUserInput, UserOutput, UserPage};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo backend API",
        description = "Users, todo lists, and ordered todo tasks.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::lookup_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::todo_lists::list_lists,
        crate::inbound::http::todo_lists::create_list,
        crate::inbound::http::todo_lists::get_list,
        crate::inbound::http::todo_lists::update_list,
        crate::inbound::http::todo_lists::delete_list,
        crate::inbound::http::todo_tasks::list_tasks,
        crate::inbound::http::todo_tasks::create_task,
        crate::inbound::http::todo_tasks::reorder_tasks,
        crate::inbound::http::todo_tasks::get_task,
        crate::inbound::http::todo_tasks::update_task,
        crate::inbound::http::todo_tasks::delete_task,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        CreateUserInput,
        UpdateUserInput,
        UserOutput,
        UserPage,
        CreateTodoListInput,
        UpdateTodoListInput,
        TodoListOutput,
        TodoListPage,
        CreateTodoTaskInput,
        UpdateTodoTaskInput,
        TaskOrderInput,
        ReorderTasksInput,
        TodoTaskOutput,
        TodoTaskPage,
        ReorderTasksOutput,
    )),
    tags(
        (name = "users", description = "User accounts"),
        (name = "lists", description = "Todo lists owned by a user"),
        (name = "tasks", description = "Tasks within a list, including reordering"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
