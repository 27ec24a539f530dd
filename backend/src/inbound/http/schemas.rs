//! OpenAPI schema definitions and shared query parameter types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here give the documented shapes for types serialised by hand in
//! the adapter.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// OpenAPI schema for [`crate::domain::Error`] as rendered on the wire.
///
/// Validation failures start with `Validation failed: ` followed by the
/// problems joined with `, `.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message returned to clients.
    #[schema(example = "Validation failed: Username is required")]
    message: String,
}

/// Pagination parameters accepted by every collection endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page size; defaults to 50 and must be at least 1.
    #[param(minimum = 1, example = 50)]
    pub max_results: Option<usize>,
    /// Continuation token from the previous page.
    #[param(example = "50")]
    pub next_token: Option<String>,
}

/// Query parameters for listing a list's tasks.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TaskListParams {
    /// Page size; defaults to 50 and must be at least 1.
    #[param(minimum = 1, example = 50)]
    pub max_results: Option<usize>,
    /// Continuation token from the previous page.
    #[param(example = "50")]
    pub next_token: Option<String>,
    /// Keep only tasks with this completion flag.
    pub completed: Option<bool>,
}

/// Query parameters for `GET /users/lookup`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailLookupParams {
    /// Email address to look up, compared case-insensitively.
    #[param(example = "a@x.com")]
    pub email: Option<String>,
}
