//! HTTP inbound adapter exposing the REST endpoints.
//!
//! [`configure`] registers every resource endpoint together with the
//! extractor settings that turn malformed input into validation errors.
//! Health probes are registered separately by the server so they stay
//! outside any base path.

use actix_web::web;

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod todo_lists;
pub mod todo_tasks;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register extractor settings and the resource endpoints.
///
/// Literal segments are registered before the parameterised routes they
/// shadow, so `/users/lookup` and `.../tasks/reorder` are not read as ids.
/// The caller provides [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use todo_backend::inbound::http::configure;
///
/// let app = App::new().service(web::scope("/api").configure(configure));
/// # let _ = app;
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .app_data(validation::path_config())
        .service(users::list_users)
        .service(users::create_user)
        .service(users::lookup_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(todo_lists::list_lists)
        .service(todo_lists::create_list)
        .service(todo_lists::get_list)
        .service(todo_lists::update_list)
        .service(todo_lists::delete_list)
        .service(todo_tasks::list_tasks)
        .service(todo_tasks::create_task)
        .service(todo_tasks::reorder_tasks)
        .service(todo_tasks::get_task)
        .service(todo_tasks::update_task)
        .service(todo_tasks::delete_task);
}
