//! Shared validation helpers for inbound HTTP adapters.
//!
//! Extraction failures and malformed identifiers surface as
//! [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode) errors whose
//! message carries the `Validation failed: ` prefix.

use actix_web::web;
use pagination::PageRequest;

use crate::domain::{Error, ListId, TaskId, UserId};

/// JSON body extractor settings: malformed bodies become validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| Error::validation([err.to_string()]).into())
}

/// Query string extractor settings.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| Error::validation([err.to_string()]).into())
}

/// Path extractor settings.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| Error::validation([err.to_string()]).into())
}

pub(crate) fn parse_user_id(raw: String) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| Error::validation([err.to_string()]))
}

pub(crate) fn parse_list_id(raw: String) -> Result<ListId, Error> {
    ListId::new(raw).map_err(|err| Error::validation([err.to_string()]))
}

pub(crate) fn parse_task_id(raw: String) -> Result<TaskId, Error> {
    TaskId::new(raw).map_err(|err| Error::validation([err.to_string()]))
}

/// Build a page window from raw `maxResults`/`nextToken` values.
///
/// A zero page size is rejected. An unreadable token restarts at the first
/// page.
pub(crate) fn page_request(
    max_results: Option<usize>,
    next_token: Option<&str>,
) -> Result<PageRequest, Error> {
    PageRequest::new(max_results, next_token).map_err(|err| Error::validation([err.to_string()]))
}
