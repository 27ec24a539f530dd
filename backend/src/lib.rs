//! Todo backend library modules.
//!
//! The crate follows a ports-and-adapters layout: `domain` owns entities,
//! the task-ordering engine, services, and port traits; `outbound` provides
//! the in-memory and SQLite repository adapters; `inbound::http` exposes the
//! REST surface over Actix.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

#[cfg(test)]
mod test_support;
