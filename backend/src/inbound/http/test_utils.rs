//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{
    InMemoryStore, InMemoryTodoListRepository, InMemoryTodoTaskRepository, InMemoryUserRepository,
};
use crate::test_support::FixtureClock;

/// Handler state over a fresh in-memory store and a fixed clock.
pub(crate) fn memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    HttpState::from_repositories(
        Arc::new(InMemoryUserRepository::new(Arc::clone(&store))),
        Arc::new(InMemoryTodoListRepository::new(Arc::clone(&store))),
        Arc::new(InMemoryTodoTaskRepository::new(store)),
        Arc::new(FixtureClock::default()),
    )
}

/// App serving every resource endpoint at the root.
pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
}

/// Send a request and decode the JSON body, `Value::Null` when empty.
pub(crate) async fn call_json<S, R, B>(app: &S, request: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    if body.is_empty() {
        return (status, Value::Null);
    }
    let value = serde_json::from_slice(&body).expect("response body is JSON");
    (status, value)
}

/// String field of a JSON object.
pub(crate) fn field<'a>(value: &'a Value, name: &str) -> &'a str {
    value
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("field {name} missing in {value}"))
}
