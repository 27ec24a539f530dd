//! Tests for task API handlers.

use super::*;
use crate::domain::ports::{CreateTodoListRequest, CreateUserRequest};
use crate::inbound::http::test_utils::{call_json, field, memory_state, test_app};
use actix_web::http::StatusCode;
use actix_web::test::{self as actix_test, TestRequest};
use rstest::rstest;
use serde_json::{Value, json};

/// State holding one user with one empty list, plus that list's tasks URI.
async fn seeded() -> (HttpState, String) {
    let state = memory_state();
    let user = state
        .users_command
        .create_user(CreateUserRequest {
            username: "alice".to_owned(),
            email: "a@x.com".to_owned(),
        })
        .await
        .expect("user created");
    let list = state
        .lists_command
        .create_list(
            &user.id,
            CreateTodoListRequest {
                name: "Groceries".to_owned(),
                description: None,
            },
        )
        .await
        .expect("list created");
    let uri = format!("/users/{}/lists/{}/tasks", user.id, list.list_id);
    (state, uri)
}

fn descriptions(body: &Value) -> Vec<&str> {
    body["tasks"]
        .as_array()
        .expect("tasks array")
        .iter()
        .map(|task| field(task, "description"))
        .collect()
}

fn orders(body: &Value) -> Vec<i64> {
    body["tasks"]
        .as_array()
        .expect("tasks array")
        .iter()
        .filter_map(|task| task["order"].as_i64())
        .collect()
}

#[rstest]
#[actix_web::test]
async fn tasks_without_order_append_in_creation_order() {
    let (state, uri) = seeded().await;
    let app = actix_test::init_service(test_app(state)).await;

    for description in ["milk", "eggs", "bread"] {
        let (status, task) = call_json(
            &app,
            TestRequest::post()
                .uri(&uri)
                .set_json(json!({ "description": description }))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(task["completed"], json!(false));
    }

    let (_, listing) = call_json(&app, TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(descriptions(&listing), ["milk", "eggs", "bread"]);
    assert_eq!(orders(&listing), [0, 1, 2]);
}

#[rstest]
#[actix_web::test]
async fn reorder_route_is_not_read_as_a_task_id() {
    let (state, uri) = seeded().await;
    let app = actix_test::init_service(test_app(state)).await;
    let mut ids = Vec::new();
    for description in ["a", "b", "c"] {
        let (_, task) = call_json(
            &app,
            TestRequest::post()
                .uri(&uri)
                .set_json(json!({ "description": description }))
                .to_request(),
        )
        .await;
        ids.push(field(&task, "taskId").to_owned());
    }

    let (status, body) = call_json(
        &app,
        TestRequest::put()
            .uri(&format!("{uri}/reorder"))
            .set_json(json!({"taskOrders": [
                {"taskId": ids[2], "order": 0},
                {"taskId": ids[0], "order": 2},
                {"taskId": "no-such-task", "order": 9},
            ]}))
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(descriptions(&body), ["c", "b", "a"]);
    assert_eq!(orders(&body), [0, 1, 2]);
}

#[rstest]
#[case(json!({"taskOrders": []}), "Validation failed: Task orders are required")]
#[case(json!({}), "Validation failed: Task orders are required")]
#[actix_web::test]
async fn empty_reorder_batches_are_rejected(#[case] payload: Value, #[case] message: &str) {
    let (state, uri) = seeded().await;
    let app = actix_test::init_service(test_app(state)).await;

    let (status, body) = call_json(
        &app,
        TestRequest::put()
            .uri(&format!("{uri}/reorder"))
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": message }));
}

#[rstest]
#[actix_web::test]
async fn completed_filter_and_patch() {
    let (state, uri) = seeded().await;
    let app = actix_test::init_service(test_app(state)).await;
    let (_, task) = call_json(
        &app,
        TestRequest::post()
            .uri(&uri)
            .set_json(json!({"description": "milk"}))
            .to_request(),
    )
    .await;
    call_json(
        &app,
        TestRequest::post()
            .uri(&uri)
            .set_json(json!({"description": "eggs", "completed": true, "order": 7}))
            .to_request(),
    )
    .await;
    let task_uri = format!("{uri}/{}", field(&task, "taskId"));

    let (status, patched) = call_json(
        &app,
        TestRequest::put()
            .uri(&task_uri)
            .set_json(json!({"description": "", "completed": true, "order": 0}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&patched, "description"), "milk");
    assert_eq!(patched["completed"], json!(true));

    let (_, done) = call_json(
        &app,
        TestRequest::get()
            .uri(&format!("{uri}?completed=true"))
            .to_request(),
    )
    .await;
    assert_eq!(descriptions(&done), ["milk", "eggs"]);

    let (_, open) = call_json(
        &app,
        TestRequest::get()
            .uri(&format!("{uri}?completed=false"))
            .to_request(),
    )
    .await;
    assert_eq!(descriptions(&open), Vec::<&str>::new());
}

#[rstest]
#[actix_web::test]
async fn unknown_list_is_not_found() {
    let (state, uri) = seeded().await;
    let app = actix_test::init_service(test_app(state)).await;
    let user_part = uri.split("/lists/").next().expect("user prefix");

    let (status, body) = call_json(
        &app,
        TestRequest::post()
            .uri(&format!("{user_part}/lists/missing/tasks"))
            .set_json(json!({"description": "milk"}))
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(field(&body, "message"), "List with ID missing not found");
}

#[rstest]
#[actix_web::test]
async fn blank_description_is_rejected() {
    let (state, uri) = seeded().await;
    let app = actix_test::init_service(test_app(state)).await;

    let (status, body) = call_json(
        &app,
        TestRequest::post()
            .uri(&uri)
            .set_json(json!({"description": "   "}))
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        field(&body, "message"),
        "Validation failed: Task description is required"
    );
}
