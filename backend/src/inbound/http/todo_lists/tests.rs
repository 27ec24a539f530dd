//! Tests for todo list API handlers.

use super::*;
use crate::domain::ports::CreateUserRequest;
use crate::inbound::http::test_utils::{call_json, field, memory_state, test_app};
use actix_web::http::StatusCode;
use actix_web::test::{self as actix_test, TestRequest};
use rstest::rstest;
use serde_json::{Value, json};

/// State holding one user, plus that user's lists URI.
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
    let uri = format!("/users/{}/lists", user.id);
    (state, uri)
}

#[rstest]
#[actix_web::test]
async fn create_omits_absent_description() {
    let (state, uri) = seeded().await;
    let app = actix_test::init_service(test_app(state)).await;

    let (status, body) = call_json(
        &app,
        TestRequest::post()
            .uri(&uri)
            .set_json(json!({"name": "Groceries"}))
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&body, "name"), "Groceries");
    assert!(!field(&body, "listId").is_empty());
    assert!(body.get("description").is_none());
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[rstest]
#[case(json!({}))]
#[case(json!({"name": "   "}))]
#[actix_web::test]
async fn blank_name_is_rejected(#[case] payload: Value) {
    let (state, uri) = seeded().await;
    let app = actix_test::init_service(test_app(state)).await;

    let (status, body) = call_json(
        &app,
        TestRequest::post().uri(&uri).set_json(payload).to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"message": "Validation failed: List name is required"})
    );
}

#[rstest]
#[actix_web::test]
async fn lists_of_unknown_user_are_not_found() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let (status, body) = call_json(
        &app,
        TestRequest::get().uri("/users/ghost/lists").to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "User with ID ghost not found"}));
}

#[rstest]
#[actix_web::test]
async fn listing_pages_through_lists() {
    let (state, uri) = seeded().await;
    let app = actix_test::init_service(test_app(state)).await;
    for name in ["one", "two", "three"] {
        call_json(
            &app,
            TestRequest::post()
                .uri(&uri)
                .set_json(json!({"name": name}))
                .to_request(),
        )
        .await;
    }

    let (status, first) = call_json(
        &app,
        TestRequest::get()
            .uri(&format!("{uri}?maxResults=2"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["lists"].as_array().map(Vec::len), Some(2));
    assert_eq!(field(&first, "nextToken"), "2");

    let (_, second) = call_json(
        &app,
        TestRequest::get()
            .uri(&format!("{uri}?maxResults=2&nextToken=2"))
            .to_request(),
    )
    .await;
    assert_eq!(second["lists"].as_array().map(Vec::len), Some(1));
    assert!(second.get("nextToken").is_none());
}

#[rstest]
#[actix_web::test]
async fn update_keeps_fields_left_blank() {
    let (state, uri) = seeded().await;
    let app = actix_test::init_service(test_app(state)).await;
    let (_, created) = call_json(
        &app,
        TestRequest::post()
            .uri(&uri)
            .set_json(json!({"name": "Groceries", "description": "weekly"}))
            .to_request(),
    )
    .await;
    let list_uri = format!("{uri}/{}", field(&created, "listId"));

    let (status, updated) = call_json(
        &app,
        TestRequest::put()
            .uri(&list_uri)
            .set_json(json!({"name": "", "description": "monthly"}))
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&updated, "name"), "Groceries");
    assert_eq!(field(&updated, "description"), "monthly");
}

#[rstest]
#[actix_web::test]
async fn deleted_list_is_not_found() {
    let (state, uri) = seeded().await;
    let app = actix_test::init_service(test_app(state)).await;
    let (_, created) = call_json(
        &app,
        TestRequest::post()
            .uri(&uri)
            .set_json(json!({"name": "Groceries"}))
            .to_request(),
    )
    .await;
    let list_id = field(&created, "listId").to_owned();
    let list_uri = format!("{uri}/{list_id}");

    let (status, body) = call_json(&app, TestRequest::delete().uri(&list_uri).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, body) = call_json(&app, TestRequest::get().uri(&list_uri).to_request()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"message": format!("List with ID {list_id} not found")})
    );
}
