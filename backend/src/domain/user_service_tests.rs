//! Tests for the user service.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockUserRepository;
use crate::test_support::{FixtureClock, fixture_timestamp};
use mockall::predicate::function;
use rstest::rstest;

fn make_service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo), Arc::new(FixtureClock::default()))
}

fn stored_user(email: &str) -> User {
    User {
        id: UserId::random(),
        username: "alice".to_owned(),
        email: email.to_owned(),
        created_at: fixture_timestamp(),
    }
}

#[tokio::test]
async fn create_user_stamps_id_and_clock() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .with(function(|email: &str| email == "a@x.com"))
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert().times(1).return_once(|_| Ok(()));

    let user = make_service(repo)
        .create_user(CreateUserRequest {
            username: "alice".to_owned(),
            email: " a@x.com ".to_owned(),
        })
        .await
        .expect("user created");

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.created_at, fixture_timestamp());
    assert!(!user.id.as_str().is_empty());
}

#[rstest]
#[case("", "a@x.com", "Validation failed: Username is required")]
#[case("alice", "  ", "Validation failed: Email is required")]
#[case(" ", "", "Validation failed: Username is required, Email is required")]
#[tokio::test]
async fn create_user_reports_every_missing_field(
    #[case] username: &str,
    #[case] email: &str,
    #[case] expected: &str,
) {
    let repo = MockUserRepository::new();

    let err = make_service(repo)
        .create_user(CreateUserRequest {
            username: username.to_owned(),
            email: email.to_owned(),
        })
        .await
        .expect_err("validation failure");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), expected);
}

#[tokio::test]
async fn create_user_rejects_taken_email() {
    let mut repo = MockUserRepository::new();
    let existing = stored_user("a@x.com");
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));

    let err = make_service(repo)
        .create_user(CreateUserRequest {
            username: "bob".to_owned(),
            email: "A@X.com".to_owned(),
        })
        .await
        .expect_err("conflict");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "User with this email already exists");
}

#[tokio::test]
async fn create_user_maps_repository_duplicate_to_conflict() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().return_once(|_| Ok(None));
    repo.expect_insert()
        .return_once(|_| Err(UserPersistenceError::duplicate_email("a@x.com")));

    let err = make_service(repo)
        .create_user(CreateUserRequest {
            username: "alice".to_owned(),
            email: "a@x.com".to_owned(),
        })
        .await
        .expect_err("conflict");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn get_user_reports_missing_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));
    let user_id = UserId::new("missing").expect("user id");

    let err = make_service(repo)
        .get_user(&user_id)
        .await
        .expect_err("not found");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User with ID missing not found");
}

#[tokio::test]
async fn update_user_ignores_blank_fields() {
    let existing = stored_user("a@x.com");
    let user_id = existing.id.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_find_by_email().never();
    repo.expect_update().times(1).return_once(|_| Ok(()));

    let user = make_service(repo)
        .update_user(
            &user_id,
            UpdateUserRequest {
                username: Some("   ".to_owned()),
                email: Some(String::new()),
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "a@x.com");
}

#[tokio::test]
async fn update_user_allows_case_change_of_own_email() {
    let existing = stored_user("a@x.com");
    let user_id = existing.id.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_find_by_email().never();
    repo.expect_update().times(1).return_once(|_| Ok(()));

    let user = make_service(repo)
        .update_user(
            &user_id,
            UpdateUserRequest {
                username: None,
                email: Some("A@X.COM".to_owned()),
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(user.email, "A@X.COM");
}

#[tokio::test]
async fn update_user_rejects_email_of_another_user() {
    let existing = stored_user("a@x.com");
    let other = stored_user("b@x.com");
    let user_id = existing.id.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_find_by_email()
        .return_once(move |_| Ok(Some(other)));
    repo.expect_update().never();

    let err = make_service(repo)
        .update_user(
            &user_id,
            UpdateUserRequest {
                username: None,
                email: Some("b@x.com".to_owned()),
            },
        )
        .await
        .expect_err("conflict");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn find_by_email_requires_input() {
    let err = make_service(MockUserRepository::new())
        .find_user_by_email(" ")
        .await
        .expect_err("blank email");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Validation failed: Email is required");
}

#[tokio::test]
async fn delete_user_checks_existence_first() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));
    repo.expect_delete().never();
    let user_id = UserId::random();

    let err = make_service(repo)
        .delete_user(&user_id)
        .await
        .expect_err("not found");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn storage_failures_become_internal_errors() {
    let mut repo = MockUserRepository::new();
    repo.expect_list()
        .return_once(|_| Err(UserPersistenceError::connection("database is locked")));

    let err = make_service(repo)
        .list_users(PageRequest::default())
        .await
        .expect_err("internal");

    assert_eq!(err.code(), ErrorCode::InternalError);
}
