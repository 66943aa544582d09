//! Student account provisioning HTTP tests

use super::mock_keycloak::MockKeycloakServer;
use super::{build_test_router, post_json, request_raw, TestAppState};
use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use schoolreg_core::domain::SchoolRegistration;
use serde_json::{json, Value};

fn acme() -> SchoolRegistration {
    SchoolRegistration {
        school_name: "Acme High".to_string(),
        admin_email: "admin@acme.edu".to_string(),
        domain: "acme.edu".to_string(),
        shared_password: "s3cret".to_string(),
        registered_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_register_then_create_student() {
    let keycloak = MockKeycloakServer::new().await;
    keycloak.mock_create_user_success("student-uid-1").await;
    let state = TestAppState::with_mock_keycloak(&keycloak);
    let app = build_test_router(state);

    let (status, _): (_, Option<Value>) = post_json(
        &app,
        "/registerSchool",
        &json!({
            "schoolName": "Acme High",
            "adminEmail": "admin@acme.edu",
            "domain": "acme.edu",
            "sharedPassword": "s3cret"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body): (_, Option<Value>) = post_json(
        &app,
        "/createStudentAccount",
        &json!({"studentEmail": "bob@acme.edu"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.unwrap(),
        json!({
            "message": "Student account created successfully",
            "uid": "student-uid-1",
            "passwordAssigned": "s3cret"
        })
    );

    let created = keycloak.created_users().await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["email"], "bob@acme.edu");
    assert_eq!(created[0]["username"], "bob@acme.edu");
    assert_eq!(created[0]["emailVerified"], true);
    assert_eq!(created[0]["credentials"][0]["value"], "s3cret");
    assert_eq!(created[0]["credentials"][0]["temporary"], false);
}

#[tokio::test]
async fn test_create_student_unknown_domain() {
    let keycloak = MockKeycloakServer::new().await;
    keycloak.expect_no_user_creation().await;
    let state = TestAppState::with_mock_keycloak(&keycloak);
    state.school_repo.add_school(acme()).await;
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) = post_json(
        &app,
        "/createStudentAccount",
        &json!({"studentEmail": "eve@nowhere.edu"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap(), json!({"error": "No school found for this domain"}));
}

#[tokio::test]
async fn test_create_student_domain_match_is_exact() {
    let keycloak = MockKeycloakServer::new().await;
    keycloak.expect_no_user_creation().await;
    let state = TestAppState::with_mock_keycloak(&keycloak);
    state.school_repo.add_school(acme()).await;
    let app = build_test_router(state);

    for email in ["bob@ACME.EDU", "bob@sub.acme.edu", "bob@acme.edu ", "bob@ acme.edu"] {
        let (status, body): (_, Option<Value>) = post_json(
            &app,
            "/createStudentAccount",
            &json!({"studentEmail": email}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.unwrap(), json!({"error": "No school found for this domain"}));
    }
}

#[tokio::test]
async fn test_create_student_without_at_sign() {
    let keycloak = MockKeycloakServer::new().await;
    keycloak.expect_no_user_creation().await;
    let state = TestAppState::with_mock_keycloak(&keycloak);
    let app = build_test_router(state.clone());

    let (status, body): (_, Option<Value>) = post_json(
        &app,
        "/createStudentAccount",
        &json!({"studentEmail": "not-an-email"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap(), json!({"error": "No school found for this domain"}));
    assert_eq!(state.school_repo.query_count(), 0);
}

#[tokio::test]
async fn test_create_student_email_required() {
    let keycloak = MockKeycloakServer::new().await;
    keycloak.expect_no_user_creation().await;
    let state = TestAppState::with_mock_keycloak(&keycloak);
    let app = build_test_router(state.clone());

    for payload in [json!({}), json!({"studentEmail": ""}), json!({"studentEmail": null})] {
        let (status, body): (_, Option<Value>) =
            post_json(&app, "/createStudentAccount", &payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.unwrap(), json!({"error": "Student email required"}));
    }
    assert_eq!(state.school_repo.query_count(), 0);
}

#[tokio::test]
async fn test_create_same_student_twice() {
    let keycloak = MockKeycloakServer::new().await;
    keycloak.mock_create_user_once_then_conflict("uid-once").await;
    let state = TestAppState::with_mock_keycloak(&keycloak);
    state.school_repo.add_school(acme()).await;
    let app = build_test_router(state);
    let payload = json!({"studentEmail": "bob@acme.edu"});

    let (status, body): (_, Option<Value>) =
        post_json(&app, "/createStudentAccount", &payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["uid"], "uid-once");

    let (status, body): (_, Option<Value>) =
        post_json(&app, "/createStudentAccount", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap(), json!({"error": "Email already registered"}));

    assert_eq!(keycloak.created_users().await.len(), 2);
}

#[tokio::test]
async fn test_create_student_duplicate_email() {
    let keycloak = MockKeycloakServer::new().await;
    keycloak.mock_create_user_conflict().await;
    let state = TestAppState::with_mock_keycloak(&keycloak);
    state.school_repo.add_school(acme()).await;
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) = post_json(
        &app,
        "/createStudentAccount",
        &json!({"studentEmail": "bob@acme.edu"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap(), json!({"error": "Email already registered"}));
}

#[tokio::test]
async fn test_create_student_provider_failure_is_opaque() {
    let keycloak = MockKeycloakServer::new().await;
    keycloak.mock_create_user_error().await;
    let state = TestAppState::with_mock_keycloak(&keycloak);
    state.school_repo.add_school(acme()).await;
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) = post_json(
        &app,
        "/createStudentAccount",
        &json!({"studentEmail": "bob@acme.edu"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.unwrap(), json!({"error": "Internal Server Error"}));
}

#[tokio::test]
async fn test_create_student_uses_oldest_school_for_shared_domain() {
    let keycloak = MockKeycloakServer::new().await;
    keycloak.mock_create_user_success("uid-2").await;
    let state = TestAppState::with_mock_keycloak(&keycloak);
    state
        .school_repo
        .add_school(SchoolRegistration {
            school_name: "Newer".to_string(),
            shared_password: "newer-pass".to_string(),
            registered_at: Utc::now(),
            ..acme()
        })
        .await;
    state
        .school_repo
        .add_school(SchoolRegistration {
            school_name: "Older".to_string(),
            shared_password: "older-pass".to_string(),
            registered_at: Utc::now() - Duration::days(1),
            ..acme()
        })
        .await;
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) = post_json(
        &app,
        "/createStudentAccount",
        &json!({"studentEmail": "bob@acme.edu"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["passwordAssigned"], "older-pass");
}

#[tokio::test]
async fn test_create_student_rejects_non_post() {
    let keycloak = MockKeycloakServer::new().await;
    keycloak.expect_no_user_creation().await;
    let state = TestAppState::with_mock_keycloak(&keycloak);
    state.school_repo.add_school(acme()).await;
    let app = build_test_router(state.clone());

    let (status, body): (_, Option<Value>) = request_raw(
        &app,
        Method::GET,
        "/createStudentAccount",
        None,
        "",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap(), json!({"error": "POST request expected"}));
    assert_eq!(state.school_repo.query_count(), 0);
}

#[tokio::test]
async fn test_create_student_store_failure_is_opaque() {
    let keycloak = MockKeycloakServer::new().await;
    keycloak.expect_no_user_creation().await;
    let state = TestAppState::with_mock_keycloak(&keycloak);
    state.school_repo.set_failing(true);
    let app = build_test_router(state);

    let (status, body): (_, Option<Value>) = post_json(
        &app,
        "/createStudentAccount",
        &json!({"studentEmail": "bob@acme.edu"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.unwrap(), json!({"error": "Internal Server Error"}));
}
