//! Account API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{unique_username, TestApp, TEST_PASSWORD};

#[tokio::test]
async fn test_register_returns_user_and_token() {
    let app = TestApp::new();
    let username = unique_username();

    let response = app
        .post_json(
            "/api/v1/user",
            &json!({ "username": username, "password": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["username"], json!(username));
    assert_eq!(response.body["tokenType"], json!("Bearer"));
    assert!(response.body["accessToken"].is_string());
    assert!(response.body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_only_first_account_becomes_admin() {
    let app = TestApp::new();

    let first = app
        .post_json(
            "/api/v1/user",
            &json!({ "username": "admin", "password": TEST_PASSWORD, "admin": true }),
        )
        .await;
    let second = app
        .post_json(
            "/api/v1/user",
            &json!({ "username": "someone", "password": TEST_PASSWORD, "admin": true }),
        )
        .await;

    assert_eq!(first.body["user"]["admin"], json!(true));
    assert_eq!(second.body["user"]["admin"], json!(false));
}

#[tokio::test]
async fn test_register_with_short_password_fails() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/v1/user",
            &json!({ "username": unique_username(), "password": "short" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_codes(), vec!["validation_error"]);
}

#[tokio::test]
async fn test_register_with_duplicate_username_fails() {
    let app = TestApp::new();
    let body = json!({ "username": "username", "password": TEST_PASSWORD });

    app.post_json("/api/v1/user", &body).await;
    let response = app.post_json("/api/v1/user", &body).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["code"], json!(409));
}

#[tokio::test]
async fn test_login_with_valid_credentials() {
    let app = TestApp::new();
    app.register("username", false).await;

    let response = app
        .post_json(
            "/api/v1/user/login",
            &json!({ "username": "username", "password": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["accessToken"].is_string());
    assert!(response.body["expiresIn"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    let app = TestApp::new();
    app.register("username", false).await;

    let wrong_password = app
        .post_json(
            "/api/v1/user/login",
            &json!({ "username": "username", "password": "WrongPassword" }),
        )
        .await;
    let unknown_user = app
        .post_json(
            "/api/v1/user/login",
            &json!({ "username": "nobody", "password": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
}
