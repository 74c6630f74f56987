//! Category API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_admin_creates_and_lists_categories() {
    let app = TestApp::new();
    let admin = app.register("admin", true).await;

    app.create_category(&admin, "zebra").await;
    app.create_category(&admin, "apple").await;

    let response = app.get("/api/v1/category").await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["apple", "zebra"]);
}

#[tokio::test]
async fn test_non_admin_cannot_create_category() {
    let app = TestApp::new();
    app.register("admin", true).await;
    let user = app.register("username", false).await;

    let response = app
        .post_json_auth("/api/v1/category", &json!({ "name": "category_name" }), &user)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_codes(), vec!["request_not_authorized"]);
}

#[tokio::test]
async fn test_duplicate_category_is_rejected() {
    let app = TestApp::new();
    let admin = app.register("admin", true).await;
    app.create_category(&admin, "category_name").await;

    let response = app
        .post_json_auth("/api/v1/category", &json!({ "name": "category_name" }), &admin)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_codes(), vec!["invalid_parameter"]);
    assert_eq!(response.body["errors"][0]["parameter"], json!("name"));
}

#[tokio::test]
async fn test_category_name_must_be_a_string() {
    let app = TestApp::new();
    let admin = app.register("admin", true).await;

    let response = app
        .post_json_auth("/api/v1/category", &json!({ "name": 5 }), &admin)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_codes(), vec!["invalid_parameter_type"]);
}

#[tokio::test]
async fn test_long_category_name_is_accepted() {
    let app = TestApp::new();
    let admin = app.register("admin", true).await;
    let name = "c".repeat(250);

    let response = app
        .post_json_auth("/api/v1/category", &json!({ "name": name }), &admin)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], json!(name));
}
