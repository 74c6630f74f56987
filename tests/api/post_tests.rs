//! Post API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use crate::common::{seeded, TestApp};

#[tokio::test]
async fn test_create_top_level_post() {
    let s = seeded().await;

    let response = s
        .app
        .post_json_auth(
            "/api/v1/post",
            &json!({ "content": "content", "threadId": s.thread_id }),
            &s.user_token,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let post = &response.body;
    assert_eq!(post["content"], json!("<p>content</p>\n"));
    assert_eq!(post["threadId"], json!(s.thread_id));
    assert_eq!(post["replyingToId"], json!(null));
    assert_eq!(post["replyingToUsername"], json!(null));
    assert_eq!(post["Replies"], json!([]));
    assert_eq!(post["User"]["username"], json!("username1"));
    assert_eq!(post["Thread"]["id"], json!(s.thread_id));
    assert_eq!(post["Thread"]["Category"]["name"], json!("category_name"));
}

#[tokio::test]
async fn test_markdown_is_rendered() {
    let s = seeded().await;

    let post = s
        .app
        .create_post(&s.user_token, s.thread_id, "**bold** and _em_", None)
        .await;

    assert_eq!(
        post["content"],
        json!("<p><strong>bold</strong> and <em>em</em></p>\n")
    );
}

#[tokio::test]
async fn test_reply_is_linked_both_ways() {
    let s = seeded().await;
    let original = s
        .app
        .create_post(&s.admin_token, s.thread_id, "original", None)
        .await;
    let original_id = original["id"].as_i64().unwrap();

    let reply = s
        .app
        .create_post(&s.user_token, s.thread_id, "reply", Some(original_id))
        .await;
    assert_eq!(reply["replyingToId"], json!(original_id));
    assert_eq!(reply["replyingToUsername"], json!("username"));

    let response = s.app.get(&format!("/api/v1/post/{}", original_id)).await;
    assert_eq!(response.status, StatusCode::OK);
    let replies = response.body["Replies"].as_array().unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["id"], reply["id"]);
    assert_eq!(replies[0]["replyingToUsername"], json!("username"));
    assert_eq!(replies[0]["User"]["username"], json!("username1"));

    let response = s
        .app
        .get(&format!("/api/v1/post/{}", reply["id"].as_i64().unwrap()))
        .await;
    assert_eq!(response.body["replyingToUsername"], json!("username"));
    assert_eq!(response.body["Replies"], json!([]));
}

#[tokio::test]
async fn test_reply_must_be_in_same_thread() {
    let s = seeded().await;
    let other = s
        .app
        .create_thread(&s.user_token, "other", "category_name")
        .await;
    let elsewhere = s.app.create_post(&s.user_token, other, "elsewhere", None).await;

    let response = s
        .app
        .post_json_auth(
            "/api/v1/post",
            &json!({
                "content": "reply",
                "threadId": s.thread_id,
                "replyingToId": elsewhere["id"],
            }),
            &s.user_token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_codes(), vec!["invalid_parameter"]);
    assert_eq!(response.body["errors"][0]["parameter"], json!("replyingToId"));
    assert_eq!(
        response.body["errors"][0]["message"],
        json!("replies must be in same thread")
    );
}

#[tokio::test]
async fn test_unknown_thread_and_reply_are_both_reported() {
    let s = seeded().await;

    let response = s
        .app
        .post_json_auth(
            "/api/v1/post",
            &json!({ "content": "content", "threadId": 999, "replyingToId": 999 }),
            &s.user_token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error_codes(),
        vec!["invalid_parameter", "invalid_parameter"]
    );
    assert_eq!(response.body["errors"][0]["parameter"], json!("threadId"));
    assert_eq!(
        response.body["errors"][0]["message"],
        json!("thread does not exist")
    );
    assert_eq!(response.body["errors"][1]["parameter"], json!("replyingToId"));
    assert_eq!(
        response.body["errors"][1]["message"],
        json!("post does not exist")
    );

    // Nothing was stored.
    let response = s.app.get("/api/v1/post/1").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[test_case(r#"{"content": "content", "threadId": 1}"# ; "valid payload")]
#[test_case(r#"{"content": 1}"# ; "invalid payload")]
#[test_case(r#"[1, 2"# ; "malformed body")]
#[tokio::test]
async fn test_unauthenticated_create_is_always_unauthorized(body: &str) {
    let s = seeded().await;

    let response = s.app.post_raw("/api/v1/post", body, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_codes(), vec!["request_not_authorized"]);
}

#[tokio::test]
async fn test_missing_parameters() {
    let s = seeded().await;

    let response = s
        .app
        .post_json_auth("/api/v1/post", &json!({}), &s.user_token)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error_codes(),
        vec!["missing_parameter", "missing_parameter"]
    );
    assert_eq!(response.body["errors"][0]["parameter"], json!("content"));
    assert_eq!(response.body["errors"][1]["parameter"], json!("threadId"));
}

#[tokio::test]
async fn test_invalid_parameter_types() {
    let s = seeded().await;

    let response = s
        .app
        .post_json_auth(
            "/api/v1/post",
            &json!({ "content": 123, "threadId": "1", "replyingToId": "1" }),
            &s.user_token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error_codes(),
        vec![
            "invalid_parameter_type",
            "invalid_parameter_type",
            "invalid_parameter_type"
        ]
    );
}

#[tokio::test]
async fn test_null_reply_target_is_a_top_level_post() {
    let s = seeded().await;

    let response = s
        .app
        .post_json_auth(
            "/api/v1/post",
            &json!({ "content": "content", "threadId": s.thread_id, "replyingToId": null }),
            &s.user_token,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["replyingToId"], json!(null));
}

#[test_case("invalid" ; "non numeric")]
#[test_case("999" ; "unknown")]
#[tokio::test]
async fn test_get_post_with_bad_id(id: &str) {
    let app = TestApp::new();

    let response = app.get(&format!("/api/v1/post/{}", id)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_codes(), vec!["invalid_parameter"]);
    assert_eq!(response.body["errors"][0]["parameter"], json!("id"));
    assert_eq!(
        response.body["errors"][0]["message"],
        json!("post does not exist")
    );
}
