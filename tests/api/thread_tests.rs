//! Thread API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use crate::common::{seeded, TestApp};

#[tokio::test]
async fn test_create_thread_expands_category_and_author() {
    let s = seeded().await;

    let response = s
        .app
        .post_json_auth(
            "/api/v1/thread",
            &json!({ "name": " à long thrËad, with lØts of àccents!!!\t", "category": "category_name" }),
            &s.user_token,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let thread = &response.body;
    assert_eq!(thread["name"], json!(" à long thrËad, with lØts of àccents!!!\t"));
    assert_eq!(thread["slug"], json!("a-long-thread-with-lots-of-accents"));
    assert_eq!(thread["Category"]["name"], json!("category_name"));
    assert_eq!(thread["User"]["username"], json!("username1"));
}

#[test_case(r#"{}"# ; "empty object")]
#[test_case(r#"{"name": 123, "category": 123}"# ; "wrong types")]
#[test_case(r#"{not json"# ; "malformed body")]
#[tokio::test]
async fn test_unauthenticated_create_is_always_unauthorized(body: &str) {
    let s = seeded().await;

    let response = s.app.post_raw("/api/v1/thread", body, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_codes(), vec!["request_not_authorized"]);
}

#[tokio::test]
async fn test_invalid_token_is_treated_as_anonymous() {
    let s = seeded().await;

    let response = s
        .app
        .post_json_auth(
            "/api/v1/thread",
            &json!({ "name": "thread1", "category": "category_name" }),
            "not-a-jwt",
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_account_unknown_to_store_is_unauthorized() {
    let s = seeded().await;
    let other = TestApp::new();
    let boss = other.register("boss", true).await;
    other.create_category(&boss, "c").await;

    // `username1` has id 2 in `s`; in `other` id 2 does not exist.
    let response = other
        .post_json_auth(
            "/api/v1/thread",
            &json!({ "name": "thread", "category": "c" }),
            &s.user_token,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_codes(), vec!["request_not_authorized"]);

    // Id 1 exists in both stores but belongs to someone else here.
    let response = other
        .post_json_auth(
            "/api/v1/thread",
            &json!({ "name": "thread", "category": "c" }),
            &s.admin_token,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_parameters_are_all_reported() {
    let s = seeded().await;

    let response = s
        .app
        .post_raw("/api/v1/thread", "", Some(&s.user_token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error_codes(),
        vec!["missing_parameter", "missing_parameter"]
    );
    assert_eq!(response.body["errors"][0]["parameter"], json!("name"));
    assert_eq!(response.body["errors"][1]["parameter"], json!("category"));
}

#[tokio::test]
async fn test_invalid_parameter_types_are_all_reported() {
    let s = seeded().await;

    let response = s
        .app
        .post_json_auth(
            "/api/v1/thread",
            &json!({ "name": 123, "category": 123 }),
            &s.user_token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error_codes(),
        vec!["invalid_parameter_type", "invalid_parameter_type"]
    );
}

#[tokio::test]
async fn test_unknown_category_persists_nothing() {
    let s = seeded().await;

    let response = s
        .app
        .post_json_auth(
            "/api/v1/thread",
            &json!({ "name": "thread1", "category": "non-existent" }),
            &s.user_token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_codes(), vec!["invalid_category"]);

    // Only the seeded thread exists.
    let next = s.app.get(&format!("/api/v1/thread/{}", s.thread_id + 1)).await;
    assert_eq!(next.status, StatusCode::BAD_REQUEST);
}

#[test_case("invalid" ; "non numeric")]
#[test_case("999" ; "unknown")]
#[tokio::test]
async fn test_get_thread_with_bad_id(id: &str) {
    let app = TestApp::new();

    let response = app.get(&format!("/api/v1/thread/{}", id)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_codes(), vec!["invalid_parameter"]);
    assert_eq!(response.body["errors"][0]["parameter"], json!("id"));
    assert_eq!(
        response.body["errors"][0]["message"],
        json!("thread does not exist")
    );
}

#[tokio::test]
async fn test_get_thread_without_posts() {
    let s = seeded().await;

    let response = s.app.get(&format!("/api/v1/thread/{}", s.thread_id)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["thread"]["Posts"], json!([]));
    assert_eq!(response.body["meta"], json!({}));
}

#[tokio::test]
async fn test_pagination_over_thirty_posts() {
    let s = seeded().await;
    let mut ids = Vec::new();
    for i in 0..30 {
        let post = s
            .app
            .create_post(&s.user_token, s.thread_id, &format!("POST {}", i), None)
            .await;
        ids.push(post["id"].as_i64().unwrap());
    }

    let page_ids = |body: &serde_json::Value| -> Vec<i64> {
        body["thread"]["Posts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect()
    };

    let first = s.app.get(&format!("/api/v1/thread/{}", s.thread_id)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(page_ids(&first.body), ids[0..10].to_vec());
    assert_eq!(first.body["meta"]["lastId"], json!(ids[9]));
    assert_eq!(first.body["thread"]["Posts"][0]["content"], json!("<p>POST 0</p>\n"));
    assert_eq!(first.body["thread"]["Posts"][0]["User"]["username"], json!("username1"));

    let second = s
        .app
        .get(&format!("/api/v1/thread/{}?lastId={}", s.thread_id, ids[9]))
        .await;
    assert_eq!(page_ids(&second.body), ids[10..20].to_vec());
    assert_eq!(second.body["meta"]["lastId"], json!(ids[19]));

    let last = s
        .app
        .get(&format!("/api/v1/thread/{}?lastId={}", s.thread_id, ids[29]))
        .await;
    assert_eq!(page_ids(&last.body), Vec::<i64>::new());
    assert!(last.body["meta"].get("lastId").is_none());

    for cursor in ["1000", "invalid"] {
        let response = s
            .app
            .get(&format!("/api/v1/thread/{}?lastId={}", s.thread_id, cursor))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(page_ids(&response.body), Vec::<i64>::new());
    }
}

#[tokio::test]
async fn test_cursor_from_another_thread_gives_empty_page() {
    let s = seeded().await;
    let other = s
        .app
        .create_thread(&s.user_token, "other", "category_name")
        .await;
    let foreign = s.app.create_post(&s.user_token, other, "elsewhere", None).await;
    s.app.create_post(&s.user_token, s.thread_id, "here", None).await;

    let response = s
        .app
        .get(&format!(
            "/api/v1/thread/{}?lastId={}",
            s.thread_id,
            foreign["id"].as_i64().unwrap()
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["thread"]["Posts"], json!([]));
}
