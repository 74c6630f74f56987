//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use forum_server::config::{
    CorsSettings, DatabaseSettings, JwtSettings, ServerSettings, Settings, StorageBackend,
    StorageSettings,
};
use forum_server::startup::{build_router, AppState};

pub const TEST_PASSWORD: &str = "TestPassword123!";

/// Settings for a router over a fresh in-memory store.
pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: String::new(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout: 1,
        },
        storage: StorageSettings {
            backend: StorageBackend::Memory,
        },
        jwt: JwtSettings {
            secret: "integration-test-secret-with-at-least-32-chars".into(),
            access_token_expiry_minutes: 15,
        },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        environment: "test".into(),
    }
}

/// Decoded response: status and JSON body (`Value::Null` for an empty body).
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    async fn from_response(response: Response) -> Self {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        Self { status, body }
    }

    /// `code` of every entry in the error list.
    pub fn error_codes(&self) -> Vec<String> {
        self.body["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .map(|e| e["code"].as_str().unwrap_or_default().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Test application builder
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        Self {
            router: build_router(AppState::in_memory(test_settings())),
        }
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        TestResponse::from_response(response).await
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with a raw body and optional bearer token
    pub async fn post_raw(&self, uri: &str, body: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.post_raw(uri, &body.to_string(), None).await
    }

    /// Make an authenticated POST request with JSON body
    pub async fn post_json_auth(&self, uri: &str, body: &Value, token: &str) -> TestResponse {
        self.post_raw(uri, &body.to_string(), Some(token)).await
    }

    /// Register an account and return its access token.
    pub async fn register(&self, username: &str, admin: bool) -> String {
        let response = self
            .post_json(
                "/api/v1/user",
                &json!({ "username": username, "password": TEST_PASSWORD, "admin": admin }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);

        response.body["accessToken"].as_str().unwrap().to_string()
    }

    /// Create a category as the given administrator.
    pub async fn create_category(&self, admin_token: &str, name: &str) {
        let response = self
            .post_json_auth("/api/v1/category", &json!({ "name": name }), admin_token)
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    }

    /// Create a thread and return its id.
    pub async fn create_thread(&self, token: &str, name: &str, category: &str) -> i64 {
        let response = self
            .post_json_auth(
                "/api/v1/thread",
                &json!({ "name": name, "category": category }),
                token,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);

        response.body["id"].as_i64().unwrap()
    }

    /// Create a post and return the response body.
    pub async fn create_post(
        &self,
        token: &str,
        thread_id: i64,
        content: &str,
        replying_to_id: Option<i64>,
    ) -> Value {
        let mut payload = json!({ "content": content, "threadId": thread_id });
        if let Some(id) = replying_to_id {
            payload["replyingToId"] = json!(id);
        }

        let response = self.post_json_auth("/api/v1/post", &payload, token).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);

        response.body
    }
}

/// A forum with an admin, a regular user, a category and one thread.
pub struct Seeded {
    pub app: TestApp,
    pub admin_token: String,
    pub user_token: String,
    pub thread_id: i64,
}

pub async fn seeded() -> Seeded {
    let app = TestApp::new();
    let admin_token = app.register("username", true).await;
    let user_token = app.register("username1", false).await;
    app.create_category(&admin_token, "category_name").await;
    let thread_id = app
        .create_thread(&admin_token, "thread", "category_name")
        .await;

    Seeded {
        app,
        admin_token,
        user_token,
        thread_id,
    }
}

/// Generate a unique test username
pub fn unique_username() -> String {
    format!("user_{}", &uuid::Uuid::new_v4().to_string()[..8])
}
