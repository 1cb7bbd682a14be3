use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use opsdeck::config::Config;

/// A running test server instance with a dedicated in-memory database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Create a button from the given request body, asserting success.
    pub async fn create_button(&self, body: &Value) -> Value {
        let resp = self
            .client
            .post(self.url("/api/v1/buttons"))
            .json(body)
            .send()
            .await
            .expect("create button failed");
        assert_eq!(resp.status(), StatusCode::CREATED, "create button non-201");
        resp.json().await.unwrap()
    }

    /// Create a button on behalf of a specific caller.
    pub async fn create_button_as(&self, caller: &str, body: &Value) -> Value {
        let resp = self
            .client
            .post(self.url("/api/v1/buttons"))
            .header("x-caller", caller)
            .json(body)
            .send()
            .await
            .expect("create button failed");
        assert_eq!(resp.status(), StatusCode::CREATED, "create button non-201");
        resp.json().await.unwrap()
    }

    /// Invoke a button, return (body, status).
    pub async fn execute(&self, id: i64, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(&format!("/api/v1/buttons/{id}/execute")))
            .json(body)
            .send()
            .await
            .expect("execute request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Invoke a button on behalf of a specific caller.
    pub async fn execute_as(&self, caller: &str, id: i64, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(&format!("/api/v1/buttons/{id}/execute")))
            .header("x-caller", caller)
            .json(body)
            .send()
            .await
            .expect("execute request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make a GET request, return (body, status).
    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make a POST request with JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make a DELETE request.
    pub async fn delete(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Number of execution log rows recorded for a button.
    pub async fn log_count(&self, button_id: i64) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM execution_log WHERE button_id = ?")
            .bind(button_id)
            .fetch_one(&self.pool)
            .await
            .expect("log count query failed")
    }

    /// Total execution log rows across all buttons.
    pub async fn total_log_count(&self) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM execution_log")
            .fetch_one(&self.pool)
            .await
            .expect("log count query failed")
    }
}

/// Minimal valid create request targeting `endpoint`.
pub fn button_body(label: &str, method: &str, endpoint: &str) -> Value {
    json!({
        "label": label,
        "kind": "REST_API_CALL",
        "target_endpoint": endpoint,
        "http_method": method,
        "output_format": "JSON",
    })
}

/// Spawn a test app with a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        connect_timeout_secs: 2,
        request_timeout_secs: 2,
        max_body_size: 1_048_576,
        allowed_origins: vec![],
        log_level: "warn".to_string(),
    };

    let app = opsdeck::build_app(pool.clone(), config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::new();

    TestApp { addr, pool, client }
}
