// ABOUTME: Common test utilities for integration tests
// ABOUTME: Provides test server setup, seed helpers, and HTTP client utilities

use axum::{routing::get, Router};
use chrono::Utc;
use sqlx::SqlitePool;

use stockroom_api::{create_opening_stock_router, health};
use stockroom_core::generate_entity_id;
use stockroom_inventory::DbState;

/// Test context containing server URL and database pool
pub struct TestContext {
    pub base_url: String,
    pub pool: SqlitePool,
}

/// Create a test server with an isolated in-memory database
pub async fn setup_test_server() -> TestContext {
    let db = DbState::init_memory()
        .await
        .expect("Failed to initialize test database");
    let pool = db.pool.clone();

    let app = Router::new()
        .route("/api/health", get(health::health_check))
        .nest(
            "/api/inventory/opening-stock",
            create_opening_stock_router(),
        )
        .with_state(db);

    // Bind to random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    // Spawn server
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    TestContext { base_url, pool }
}

/// Helper to make GET requests
pub async fn get_req(base_url: &str, path: &str) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .get(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make GET request")
}

/// Helper to make POST requests with JSON body
pub async fn post_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .post(format!("{}{}", base_url, path))
        .json(body)
        .send()
        .await
        .expect("Failed to make POST request")
}

/// Helper to make POST requests with no body
#[allow(dead_code)]
pub async fn post_empty(base_url: &str, path: &str) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .post(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make POST request")
}

/// Helper to make PUT requests with JSON body
#[allow(dead_code)]
pub async fn put_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .put(format!("{}{}", base_url, path))
        .json(body)
        .send()
        .await
        .expect("Failed to make PUT request")
}

/// Helper to make DELETE requests
#[allow(dead_code)]
pub async fn delete_req(base_url: &str, path: &str) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .delete(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make DELETE request")
}

/// Create a test warehouse in the database
pub async fn create_test_warehouse(pool: &SqlitePool, name: &str) -> String {
    let id = generate_entity_id();
    sqlx::query("INSERT INTO warehouses (id, name, created_at) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(name)
        .bind(Utc::now())
        .execute(pool)
        .await
        .expect("Failed to create test warehouse");
    id
}

/// Create a test product in the database
pub async fn create_test_product(pool: &SqlitePool, name: &str, code: &str) -> String {
    let id = generate_entity_id();
    sqlx::query("INSERT INTO products (id, name, code, created_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(name)
        .bind(code)
        .bind(Utc::now())
        .execute(pool)
        .await
        .expect("Failed to create test product");
    id
}

/// Count GRN header rows regardless of status
#[allow(dead_code)]
pub async fn count_grns(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM goods_received_notes")
        .fetch_one(pool)
        .await
        .expect("Failed to count GRNs")
}
