// ABOUTME: Route assembly for the Stockroom server
// ABOUTME: Mounts the API routers under /api with shared database state

use axum::{routing::get, Router};

use stockroom_api::{create_opening_stock_router, health};
use stockroom_inventory::DbState;

/// Build the complete application router
pub fn create_router(db: DbState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .nest(
            "/api/inventory/opening-stock",
            create_opening_stock_router(),
        )
        .with_state(db)
}
