// ABOUTME: HTTP API layer for Stockroom providing REST endpoints and routing
// ABOUTME: Integration layer over the inventory domain package

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use stockroom_inventory::DbState;

pub mod health;
pub mod opening_stock_handlers;
pub mod response;

/// Creates the opening-stock API router (nested under /api/inventory/opening-stock)
pub fn create_opening_stock_router() -> Router<DbState> {
    Router::new()
        .route("/", get(opening_stock_handlers::list_opening_stock))
        .route("/", post(opening_stock_handlers::create_opening_stock))
        .route("/", put(opening_stock_handlers::bulk_import_opening_stock))
        .route("/{id}", get(opening_stock_handlers::get_opening_stock))
        .route("/{id}", delete(opening_stock_handlers::delete_opening_stock))
        .route(
            "/{id}/approve",
            post(opening_stock_handlers::approve_opening_stock),
        )
}
