// ABOUTME: HTTP request handlers for opening-stock GRN operations
// ABOUTME: Listing, single and bulk ingestion, detail, approval, soft delete

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use tracing::info;

use stockroom_inventory::{BulkImportInput, DbState, OpeningStockCreateInput};
use stockroom_storage::PaginationParams;

use super::response::{created_or_error, error_response, ok_or_error, ApiResponse};

/// Paginated listing of opening-stock GRNs
pub async fn list_opening_stock(
    State(db): State<DbState>,
    Query(pagination): Query<PaginationParams>,
) -> impl IntoResponse {
    info!(
        "Listing opening-stock GRNs (page: {}, limit: {})",
        pagination.page(),
        pagination.limit()
    );

    match db.opening_stock.list(&pagination).await {
        Ok((rows, page_info)) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::paginated(rows, page_info)),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Create one opening-stock GRN from a warehouse and an item list
pub async fn create_opening_stock(
    State(db): State<DbState>,
    Json(input): Json<OpeningStockCreateInput>,
) -> impl IntoResponse {
    info!("Creating opening-stock GRN");

    created_or_error(db.opening_stock.ingest(input).await)
}

/// Bulk-create opening-stock GRNs, one per input row, with per-row reporting
pub async fn bulk_import_opening_stock(
    State(db): State<DbState>,
    Json(input): Json<BulkImportInput>,
) -> impl IntoResponse {
    info!(
        "Bulk opening-stock import ({} rows)",
        input.items.as_ref().map(Vec::len).unwrap_or(0)
    );

    ok_or_error(db.opening_stock.bulk_ingest(input).await)
}

/// Get a single GRN with its line items
pub async fn get_opening_stock(
    State(db): State<DbState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Getting opening-stock GRN: {}", id);

    ok_or_error(db.opening_stock.get(&id).await)
}

/// Approve a draft GRN, finalizing its opening stock
pub async fn approve_opening_stock(
    State(db): State<DbState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Approving opening-stock GRN: {}", id);

    ok_or_error(db.opening_stock.approve(&id).await)
}

/// Soft-delete a draft GRN
pub async fn delete_opening_stock(
    State(db): State<DbState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting opening-stock GRN: {}", id);

    let result = db.opening_stock.delete(&id).await.map(|_| {
        serde_json::json!({
            "message": format!("GRN {} deleted successfully", id)
        })
    });

    ok_or_error(result)
}
