// ABOUTME: Shared API response types and error handling
// ABOUTME: Provides the uniform envelope and status mapping for domain errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::Serialize;

use stockroom_inventory::{InventoryError, InventoryResult};
use stockroom_storage::PageInfo;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            pagination: None,
        }
    }

    pub fn paginated(data: T, pagination: PageInfo) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            pagination: Some(pagination),
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            pagination: None,
        }
    }
}

/// Convert a domain error into an HTTP response.
/// Storage errors pass the underlying message through, per the API contract.
pub fn error_response(error: InventoryError) -> Response {
    let status = match &error {
        InventoryError::Validation(_) => StatusCode::BAD_REQUEST,
        InventoryError::Conflict(_) => StatusCode::CONFLICT,
        InventoryError::NotFound(_) => StatusCode::NOT_FOUND,
        InventoryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        ResponseJson(ApiResponse::<()>::error(error.message())),
    )
        .into_response()
}

/// 200 on success, mapped status on error
pub fn ok_or_error<T: Serialize>(result: InventoryResult<T>) -> Response {
    match result {
        Ok(data) => (StatusCode::OK, ResponseJson(ApiResponse::success(data))).into_response(),
        Err(e) => error_response(e),
    }
}

/// 201 on success, mapped status on error
pub fn created_or_error<T: Serialize>(result: InventoryResult<T>) -> Response {
    match result {
        Ok(data) => (
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(data)),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
