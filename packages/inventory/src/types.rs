// ABOUTME: Inventory type definitions
// ABOUTME: Structures for GRNs, line items, ingestion inputs, and outcome reports

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GrnStatus {
    Draft,
    Approved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GrnType {
    OpeningStock,
}

/// Goods-received-note header record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grn {
    pub id: String,
    pub grn_number: String,
    pub grn_type: GrnType,
    pub supplier_id: String,
    pub warehouse_id: String,
    pub status: GrnStatus,
    pub notes: Option<String>,
    pub created_by_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// GRN line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrnItem {
    pub id: String,
    pub grn_id: String,
    pub product_id: String,
    pub quantity_received: f64,
    pub batch_number: Option<String>,
    pub unit_cost: f64,
    pub expiry_date: Option<NaiveDate>,
}

/// GRN header together with its line items
#[derive(Debug, Clone, Serialize)]
pub struct GrnWithItems {
    #[serde(flatten)]
    pub grn: Grn,
    pub items: Vec<GrnItem>,
}

/// One line of a single-GRN ingestion request.
/// Required fields are optional here so validation can answer with a 400
/// and a specific message instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct OpeningStockItemInput {
    pub product_id: Option<String>,
    pub quantity: Option<f64>,
    pub batch_number: Option<String>,
    pub unit_cost: Option<f64>,
    pub expiry_date: Option<NaiveDate>,
}

/// Request body for creating a single opening-stock GRN
#[derive(Debug, Clone, Deserialize)]
pub struct OpeningStockCreateInput {
    pub warehouse_id: Option<String>,
    pub items: Option<Vec<OpeningStockItemInput>>,
    pub notes: Option<String>,
    pub created_by_id: Option<String>,
}

/// One row of a bulk-import request; carries its own warehouse
#[derive(Debug, Clone, Deserialize)]
pub struct BulkRowInput {
    pub product_id: Option<String>,
    pub warehouse_id: Option<String>,
    pub quantity: Option<f64>,
    pub batch_number: Option<String>,
    pub unit_cost: Option<f64>,
    pub expiry_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Request body for bulk opening-stock import
#[derive(Debug, Clone, Deserialize)]
pub struct BulkImportInput {
    pub items: Option<Vec<BulkRowInput>>,
    pub created_by_id: Option<String>,
}

/// Response payload for a successful single creation
#[derive(Debug, Clone, Serialize)]
pub struct CreatedGrn {
    pub id: String,
    pub grn_number: String,
    pub status: GrnStatus,
    pub item_count: i64,
    pub message: String,
}

/// Per-row outcome of a bulk import (rows are 1-based)
#[derive(Debug, Clone, Serialize)]
pub struct BulkRowOutcome {
    pub row: usize,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grn_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grn_number: Option<String>,
}

/// Aggregate report for a bulk import
#[derive(Debug, Clone, Serialize)]
pub struct BulkImportReport {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<BulkRowOutcome>,
}

/// Listing row: GRN summary with aggregate line-item figures
#[derive(Debug, Clone, Serialize)]
pub struct GrnSummary {
    pub id: String,
    pub grn_number: String,
    pub status: GrnStatus,
    pub supplier_name: String,
    pub warehouse_name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub item_count: i64,
    pub total_quantity: f64,
}

/// Validated line ready for insertion (internal to the ingestion flow)
#[derive(Debug, Clone)]
pub struct NewGrnItem {
    pub product_id: String,
    pub quantity: f64,
    pub batch_number: Option<String>,
    pub unit_cost: f64,
    pub expiry_date: Option<NaiveDate>,
}

/// Validated GRN ready for insertion (internal to the ingestion flow)
#[derive(Debug, Clone)]
pub struct NewGrn {
    pub warehouse_id: String,
    pub items: Vec<NewGrnItem>,
    pub notes: Option<String>,
    pub created_by_id: Option<String>,
}
