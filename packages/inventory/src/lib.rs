// ABOUTME: Inventory domain logic for Stockroom
// ABOUTME: Opening-stock GRN ingestion, approval, and read-side queries

pub mod db;
pub mod error;
pub mod service;
pub mod storage;
pub mod suppliers;
pub mod types;

// Re-export main types
pub use db::DbState;
pub use error::{InventoryError, InventoryResult};
pub use service::OpeningStockService;
pub use storage::GrnStorage;
pub use suppliers::{SupplierStorage, OPENING_STOCK_SUPPLIER};
pub use types::{
    BulkImportInput, BulkImportReport, BulkRowInput, BulkRowOutcome, CreatedGrn, Grn, GrnItem,
    GrnStatus, GrnSummary, GrnType, GrnWithItems, NewGrn, NewGrnItem, OpeningStockCreateInput,
    OpeningStockItemInput,
};
