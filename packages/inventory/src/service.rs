// ABOUTME: Opening-stock ingestion service
// ABOUTME: Request validation, duplicate checks, and bulk-import orchestration

use std::sync::Arc;

use tracing::{debug, info};

use stockroom_storage::{PageInfo, PaginationParams};

use crate::error::{InventoryError, InventoryResult};
use crate::storage::GrnStorage;
use crate::types::{
    BulkImportInput, BulkImportReport, BulkRowInput, BulkRowOutcome, CreatedGrn, GrnSummary,
    GrnWithItems, NewGrn, NewGrnItem, OpeningStockCreateInput,
};

pub struct OpeningStockService {
    grns: Arc<GrnStorage>,
}

impl OpeningStockService {
    pub fn new(grns: Arc<GrnStorage>) -> Self {
        Self { grns }
    }

    /// Validate and create one opening-stock GRN in draft status.
    /// Validation short-circuits in request order: warehouse, items
    /// non-empty, per-item fields, then the duplicate guard.
    pub async fn ingest(&self, input: OpeningStockCreateInput) -> InventoryResult<CreatedGrn> {
        let warehouse_id = match input.warehouse_id.as_deref() {
            Some(w) if !w.trim().is_empty() => w.to_string(),
            _ => {
                return Err(InventoryError::Validation(
                    "Warehouse is required".to_string(),
                ))
            }
        };

        let items = input.items.unwrap_or_default();
        if items.is_empty() {
            return Err(InventoryError::Validation(
                "At least one item is required".to_string(),
            ));
        }

        let mut prepared = Vec::with_capacity(items.len());
        for item in &items {
            let product_id = match item.product_id.as_deref() {
                Some(p) if !p.trim().is_empty() => p.to_string(),
                _ => {
                    return Err(InventoryError::Validation(
                        "Product is required for all items".to_string(),
                    ))
                }
            };
            let quantity = item.quantity.unwrap_or(0.0);
            if quantity <= 0.0 {
                return Err(InventoryError::Validation(
                    "Quantity must be greater than zero".to_string(),
                ));
            }
            prepared.push(NewGrnItem {
                product_id,
                quantity,
                batch_number: item.batch_number.clone(),
                unit_cost: item.unit_cost.unwrap_or(0.0),
                expiry_date: item.expiry_date,
            });
        }

        for item in &prepared {
            self.check_duplicate(&warehouse_id, &item.product_id).await?;
        }

        let item_count = prepared.len() as i64;
        let grn = self
            .grns
            .create_opening_stock(&NewGrn {
                warehouse_id,
                items: prepared,
                notes: input.notes,
                created_by_id: input.created_by_id,
            })
            .await?;

        info!("Created opening-stock GRN {}", grn.grn_number);

        Ok(CreatedGrn {
            id: grn.id,
            grn_number: grn.grn_number,
            status: grn.status,
            item_count,
            message: "Opening stock GRN created in draft status".to_string(),
        })
    }

    /// Bulk import: every row is processed independently and reported
    /// individually; a failing row never aborts the batch.
    pub async fn bulk_ingest(&self, input: BulkImportInput) -> InventoryResult<BulkImportReport> {
        let rows = input.items.unwrap_or_default();
        if rows.is_empty() {
            return Err(InventoryError::Validation(
                "At least one item is required".to_string(),
            ));
        }

        let created_by_id = input.created_by_id;
        let mut results = Vec::with_capacity(rows.len());
        let mut successful = 0;
        let mut failed = 0;

        for (idx, row) in rows.iter().enumerate() {
            match self.ingest_row(row, created_by_id.as_deref()).await {
                Ok((grn_id, grn_number)) => {
                    successful += 1;
                    results.push(BulkRowOutcome {
                        row: idx + 1,
                        success: true,
                        message: format!("Created GRN {}", grn_number),
                        grn_id: Some(grn_id),
                        grn_number: Some(grn_number),
                    });
                }
                Err(e) => {
                    failed += 1;
                    debug!("Bulk row {} failed: {}", idx + 1, e.message());
                    results.push(BulkRowOutcome {
                        row: idx + 1,
                        success: false,
                        message: e.message(),
                        grn_id: None,
                        grn_number: None,
                    });
                }
            }
        }

        info!(
            "Bulk opening-stock import: {} succeeded, {} failed of {}",
            successful,
            failed,
            rows.len()
        );

        Ok(BulkImportReport {
            total: rows.len(),
            successful,
            failed,
            results,
        })
    }

    /// Paginated listing of opening-stock GRN summaries
    pub async fn list(
        &self,
        params: &PaginationParams,
    ) -> InventoryResult<(Vec<GrnSummary>, PageInfo)> {
        let (limit, offset) = params.validate();
        let (rows, total) = self.grns.list_opening_stock(limit, offset).await?;
        Ok((rows, PageInfo::new(params, total)))
    }

    /// Fetch one GRN with its line items
    pub async fn get(&self, id: &str) -> InventoryResult<GrnWithItems> {
        self.grns
            .get_with_items(id)
            .await?
            .ok_or_else(|| InventoryError::NotFound(format!("GRN {} not found", id)))
    }

    /// Approve a draft GRN, enforcing the one-approved-GRN-per-pair invariant
    pub async fn approve(&self, id: &str) -> InventoryResult<crate::types::Grn> {
        self.grns.approve(id).await
    }

    /// Soft-delete a draft GRN
    pub async fn delete(&self, id: &str) -> InventoryResult<()> {
        self.grns.soft_delete(id).await
    }

    async fn ingest_row(
        &self,
        row: &BulkRowInput,
        created_by_id: Option<&str>,
    ) -> InventoryResult<(String, String)> {
        let product_id = row.product_id.as_deref().unwrap_or("").trim().to_string();
        let warehouse_id = row.warehouse_id.as_deref().unwrap_or("").trim().to_string();
        let quantity = row.quantity;

        if product_id.is_empty() || warehouse_id.is_empty() || quantity.is_none() {
            return Err(InventoryError::Validation(
                "Product, warehouse and quantity are required".to_string(),
            ));
        }
        let quantity = quantity.unwrap_or(0.0);
        if quantity <= 0.0 {
            return Err(InventoryError::Validation(
                "Quantity must be greater than zero".to_string(),
            ));
        }

        self.check_duplicate(&warehouse_id, &product_id).await?;

        let grn = self
            .grns
            .create_opening_stock(&NewGrn {
                warehouse_id,
                items: vec![NewGrnItem {
                    product_id,
                    quantity,
                    batch_number: row.batch_number.clone(),
                    unit_cost: row.unit_cost.unwrap_or(0.0),
                    expiry_date: row.expiry_date,
                }],
                notes: row.notes.clone(),
                created_by_id: created_by_id.map(str::to_string),
            })
            .await?;

        Ok((grn.id, grn.grn_number))
    }

    async fn check_duplicate(&self, warehouse_id: &str, product_id: &str) -> InventoryResult<()> {
        if self.grns.approved_pair_exists(warehouse_id, product_id).await? {
            let code = self
                .grns
                .product_code(product_id)
                .await?
                .unwrap_or_else(|| product_id.to_string());
            return Err(InventoryError::Conflict(format!(
                "Opening stock already exists for product {} in this warehouse",
                code
            )));
        }
        Ok(())
    }
}
