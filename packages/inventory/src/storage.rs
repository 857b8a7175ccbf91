// ABOUTME: GRN storage layer using SQLite
// ABOUTME: Transactional opening-stock creation, duplicate guard, approval, and listing

use chrono::Utc;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::debug;

use stockroom_core::generate_entity_id;
use stockroom_storage::{StorageError, StorageResult};

use crate::error::{InventoryError, InventoryResult};
use crate::suppliers::resolve_opening_stock_supplier;
use crate::types::{Grn, GrnItem, GrnStatus, GrnSummary, GrnType, GrnWithItems, NewGrn};

pub struct GrnStorage {
    pool: SqlitePool,
}

impl GrnStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Duplicate guard: does an approved, non-deleted opening-stock GRN
    /// already contain a line for this (warehouse, product) pair?
    pub async fn approved_pair_exists(
        &self,
        warehouse_id: &str,
        product_id: &str,
    ) -> StorageResult<bool> {
        let mut conn = self.pool.acquire().await.map_err(StorageError::Sqlx)?;
        approved_pair_exists_on(&mut conn, warehouse_id, product_id, None).await
    }

    /// Display code for a product, used in conflict messages
    pub async fn product_code(&self, product_id: &str) -> StorageResult<Option<String>> {
        let mut conn = self.pool.acquire().await.map_err(StorageError::Sqlx)?;
        product_code_on(&mut conn, product_id).await
    }

    /// Create an opening-stock GRN in draft status. Supplier resolution,
    /// sequence claim, header insert, and item inserts share one
    /// transaction; any failure rolls the whole GRN back.
    pub async fn create_opening_stock(&self, input: &NewGrn) -> StorageResult<Grn> {
        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let supplier_id = resolve_opening_stock_supplier(&mut tx).await?;
        let grn_number = next_grn_number(&mut tx).await?;

        let id = generate_entity_id();
        let created_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO goods_received_notes
                (id, grn_number, grn_type, supplier_id, warehouse_id, status, notes, created_by_id, created_at)
            VALUES (?, ?, 'opening_stock', ?, ?, 'draft', ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&grn_number)
        .bind(&supplier_id)
        .bind(&input.warehouse_id)
        .bind(&input.notes)
        .bind(&input.created_by_id)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        for item in &input.items {
            sqlx::query(
                r#"
                INSERT INTO grn_items
                    (id, grn_id, product_id, quantity_received, batch_number, unit_cost, expiry_date)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(generate_entity_id())
            .bind(&id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(&item.batch_number)
            .bind(item.unit_cost)
            .bind(item.expiry_date)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;
        }

        tx.commit().await.map_err(StorageError::Sqlx)?;

        debug!("Created opening-stock GRN {} ({})", grn_number, id);

        Ok(Grn {
            id,
            grn_number,
            grn_type: GrnType::OpeningStock,
            supplier_id,
            warehouse_id: input.warehouse_id.clone(),
            status: GrnStatus::Draft,
            notes: input.notes.clone(),
            created_by_id: input.created_by_id.clone(),
            created_at,
            deleted_at: None,
        })
    }

    /// Paginated opening-stock summaries with aggregate item figures,
    /// newest first. Returns the page plus the total row count.
    pub async fn list_opening_stock(
        &self,
        limit: i64,
        offset: i64,
    ) -> StorageResult<(Vec<GrnSummary>, i64)> {
        let rows = sqlx::query(
            r#"
            SELECT g.id, g.grn_number, g.status, g.notes, g.created_at,
                   s.name AS supplier_name, w.name AS warehouse_name,
                   COUNT(i.id) AS item_count,
                   COALESCE(SUM(i.quantity_received), 0.0) AS total_quantity
            FROM goods_received_notes g
            JOIN suppliers s ON s.id = g.supplier_id
            JOIN warehouses w ON w.id = g.warehouse_id
            LEFT JOIN grn_items i ON i.grn_id = g.id
            WHERE g.grn_type = 'opening_stock' AND g.deleted_at IS NULL
            GROUP BY g.id, g.grn_number, g.status, g.notes, g.created_at, s.name, w.name
            ORDER BY g.created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            summaries.push(GrnSummary {
                id: row.try_get("id")?,
                grn_number: row.try_get("grn_number")?,
                status: row.try_get("status")?,
                supplier_name: row.try_get("supplier_name")?,
                warehouse_name: row.try_get("warehouse_name")?,
                notes: row.try_get("notes")?,
                created_at: row.try_get("created_at")?,
                item_count: row.try_get("item_count")?,
                total_quantity: row.try_get("total_quantity")?,
            });
        }

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM goods_received_notes \
             WHERE grn_type = 'opening_stock' AND deleted_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok((summaries, total))
    }

    /// Fetch a non-deleted GRN header with its line items
    pub async fn get_with_items(&self, id: &str) -> StorageResult<Option<GrnWithItems>> {
        let row = sqlx::query(
            "SELECT * FROM goods_received_notes WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let grn = row_to_grn(&row)?;

        let item_rows = sqlx::query("SELECT * FROM grn_items WHERE grn_id = ?")
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let mut items = Vec::with_capacity(item_rows.len());
        for item_row in &item_rows {
            items.push(GrnItem {
                id: item_row.try_get("id")?,
                grn_id: item_row.try_get("grn_id")?,
                product_id: item_row.try_get("product_id")?,
                quantity_received: item_row.try_get("quantity_received")?,
                batch_number: item_row.try_get("batch_number")?,
                unit_cost: item_row.try_get("unit_cost")?,
                expiry_date: item_row.try_get("expiry_date")?,
            });
        }

        Ok(Some(GrnWithItems { grn, items }))
    }

    /// Approve a draft GRN. Every line is re-checked against the duplicate
    /// guard inside the transaction, so the "at most one approved
    /// opening-stock GRN per (warehouse, product)" invariant holds at the
    /// moment the status flips.
    pub async fn approve(&self, id: &str) -> InventoryResult<Grn> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| InventoryError::Storage(StorageError::Sqlx(e)))?;

        let row = sqlx::query(
            "SELECT * FROM goods_received_notes WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        let Some(row) = row else {
            return Err(InventoryError::NotFound(format!("GRN {} not found", id)));
        };
        let mut grn = row_to_grn(&row)?;

        if grn.status != GrnStatus::Draft {
            return Err(InventoryError::Validation(
                "Only draft GRNs can be approved".to_string(),
            ));
        }

        let product_ids: Vec<String> =
            sqlx::query_scalar("SELECT product_id FROM grn_items WHERE grn_id = ?")
                .bind(id)
                .fetch_all(&mut *tx)
                .await
                .map_err(StorageError::Sqlx)?;

        for product_id in &product_ids {
            if approved_pair_exists_on(&mut tx, &grn.warehouse_id, product_id, Some(id)).await? {
                let code = product_code_on(&mut tx, product_id)
                    .await?
                    .unwrap_or_else(|| product_id.clone());
                return Err(InventoryError::Conflict(format!(
                    "Opening stock already exists for product {} in this warehouse",
                    code
                )));
            }
        }

        sqlx::query("UPDATE goods_received_notes SET status = 'approved' WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        tx.commit()
            .await
            .map_err(|e| InventoryError::Storage(StorageError::Sqlx(e)))?;

        debug!("Approved GRN {}", id);
        grn.status = GrnStatus::Approved;
        Ok(grn)
    }

    /// Soft-delete a draft GRN by setting its deletion timestamp
    pub async fn soft_delete(&self, id: &str) -> InventoryResult<()> {
        let row = sqlx::query(
            "SELECT status FROM goods_received_notes WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let Some(row) = row else {
            return Err(InventoryError::NotFound(format!("GRN {} not found", id)));
        };
        let status: GrnStatus = row.try_get("status").map_err(StorageError::Sqlx)?;
        if status == GrnStatus::Approved {
            return Err(InventoryError::Validation(
                "Approved GRNs cannot be deleted".to_string(),
            ));
        }

        sqlx::query("UPDATE goods_received_notes SET deleted_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        debug!("Soft-deleted GRN {}", id);
        Ok(())
    }
}

/// Claim the next GRN sequence number and format the display number.
/// The counter row is updated atomically within the caller's transaction,
/// so concurrent creates cannot observe the same sequence value.
async fn next_grn_number(conn: &mut SqliteConnection) -> StorageResult<String> {
    let seq: i64 = sqlx::query_scalar(
        "UPDATE counters SET value = value + 1 WHERE name = 'grn_sequence' RETURNING value",
    )
    .fetch_one(&mut *conn)
    .await
    .map_err(StorageError::Sqlx)?;

    Ok(format!("OPEN-{}-{}", Utc::now().timestamp_millis(), seq))
}

async fn approved_pair_exists_on(
    conn: &mut SqliteConnection,
    warehouse_id: &str,
    product_id: &str,
    exclude_grn_id: Option<&str>,
) -> StorageResult<bool> {
    let exists: i64 = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1
            FROM grn_items i
            JOIN goods_received_notes g ON g.id = i.grn_id
            WHERE g.warehouse_id = ?
              AND i.product_id = ?
              AND g.grn_type = 'opening_stock'
              AND g.status = 'approved'
              AND g.deleted_at IS NULL
              AND (? IS NULL OR g.id != ?)
        )
        "#,
    )
    .bind(warehouse_id)
    .bind(product_id)
    .bind(exclude_grn_id)
    .bind(exclude_grn_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(StorageError::Sqlx)?;

    Ok(exists != 0)
}

async fn product_code_on(
    conn: &mut SqliteConnection,
    product_id: &str,
) -> StorageResult<Option<String>> {
    let code = sqlx::query_scalar("SELECT code FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(StorageError::Sqlx)?;
    Ok(code)
}

fn row_to_grn(row: &sqlx::sqlite::SqliteRow) -> StorageResult<Grn> {
    Ok(Grn {
        id: row.try_get("id")?,
        grn_number: row.try_get("grn_number")?,
        grn_type: row.try_get("grn_type")?,
        supplier_id: row.try_get("supplier_id")?,
        warehouse_id: row.try_get("warehouse_id")?,
        status: row.try_get("status")?,
        notes: row.try_get("notes")?,
        created_by_id: row.try_get("created_by_id")?,
        created_at: row.try_get("created_at")?,
        deleted_at: row.try_get("deleted_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewGrnItem;
    use pretty_assertions::assert_eq;
    use stockroom_storage::{connect_memory, run_migrations};

    async fn setup_test_db() -> SqlitePool {
        let pool = connect_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    async fn seed_warehouse(pool: &SqlitePool, name: &str) -> String {
        let id = generate_entity_id();
        sqlx::query("INSERT INTO warehouses (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(name)
            .bind(Utc::now())
            .execute(pool)
            .await
            .unwrap();
        id
    }

    async fn seed_product(pool: &SqlitePool, name: &str, code: &str) -> String {
        let id = generate_entity_id();
        sqlx::query("INSERT INTO products (id, name, code, created_at) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(name)
            .bind(code)
            .bind(Utc::now())
            .execute(pool)
            .await
            .unwrap();
        id
    }

    fn one_item(product_id: &str, quantity: f64) -> NewGrn {
        NewGrn {
            warehouse_id: String::new(),
            items: vec![NewGrnItem {
                product_id: product_id.to_string(),
                quantity,
                batch_number: None,
                unit_cost: 0.0,
                expiry_date: None,
            }],
            notes: None,
            created_by_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_persists_header_and_items() {
        let pool = setup_test_db().await;
        let storage = GrnStorage::new(pool.clone());
        let warehouse = seed_warehouse(&pool, "Main").await;
        let product = seed_product(&pool, "Widget", "WID-001").await;

        let mut input = one_item(&product, 5.0);
        input.warehouse_id = warehouse.clone();
        input.notes = Some("cutover".to_string());

        let grn = storage.create_opening_stock(&input).await.unwrap();
        assert!(grn.grn_number.starts_with("OPEN-"));
        assert_eq!(grn.status, GrnStatus::Draft);

        let detail = storage.get_with_items(&grn.id).await.unwrap().unwrap();
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items[0].quantity_received, 5.0);
        assert_eq!(detail.grn.notes.as_deref(), Some("cutover"));
    }

    #[tokio::test]
    async fn test_grn_numbers_use_increasing_sequence() {
        let pool = setup_test_db().await;
        let storage = GrnStorage::new(pool.clone());
        let warehouse = seed_warehouse(&pool, "Main").await;
        let p1 = seed_product(&pool, "A", "A-1").await;
        let p2 = seed_product(&pool, "B", "B-1").await;

        let mut first = one_item(&p1, 1.0);
        first.warehouse_id = warehouse.clone();
        let mut second = one_item(&p2, 1.0);
        second.warehouse_id = warehouse.clone();

        let a = storage.create_opening_stock(&first).await.unwrap();
        let b = storage.create_opening_stock(&second).await.unwrap();

        let seq = |number: &str| -> i64 {
            number.rsplit('-').next().unwrap().parse().unwrap()
        };
        assert_eq!(seq(&b.grn_number), seq(&a.grn_number) + 1);
    }

    #[tokio::test]
    async fn test_duplicate_guard_only_counts_approved() {
        let pool = setup_test_db().await;
        let storage = GrnStorage::new(pool.clone());
        let warehouse = seed_warehouse(&pool, "Main").await;
        let product = seed_product(&pool, "Widget", "WID-001").await;

        let mut input = one_item(&product, 3.0);
        input.warehouse_id = warehouse.clone();
        let grn = storage.create_opening_stock(&input).await.unwrap();

        // Draft GRNs do not trip the guard
        assert!(!storage
            .approved_pair_exists(&warehouse, &product)
            .await
            .unwrap());

        storage.approve(&grn.id).await.unwrap();
        assert!(storage
            .approved_pair_exists(&warehouse, &product)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_approve_rejects_second_grn_for_same_pair() {
        let pool = setup_test_db().await;
        let storage = GrnStorage::new(pool.clone());
        let warehouse = seed_warehouse(&pool, "Main").await;
        let product = seed_product(&pool, "Widget", "WID-001").await;

        let mut input = one_item(&product, 3.0);
        input.warehouse_id = warehouse.clone();
        let first = storage.create_opening_stock(&input).await.unwrap();
        let second = storage.create_opening_stock(&input).await.unwrap();

        storage.approve(&first.id).await.unwrap();
        let err = storage.approve(&second.id).await.unwrap_err();
        match err {
            InventoryError::Conflict(message) => assert!(message.contains("WID-001")),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_approve_is_draft_only() {
        let pool = setup_test_db().await;
        let storage = GrnStorage::new(pool.clone());
        let warehouse = seed_warehouse(&pool, "Main").await;
        let product = seed_product(&pool, "Widget", "WID-001").await;

        let mut input = one_item(&product, 3.0);
        input.warehouse_id = warehouse;
        let grn = storage.create_opening_stock(&input).await.unwrap();

        storage.approve(&grn.id).await.unwrap();
        let err = storage.approve(&grn.id).await.unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_grn() {
        let pool = setup_test_db().await;
        let storage = GrnStorage::new(pool.clone());
        let warehouse = seed_warehouse(&pool, "Main").await;
        let product = seed_product(&pool, "Widget", "WID-001").await;

        let mut input = one_item(&product, 3.0);
        input.warehouse_id = warehouse;
        let grn = storage.create_opening_stock(&input).await.unwrap();

        storage.soft_delete(&grn.id).await.unwrap();
        assert!(storage.get_with_items(&grn.id).await.unwrap().is_none());

        let (rows, total) = storage.list_opening_stock(50, 0).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(total, 0);

        let err = storage.soft_delete(&grn.id).await.unwrap_err();
        assert!(matches!(err, InventoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_rejects_approved() {
        let pool = setup_test_db().await;
        let storage = GrnStorage::new(pool.clone());
        let warehouse = seed_warehouse(&pool, "Main").await;
        let product = seed_product(&pool, "Widget", "WID-001").await;

        let mut input = one_item(&product, 3.0);
        input.warehouse_id = warehouse;
        let grn = storage.create_opening_stock(&input).await.unwrap();
        storage.approve(&grn.id).await.unwrap();

        let err = storage.soft_delete(&grn.id).await.unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_aggregates_items() {
        let pool = setup_test_db().await;
        let storage = GrnStorage::new(pool.clone());
        let warehouse = seed_warehouse(&pool, "Main").await;
        let p1 = seed_product(&pool, "A", "A-1").await;
        let p2 = seed_product(&pool, "B", "B-1").await;

        let input = NewGrn {
            warehouse_id: warehouse,
            items: vec![
                NewGrnItem {
                    product_id: p1,
                    quantity: 2.0,
                    batch_number: None,
                    unit_cost: 1.5,
                    expiry_date: None,
                },
                NewGrnItem {
                    product_id: p2,
                    quantity: 3.0,
                    batch_number: Some("B42".to_string()),
                    unit_cost: 0.0,
                    expiry_date: None,
                },
            ],
            notes: None,
            created_by_id: None,
        };
        storage.create_opening_stock(&input).await.unwrap();

        let (rows, total) = storage.list_opening_stock(50, 0).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].item_count, 2);
        assert_eq!(rows[0].total_quantity, 5.0);
        assert_eq!(rows[0].supplier_name, crate::OPENING_STOCK_SUPPLIER);
    }
}
