// ABOUTME: Supplier storage layer using SQLite
// ABOUTME: Resolves the synthetic "Opening Stock" supplier, creating it on first use

use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::debug;

use chrono::Utc;
use stockroom_core::generate_entity_id;
use stockroom_storage::{StorageError, StorageResult};

/// Name of the synthetic supplier backing all opening-stock GRNs
pub const OPENING_STOCK_SUPPLIER: &str = "Opening Stock";

pub struct SupplierStorage {
    pool: SqlitePool,
}

impl SupplierStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Return the id of the "Opening Stock" supplier, creating the record
    /// on first use.
    pub async fn resolve_opening_stock(&self) -> StorageResult<String> {
        let mut conn = self.pool.acquire().await.map_err(StorageError::Sqlx)?;
        resolve_opening_stock_supplier(&mut conn).await
    }

    pub async fn get_name(&self, supplier_id: &str) -> StorageResult<Option<String>> {
        let name = sqlx::query_scalar("SELECT name FROM suppliers WHERE id = ?")
            .bind(supplier_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;
        Ok(name)
    }
}

/// Resolve the "Opening Stock" supplier on an existing connection or
/// transaction. The UNIQUE constraint on `suppliers.name` makes the
/// insert-then-select sequence safe under concurrent first calls: at most
/// one insert wins and every caller reads the surviving row.
pub async fn resolve_opening_stock_supplier(conn: &mut SqliteConnection) -> StorageResult<String> {
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO suppliers (id, name, contact_person, phone, email, address, created_at)
        VALUES (?, ?, 'System', NULL, NULL, NULL, ?)
        "#,
    )
    .bind(generate_entity_id())
    .bind(OPENING_STOCK_SUPPLIER)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await
    .map_err(StorageError::Sqlx)?;

    // Lookup by literal name; first match wins
    let row = sqlx::query("SELECT id FROM suppliers WHERE name = ? LIMIT 1")
        .bind(OPENING_STOCK_SUPPLIER)
        .fetch_one(&mut *conn)
        .await
        .map_err(StorageError::Sqlx)?;

    let id: String = row.try_get("id")?;
    debug!("Resolved opening-stock supplier: {}", id);
    Ok(id)
}
