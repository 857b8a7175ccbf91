// ABOUTME: Database state shared by API handlers
// ABOUTME: Builds the pool, runs migrations, and wires up the storage layers

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use stockroom_core::constants::default_db_path;
use stockroom_storage::{connect, connect_memory, run_migrations, StorageError};

use crate::service::OpeningStockService;
use crate::storage::GrnStorage;
use crate::suppliers::SupplierStorage;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub opening_stock: Arc<OpeningStockService>,
    pub suppliers: Arc<SupplierStorage>,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let grns = Arc::new(GrnStorage::new(pool.clone()));
        let suppliers = Arc::new(SupplierStorage::new(pool.clone()));
        let opening_stock = Arc::new(OpeningStockService::new(grns));

        Self {
            pool,
            opening_stock,
            suppliers,
        }
    }

    /// Initialize database state with default configuration
    pub async fn init() -> Result<Self, StorageError> {
        Self::init_with_path(None).await
    }

    /// Initialize database state with optional custom database path
    pub async fn init_with_path(database_path: Option<PathBuf>) -> Result<Self, StorageError> {
        let database_path = database_path.unwrap_or_else(default_db_path);
        let pool = connect(&database_path).await?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    /// Initialize database state backed by an in-memory database.
    /// Used by tests and demos.
    pub async fn init_memory() -> Result<Self, StorageError> {
        let pool = connect_memory().await?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }
}
