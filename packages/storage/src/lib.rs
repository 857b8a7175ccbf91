// ABOUTME: Data layer and persistence for Stockroom
// ABOUTME: Provides the SQLite pool, embedded migrations, and pagination utilities

use thiserror::Error;

pub mod db;
pub mod pagination;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Record not found")]
    NotFound,
}

pub type StorageResult<T> = Result<T, StorageError>;

pub use db::{connect, connect_memory, run_migrations};
pub use pagination::{PageInfo, PaginationParams};
