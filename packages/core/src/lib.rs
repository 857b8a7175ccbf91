// ABOUTME: Core constants and utilities for Stockroom
// ABOUTME: Foundational package shared across all Stockroom packages

pub mod constants;
pub mod utils;

// Re-export constants
pub use constants::{stockroom_dir, DEFAULT_DB_FILE};

// Re-export utilities
pub use utils::generate_entity_id;
