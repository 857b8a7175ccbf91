use std::env;
use std::path::PathBuf;

/// Default database file name inside the Stockroom directory
pub const DEFAULT_DB_FILE: &str = "stockroom.db";

/// Get the path to the Stockroom directory (~/.stockroom)
pub fn stockroom_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".stockroom")
    } else {
        // Fall back to dirs crate for normal usage
        dirs::home_dir()
            .expect("Unable to get home directory")
            .join(".stockroom")
    }
}

/// Get the default path to the SQLite database (~/.stockroom/stockroom.db)
pub fn default_db_path() -> PathBuf {
    stockroom_dir().join(DEFAULT_DB_FILE)
}
