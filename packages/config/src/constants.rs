// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Stockroom

// Port Configuration
pub const STOCKROOM_API_PORT: &str = "STOCKROOM_API_PORT";
pub const PORT: &str = "PORT"; // Legacy

// Database Configuration
pub const STOCKROOM_DB_PATH: &str = "STOCKROOM_DB_PATH";

// CORS Configuration
pub const STOCKROOM_CORS_ORIGIN: &str = "STOCKROOM_CORS_ORIGIN";

// Logging Configuration
pub const RUST_LOG: &str = "RUST_LOG";
