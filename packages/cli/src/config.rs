// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: Port, database path, and CORS origin with validation

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

use stockroom_config::constants;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_path: Option<PathBuf>,
    pub cors_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var(constants::STOCKROOM_API_PORT)
            .or_else(|_| env::var(constants::PORT))
            .unwrap_or_else(|_| "4820".to_string());

        let port = port_str.parse::<u16>()?;
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let database_path = env::var(constants::STOCKROOM_DB_PATH)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let cors_origin =
            stockroom_config::env_or_default(constants::STOCKROOM_CORS_ORIGIN, "http://localhost:5173");

        Ok(Config {
            port,
            database_path,
            cors_origin,
        })
    }
}
