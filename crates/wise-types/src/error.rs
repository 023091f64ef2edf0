//! Error types for wise-routes

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("CSV loader error: {0}")]
    CsvLoader(String),

    #[error("Dataset error: {0}")]
    DatasetLoader(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Route simulation was requested without choosing a vehicle
    #[error("Please select a vehicle before simulating a route")]
    MissingVehicleSelection,

    #[error("Excel export error: {0}")]
    Excel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
