//! Error types for the forecast_engine crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the forecast_engine crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Series too short to fit any model
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Seasonal configuration incompatible with the data
    #[error("Invalid seasonality: {0}")]
    InvalidSeasonality(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Remote forecasting service failed or timed out
    #[error("Remote service unavailable: {0}")]
    RemoteUnavailable(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<reqwest::Error> for ForecastError {
    fn from(err: reqwest::Error) -> Self {
        ForecastError::RemoteUnavailable(err.to_string())
    }
}
