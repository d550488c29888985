//! # Forecast Engine
//!
//! A Rust library for time series forecasting with the exponential
//! smoothing model family.
//!
//! ## Features
//!
//! - Time series extraction from tabular data (single value column plus
//!   optional date labels)
//! - Smoothing models: Holt linear trend, Holt-Winters with additive or
//!   multiplicative seasonality
//! - Grid-search parameter optimization with holdout validation
//! - Remote-first forecasting with guaranteed local fallback
//! - Row-oriented text export for download
//!
//! ## Quick Start
//!
//! ```rust
//! use forecast_engine::engine::{Forecaster, ForecastOptions};
//!
//! let series = vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0];
//!
//! let forecaster = Forecaster::new(ForecastOptions::with_horizon(3));
//! let result = forecaster.forecast(&series);
//!
//! assert_eq!(result.forecast.len(), 3);
//! ```
//!
//! The engine never fails: short series yield an empty forecast, fit
//! failures degrade through a fallback chain ending at repeating the last
//! observed value, and remote-service failures fall back to the local path.

pub mod data;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod optimize;
pub mod remote;
pub mod utils;

// Re-export commonly used types
pub use crate::data::{DataLoader, TimeSeriesData};
pub use crate::engine::{Forecast, ForecastOptions, ForecastTier, Forecaster};
pub use crate::error::ForecastError;
pub use crate::models::{SeasonalityMode, SmoothingParameters};
pub use crate::optimize::{optimize, OptimizationResult, ParameterGrid};
pub use crate::remote::{RemoteForecaster, RemoteSource};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
