//! Forecasting models for time series data

use crate::error::{ForecastError, Result};
use std::fmt::Debug;

pub mod holt_winters;

/// How the seasonal component enters the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonalityMode {
    /// No seasonal component (double exponential / Holt linear trend)
    #[default]
    None,
    /// Seasonal deviation is added to level + trend
    Additive,
    /// Seasonal factor multiplies level + trend; requires strictly positive data
    Multiplicative,
}

/// Smoothing parameters for the exponential smoothing family.
///
/// Fields are private so every instance goes through the validation in
/// [`SmoothingParameters::new`]: factors in [0, 1] and a season length
/// below 2 coerced to [`SeasonalityMode::None`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingParameters {
    /// Level smoothing factor
    alpha: f64,
    /// Trend smoothing factor
    beta: f64,
    /// Seasonal smoothing factor
    gamma: f64,
    /// Length of one seasonal cycle; 0 or 1 means no seasonality
    season_length: usize,
    /// Seasonality mode
    mode: SeasonalityMode,
}

impl SmoothingParameters {
    /// Create a validated parameter set.
    ///
    /// A `season_length` below 2 forces the mode to `None`.
    pub fn new(
        alpha: f64,
        beta: f64,
        gamma: f64,
        season_length: usize,
        mode: SeasonalityMode,
    ) -> Result<Self> {
        for (name, value) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        let mode = if season_length < 2 {
            SeasonalityMode::None
        } else {
            mode
        };

        Ok(Self {
            alpha,
            beta,
            gamma,
            season_length,
            mode,
        })
    }

    /// Non-seasonal Holt linear trend parameters
    pub fn linear_trend(alpha: f64, beta: f64) -> Result<Self> {
        Self::new(alpha, beta, 0.0, 0, SeasonalityMode::None)
    }

    /// Get the level smoothing factor
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Get the trend smoothing factor
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Get the seasonal smoothing factor
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Get the season length
    pub fn season_length(&self) -> usize {
        self.season_length
    }

    /// Get the seasonality mode
    pub fn mode(&self) -> SeasonalityMode {
        self.mode
    }

    /// Whether this parameter set carries a seasonal component
    pub fn is_seasonal(&self) -> bool {
        self.mode != SeasonalityMode::None && self.season_length >= 2
    }

    /// The same alpha/beta with the seasonal component removed
    pub fn without_seasonality(self) -> Self {
        Self {
            gamma: 0.0,
            season_length: 0,
            mode: SeasonalityMode::None,
            ..self
        }
    }
}

impl Default for SmoothingParameters {
    /// Safe default used when optimization does not converge
    fn default() -> Self {
        Self {
            alpha: 0.3,
            beta: 0.1,
            gamma: 0.0,
            season_length: 0,
            mode: SeasonalityMode::None,
        }
    }
}

/// Forecast result containing predicted values
#[derive(Debug, Clone)]
pub struct ForecastResult {
    /// Forecasted values
    pub(crate) values: Vec<f64>,
    /// Number of periods forecasted
    horizons: usize,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(values: Vec<f64>, horizons: usize) -> Result<Self> {
        if values.len() != horizons {
            return Err(ForecastError::InvalidParameter(format!(
                "Values length ({}) doesn't match horizons ({})",
                values.len(),
                horizons
            )));
        }

        Ok(Self { values, horizons })
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the result and return the forecasted values
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Get the number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.horizons
    }

    /// Calculate mean squared error between forecast and actual values
    pub fn mean_squared_error(&self, actual: &[f64]) -> Result<f64> {
        crate::utils::mean_squared_error(&self.values, actual)
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Generate forecast for future periods
    fn forecast(&self, horizons: usize) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on time series data
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on raw observed values
    fn fit_values(&self, values: &[f64]) -> Result<Self::Trained>;

    /// Train the model on time series data
    fn train(&self, data: &crate::data::TimeSeriesData) -> Result<Self::Trained> {
        self.fit_values(&data.values())
    }

    /// Get the name of the model
    fn name(&self) -> &str;
}
