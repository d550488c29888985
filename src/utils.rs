//! Utility functions for the forecast_engine crate

use crate::error::{ForecastError, Result};

/// Split a series into training and holdout sets for out-of-sample validation.
///
/// Holdout size is `min(horizon, max(3, len / 4))`, taken from the tail of
/// the series; the remainder is the training set.
pub fn holdout_split(values: &[f64], horizon: usize) -> (&[f64], &[f64]) {
    let holdout_size = horizon.min(3.max(values.len() / 4)).min(values.len());
    let train_size = values.len() - holdout_size;

    (&values[..train_size], &values[train_size..])
}

/// Calculate mean squared error between forecast and actual values
pub fn mean_squared_error(forecast: &[f64], actual: &[f64]) -> Result<f64> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "Forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let sum: f64 = forecast
        .iter()
        .zip(actual.iter())
        .map(|(f, a)| (f - a).powi(2))
        .sum();

    Ok(sum / forecast.len() as f64)
}

/// Calculate mean absolute error between forecast and actual values
pub fn mean_absolute_error(forecast: &[f64], actual: &[f64]) -> Result<f64> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "Forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let sum: f64 = forecast
        .iter()
        .zip(actual.iter())
        .map(|(f, a)| (f - a).abs())
        .sum();

    Ok(sum / forecast.len() as f64)
}
