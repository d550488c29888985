//! Forecast orchestration: validation, optimization, model fitting, the
//! fallback chain, and the remote-first policy.
//!
//! The contract is that [`Forecaster::forecast`] never fails: every failure
//! tier terminates in a defined degenerate output, down to repeating the
//! last observed value or an empty forecast.

use crate::models::holt_winters::HoltWinters;
use crate::models::{ForecastModel, SeasonalityMode, SmoothingParameters, TrainedForecastModel};
use crate::optimize::{optimize, ParameterGrid};
use crate::remote::RemoteSource;
use tracing::{debug, warn};

/// Default number of future periods to produce
pub const DEFAULT_HORIZON: usize = 5;

/// Which tier of the pipeline produced a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastTier {
    /// Values came from the remote forecasting service
    Remote,
    /// Values came from the requested smoothing model
    Smoothing,
    /// Seasonal fit failed; values came from a non-seasonal trend fit
    TrendFallback,
    /// All fits failed; values repeat the last observation
    LastValue,
    /// Series too short to forecast at all
    Empty,
}

/// Options controlling a single forecasting call
#[derive(Debug, Clone)]
pub struct ForecastOptions {
    /// Number of future periods to produce
    pub horizon: usize,
    /// Explicit smoothing parameters; `None` runs the grid-search optimizer
    pub parameters: Option<SmoothingParameters>,
    /// Lower bound applied to every forecast value; `None` disables clamping
    pub clamp_floor: Option<f64>,
    /// Grid used when parameters are not pinned
    pub grid: ParameterGrid,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            parameters: None,
            clamp_floor: Some(0.0),
            grid: ParameterGrid::default(),
        }
    }
}

impl ForecastOptions {
    /// Options for the given horizon with everything else defaulted
    pub fn with_horizon(horizon: usize) -> Self {
        Self {
            horizon,
            ..Self::default()
        }
    }
}

/// Result of one forecasting call
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    /// The input series, echoed unmodified
    pub historical: Vec<f64>,
    /// Forecasted values, one per future period
    pub forecast: Vec<f64>,
    /// Which tier produced the forecast
    pub tier: ForecastTier,
}

impl Forecast {
    /// Degenerate scaffold returned for series shorter than 2 points
    fn insufficient(series: &[f64]) -> Self {
        Self {
            historical: series.to_vec(),
            forecast: Vec::new(),
            tier: ForecastTier::Empty,
        }
    }
}

/// Forecast orchestrator.
///
/// Owns no state beyond its options; independent calls never interfere.
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    options: ForecastOptions,
}

impl Forecaster {
    /// Create a forecaster with the given options
    pub fn new(options: ForecastOptions) -> Self {
        Self { options }
    }

    /// Get the options
    pub fn options(&self) -> &ForecastOptions {
        &self.options
    }

    /// Produce a forecast locally. Never fails: degenerate inputs yield an
    /// empty forecast and fit failures fall through the fallback chain.
    pub fn forecast(&self, series: &[f64]) -> Forecast {
        if series.len() < 2 {
            warn!(
                series_length = series.len(),
                "insufficient data for forecasting"
            );
            return Forecast::insufficient(series);
        }

        let params = match self.options.parameters {
            Some(params) => params,
            None => {
                let result = optimize(series, self.options.horizon, &self.options.grid);
                debug!(
                    best_error = result.best_error,
                    converged = result.converged(),
                    "grid search selected parameters {:?}",
                    result.best_parameters
                );
                result.best_parameters
            }
        };

        let (values, tier) = self.fit_with_fallback(series, params);
        Forecast {
            historical: series.to_vec(),
            forecast: self.clamp(values),
            tier,
        }
    }

    /// Produce a forecast remote-first: one bounded attempt against the
    /// remote service, falling back to the local path on any failure.
    pub async fn forecast_remote_first<R: RemoteSource>(
        &self,
        series: &[f64],
        remote: &R,
    ) -> Forecast {
        if series.len() < 2 {
            warn!(
                series_length = series.len(),
                "insufficient data for forecasting"
            );
            return Forecast::insufficient(series);
        }

        match remote.fetch(series, self.options.horizon).await {
            Ok(values) if values.len() == self.options.horizon => Forecast {
                historical: series.to_vec(),
                forecast: self.clamp(values),
                tier: ForecastTier::Remote,
            },
            Ok(values) => {
                warn!(
                    returned = values.len(),
                    expected = self.options.horizon,
                    "remote forecast length mismatch, falling back to local model"
                );
                self.forecast(series)
            }
            Err(err) => {
                warn!("remote forecast failed, falling back to local model: {err}");
                self.forecast(series)
            }
        }
    }

    /// Fit the requested model, degrading through the fallback chain:
    /// requested model -> non-seasonal trend fit -> repeat last value.
    fn fit_with_fallback(
        &self,
        series: &[f64],
        params: SmoothingParameters,
    ) -> (Vec<f64>, ForecastTier) {
        let horizon = self.options.horizon;

        match Self::fit_and_forecast(series, params, horizon) {
            Ok(values) => return (values, ForecastTier::Smoothing),
            Err(err) => warn!("model fit failed: {err}"),
        }

        // A failed non-seasonal fit would fail identically here, so only
        // retry when the requested model carried a seasonal component.
        if params.mode() != SeasonalityMode::None {
            let trend_only = params.without_seasonality();
            match Self::fit_and_forecast(series, trend_only, horizon) {
                Ok(values) => return (values, ForecastTier::TrendFallback),
                Err(err) => warn!("trend-only fallback failed: {err}"),
            }
        }

        // series.len() >= 2 is checked by the caller, so last() is present
        let last = series.last().copied().unwrap_or(0.0);
        (vec![last; horizon], ForecastTier::LastValue)
    }

    fn fit_and_forecast(
        series: &[f64],
        params: SmoothingParameters,
        horizon: usize,
    ) -> crate::error::Result<Vec<f64>> {
        let trained = HoltWinters::new(params).fit_values(series)?;
        Ok(trained.forecast(horizon)?.into_values())
    }

    fn clamp(&self, values: Vec<f64>) -> Vec<f64> {
        match self.options.clamp_floor {
            Some(floor) => values.into_iter().map(|v| v.max(floor)).collect(),
            None => values,
        }
    }
}
