//! Exponential smoothing model family.
//!
//! A single model covers all three seasonality modes:
//!
//! - `None`: Holt linear trend (double exponential smoothing)
//! - `Additive`: Holt-Winters with seasonal offsets added to level + trend
//! - `Multiplicative`: Holt-Winters with seasonal factors multiplying
//!   level + trend; only defined for strictly positive data

use crate::error::{ForecastError, Result};
use crate::models::{
    ForecastModel, ForecastResult, SeasonalityMode, SmoothingParameters, TrainedForecastModel,
};

/// Holt-Winters exponential smoothing model
#[derive(Debug, Clone)]
pub struct HoltWinters {
    /// Name of the model
    name: String,
    /// Smoothing parameters
    params: SmoothingParameters,
}

/// Trained Holt-Winters model holding the final smoothing state
#[derive(Debug, Clone)]
pub struct TrainedHoltWinters {
    /// Name of the model
    name: String,
    /// Smoothing parameters
    params: SmoothingParameters,
    /// Final level
    level: f64,
    /// Final trend
    trend: f64,
    /// Final seasonal components, empty for non-seasonal fits
    seasonals: Vec<f64>,
    /// Number of observations fitted
    n: usize,
    /// One-step-ahead fitted values recorded during training
    fitted: Vec<f64>,
}

impl HoltWinters {
    /// Create a new Holt-Winters model with the given parameters
    pub fn new(params: SmoothingParameters) -> Self {
        let name = match params.mode {
            SeasonalityMode::None => format!(
                "Holt Linear Trend (alpha={}, beta={})",
                params.alpha, params.beta
            ),
            SeasonalityMode::Additive => format!(
                "Holt-Winters Additive (alpha={}, beta={}, gamma={}, season={})",
                params.alpha, params.beta, params.gamma, params.season_length
            ),
            SeasonalityMode::Multiplicative => format!(
                "Holt-Winters Multiplicative (alpha={}, beta={}, gamma={}, season={})",
                params.alpha, params.beta, params.gamma, params.season_length
            ),
        };

        Self { name, params }
    }

    /// Get the smoothing parameters
    pub fn params(&self) -> &SmoothingParameters {
        &self.params
    }

    /// Fit the non-seasonal Holt linear trend recursion
    fn fit_linear_trend(&self, values: &[f64]) -> Result<TrainedHoltWinters> {
        let (alpha, beta) = (self.params.alpha, self.params.beta);

        let mut level = values[0];
        let mut trend = values[1] - values[0];
        let mut fitted = Vec::with_capacity(values.len());
        fitted.push(values[0]);

        for &v in &values[1..] {
            fitted.push(level + trend);
            let last_level = level;
            level = alpha * v + (1.0 - alpha) * (last_level + trend);
            trend = beta * (level - last_level) + (1.0 - beta) * trend;
        }

        if !level.is_finite() || !trend.is_finite() {
            return Err(ForecastError::DataError(
                "Smoothing state diverged during fit".to_string(),
            ));
        }

        Ok(TrainedHoltWinters {
            name: self.name.clone(),
            params: self.params,
            level,
            trend,
            seasonals: Vec::new(),
            n: values.len(),
            fitted,
        })
    }

    /// Fit the seasonal Holt-Winters recursion (additive or multiplicative)
    fn fit_seasonal(&self, values: &[f64]) -> Result<TrainedHoltWinters> {
        let (alpha, beta, gamma) = (self.params.alpha, self.params.beta, self.params.gamma);
        let period = self.params.season_length;
        let mode = self.params.mode;

        if period >= values.len() {
            return Err(ForecastError::InvalidSeasonality(format!(
                "Season length {} requires more than {} observations",
                period,
                values.len()
            )));
        }

        if mode == SeasonalityMode::Multiplicative && values.iter().any(|&v| v <= 0.0) {
            return Err(ForecastError::InvalidSeasonality(
                "Multiplicative seasonality requires strictly positive values".to_string(),
            ));
        }

        let (mut level, mut trend, mut seasonals) = Self::initialize_state(values, period, mode);
        let mut fitted: Vec<f64> = values.iter().take(period).copied().collect();

        for (t, &v) in values.iter().enumerate().skip(period) {
            let s = t % period;
            let season = seasonals[s];

            let (one_step, deseasonalized) = match mode {
                SeasonalityMode::Additive => ((level + trend) + season, v - season),
                SeasonalityMode::Multiplicative => {
                    if season.abs() < f64::EPSILON {
                        return Err(ForecastError::InvalidSeasonality(
                            "Degenerate multiplicative seasonal component".to_string(),
                        ));
                    }
                    ((level + trend) * season, v / season)
                }
                SeasonalityMode::None => unreachable!("seasonal fit with mode None"),
            };
            fitted.push(one_step);

            let last_level = level;
            level = alpha * deseasonalized + (1.0 - alpha) * (last_level + trend);
            trend = beta * (level - last_level) + (1.0 - beta) * trend;

            seasonals[s] = match mode {
                SeasonalityMode::Additive => gamma * (v - level) + (1.0 - gamma) * season,
                SeasonalityMode::Multiplicative => {
                    if level.abs() < f64::EPSILON {
                        return Err(ForecastError::InvalidSeasonality(
                            "Level collapsed to zero in multiplicative fit".to_string(),
                        ));
                    }
                    gamma * (v / level) + (1.0 - gamma) * season
                }
                SeasonalityMode::None => unreachable!(),
            };

            if !level.is_finite() || !trend.is_finite() || !seasonals[s].is_finite() {
                return Err(ForecastError::DataError(
                    "Smoothing state diverged during seasonal fit".to_string(),
                ));
            }
        }

        Ok(TrainedHoltWinters {
            name: self.name.clone(),
            params: self.params,
            level,
            trend,
            seasonals,
            n: values.len(),
            fitted,
        })
    }

    /// Initialize level, trend and seasonal components from the first season(s)
    fn initialize_state(
        values: &[f64],
        period: usize,
        mode: SeasonalityMode,
    ) -> (f64, f64, Vec<f64>) {
        let first_season = &values[..period];
        let level = first_season.iter().sum::<f64>() / period as f64;

        // Average cross-season difference when two full seasons exist
        let trend = if values.len() >= 2 * period {
            (0..period)
                .map(|i| (values[period + i] - values[i]) / period as f64)
                .sum::<f64>()
                / period as f64
        } else {
            0.0
        };

        let seasonals = match mode {
            SeasonalityMode::Additive => first_season.iter().map(|v| v - level).collect(),
            SeasonalityMode::Multiplicative => first_season
                .iter()
                .map(|v| if level.abs() > f64::EPSILON { v / level } else { 1.0 })
                .collect(),
            SeasonalityMode::None => Vec::new(),
        };

        (level, trend, seasonals)
    }
}

impl ForecastModel for HoltWinters {
    type Trained = TrainedHoltWinters;

    fn fit_values(&self, values: &[f64]) -> Result<Self::Trained> {
        if values.len() < 2 {
            return Err(ForecastError::InsufficientData(format!(
                "Need at least 2 observations, got {}",
                values.len()
            )));
        }

        if self.params.is_seasonal() {
            self.fit_seasonal(values)
        } else {
            self.fit_linear_trend(values)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedHoltWinters {
    /// Get the final level
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Get the final trend
    pub fn trend(&self) -> f64 {
        self.trend
    }

    /// Get the final seasonal components
    pub fn seasonals(&self) -> &[f64] {
        &self.seasonals
    }

    /// Get the one-step-ahead fitted values recorded during training
    pub fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }
}

impl TrainedForecastModel for TrainedHoltWinters {
    fn forecast(&self, horizons: usize) -> Result<ForecastResult> {
        let mut values = Vec::with_capacity(horizons);

        for m in 1..=horizons {
            let base = self.level + m as f64 * self.trend;
            let value = match self.params.mode {
                SeasonalityMode::None => base,
                SeasonalityMode::Additive => {
                    base + self.seasonals[(self.n - 1 + m) % self.params.season_length]
                }
                SeasonalityMode::Multiplicative => {
                    base * self.seasonals[(self.n - 1 + m) % self.params.season_length]
                }
            };

            if !value.is_finite() {
                return Err(ForecastError::DataError(
                    "Forecast produced a non-finite value".to_string(),
                ));
            }
            values.push(value);
        }

        ForecastResult::new(values, horizons)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
