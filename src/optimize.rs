//! Grid-search parameter optimization with holdout validation.
//!
//! The grid is a deterministic constant table: the same series and horizon
//! always select the same parameters, with ties broken by enumeration order.

use crate::error::Result;
use crate::models::holt_winters::HoltWinters;
use crate::models::{ForecastModel, SeasonalityMode, SmoothingParameters, TrainedForecastModel};
use crate::utils::{holdout_split, mean_squared_error};
use tracing::{debug, warn};

/// Candidate values enumerated by the grid search
#[derive(Debug, Clone)]
pub struct ParameterGrid {
    /// Level smoothing candidates
    pub alphas: Vec<f64>,
    /// Trend smoothing candidates
    pub betas: Vec<f64>,
    /// Seasonal smoothing candidates
    pub gammas: Vec<f64>,
    /// Season length candidates; 0 means a non-seasonal fit
    pub season_lengths: Vec<usize>,
    /// Mode applied to seasonal candidates
    pub seasonal_mode: SeasonalityMode,
}

impl Default for ParameterGrid {
    fn default() -> Self {
        Self {
            alphas: vec![0.2, 0.4, 0.6, 0.8],
            betas: vec![0.1, 0.3, 0.5],
            gammas: vec![0.0, 0.1, 0.3],
            season_lengths: vec![0, 4, 6, 12],
            seasonal_mode: SeasonalityMode::Additive,
        }
    }
}

/// Outcome of a grid search
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Parameter set with the lowest holdout error
    pub best_parameters: SmoothingParameters,
    /// Mean squared error of the best parameters on the holdout set;
    /// infinite when no combination fit successfully
    pub best_error: f64,
}

impl OptimizationResult {
    /// Whether any grid combination fit successfully
    pub fn converged(&self) -> bool {
        self.best_error.is_finite()
    }
}

/// Search the grid for the parameter set minimizing holdout MSE.
///
/// Combinations whose fit fails are skipped; if every combination fails the
/// safe default parameters are returned with an infinite error.
pub fn optimize(values: &[f64], horizon: usize, grid: &ParameterGrid) -> OptimizationResult {
    let (train, holdout) = holdout_split(values, horizon);

    let mut best: Option<(SmoothingParameters, f64)> = None;
    for &season_length in &grid.season_lengths {
        let mode = if season_length >= 2 {
            grid.seasonal_mode
        } else {
            SeasonalityMode::None
        };

        for &alpha in &grid.alphas {
            for &beta in &grid.betas {
                for &gamma in &grid.gammas {
                    match evaluate(train, holdout, alpha, beta, gamma, season_length, mode) {
                        Ok((params, error)) => {
                            if best.as_ref().map_or(true, |(_, e)| error < *e) {
                                best = Some((params, error));
                            }
                        }
                        Err(err) => {
                            debug!(
                                alpha,
                                beta,
                                gamma,
                                season_length,
                                "skipping grid combination: {err}"
                            );
                        }
                    }
                }
            }
        }
    }

    match best {
        Some((best_parameters, best_error)) => OptimizationResult {
            best_parameters,
            best_error,
        },
        None => {
            warn!(
                series_length = values.len(),
                horizon, "optimization did not converge, using default parameters"
            );
            OptimizationResult {
                best_parameters: SmoothingParameters::default(),
                best_error: f64::INFINITY,
            }
        }
    }
}

/// Fit one candidate on the training set and score it against the holdout
fn evaluate(
    train: &[f64],
    holdout: &[f64],
    alpha: f64,
    beta: f64,
    gamma: f64,
    season_length: usize,
    mode: SeasonalityMode,
) -> Result<(SmoothingParameters, f64)> {
    let params = SmoothingParameters::new(alpha, beta, gamma, season_length, mode)?;
    let trained = HoltWinters::new(params).fit_values(train)?;
    let forecast = trained.forecast(holdout.len())?;

    let error = mean_squared_error(forecast.values(), holdout)?;
    Ok((params, error))
}
