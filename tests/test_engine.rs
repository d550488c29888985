use assert_approx_eq::assert_approx_eq;
use forecast_engine::engine::{ForecastOptions, ForecastTier, Forecaster};
use forecast_engine::error::{ForecastError, Result};
use forecast_engine::models::{SeasonalityMode, SmoothingParameters};
use forecast_engine::remote::RemoteSource;
use rstest::rstest;

fn pinned_options(horizon: usize, params: SmoothingParameters) -> ForecastOptions {
    ForecastOptions {
        horizon,
        parameters: Some(params),
        ..ForecastOptions::default()
    }
}

#[rstest]
#[case(Vec::new())]
#[case(vec![5.0])]
fn test_short_series_yields_empty_scaffold(#[case] series: Vec<f64>) {
    let forecaster = Forecaster::new(ForecastOptions::with_horizon(5));
    let result = forecaster.forecast(&series);

    assert_eq!(result.historical, series);
    assert!(result.forecast.is_empty());
    assert_eq!(result.tier, ForecastTier::Empty);
}

#[rstest]
#[case(vec![1.0, 2.0], 1)]
#[case(vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0], 3)]
#[case(vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0], 10)]
fn test_forecast_length_matches_horizon(#[case] series: Vec<f64>, #[case] horizon: usize) {
    let forecaster = Forecaster::new(ForecastOptions::with_horizon(horizon));
    let result = forecaster.forecast(&series);

    assert_eq!(result.historical, series);
    assert_eq!(result.forecast.len(), horizon);
}

#[test]
fn test_flat_series_forecasts_flat() {
    let series = vec![5.0; 8];
    let forecaster = Forecaster::new(ForecastOptions::with_horizon(4));
    let result = forecaster.forecast(&series);

    assert_eq!(result.forecast.len(), 4);
    for &v in &result.forecast {
        assert_approx_eq!(v, 5.0);
    }
}

#[test]
fn test_default_clamp_keeps_forecast_non_negative() {
    // Steep downward trend extrapolates below zero without the clamp
    let series = vec![10.0, 8.0, 6.0, 4.0, 2.0];
    let params = SmoothingParameters::linear_trend(0.8, 0.2).unwrap();

    let clamped = Forecaster::new(pinned_options(4, params)).forecast(&series);
    assert!(clamped.forecast.iter().all(|&v| v >= 0.0));

    let unclamped = Forecaster::new(ForecastOptions {
        clamp_floor: None,
        ..pinned_options(4, params)
    })
    .forecast(&series);
    assert!(unclamped.forecast.iter().any(|&v| v < 0.0));
}

#[test]
fn test_pinned_parameters_are_idempotent() {
    let series = vec![3.0, 7.0, 4.0, 9.0, 6.0, 11.0, 8.0];
    let params =
        SmoothingParameters::new(0.6, 0.3, 0.1, 0, SeasonalityMode::None).unwrap();
    let forecaster = Forecaster::new(pinned_options(5, params));

    let first = forecaster.forecast(&series);
    let second = forecaster.forecast(&series);

    assert_eq!(first, second);
}

#[test]
fn test_multiplicative_failure_falls_back_to_trend() {
    // A zero in the series makes the multiplicative fit invalid
    let series = vec![0.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0];
    let params =
        SmoothingParameters::new(0.4, 0.2, 0.1, 4, SeasonalityMode::Multiplicative).unwrap();

    let result = Forecaster::new(pinned_options(4, params)).forecast(&series);

    assert_eq!(result.forecast.len(), 4);
    assert_eq!(result.tier, ForecastTier::TrendFallback);
}

#[test]
fn test_non_finite_data_falls_back_to_last_value() {
    let series = vec![1.0, f64::NAN, 3.0];
    let params =
        SmoothingParameters::new(0.4, 0.2, 0.1, 2, SeasonalityMode::Additive).unwrap();

    let result = Forecaster::new(pinned_options(3, params)).forecast(&series);

    assert_eq!(result.tier, ForecastTier::LastValue);
    assert_eq!(result.forecast, vec![3.0, 3.0, 3.0]);
}

// Stub remote sources for exercising the remote-first policy

struct FixedRemote(Vec<f64>);

impl RemoteSource for FixedRemote {
    async fn fetch(&self, _values: &[f64], _horizon: usize) -> Result<Vec<f64>> {
        Ok(self.0.clone())
    }
}

struct FailingRemote;

impl RemoteSource for FailingRemote {
    async fn fetch(&self, _values: &[f64], _horizon: usize) -> Result<Vec<f64>> {
        Err(ForecastError::RemoteUnavailable(
            "connection refused".to_string(),
        ))
    }
}

#[tokio::test]
async fn test_remote_first_uses_remote_values() {
    let series = vec![1.0, 2.0, 3.0, 4.0];
    let remote = FixedRemote(vec![5.0, 6.0, 7.0]);
    let forecaster = Forecaster::new(ForecastOptions::with_horizon(3));

    let result = forecaster.forecast_remote_first(&series, &remote).await;

    assert_eq!(result.tier, ForecastTier::Remote);
    assert_eq!(result.forecast, vec![5.0, 6.0, 7.0]);
}

#[tokio::test]
async fn test_remote_values_are_clamped() {
    let series = vec![1.0, 2.0, 3.0, 4.0];
    let remote = FixedRemote(vec![-1.0, 2.0]);
    let forecaster = Forecaster::new(ForecastOptions::with_horizon(2));

    let result = forecaster.forecast_remote_first(&series, &remote).await;

    assert_eq!(result.tier, ForecastTier::Remote);
    assert_eq!(result.forecast, vec![0.0, 2.0]);
}

#[tokio::test]
async fn test_remote_failure_falls_back_to_local() {
    let series = vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0];
    let params = SmoothingParameters::linear_trend(0.8, 0.2).unwrap();
    let forecaster = Forecaster::new(pinned_options(3, params));

    let result = forecaster.forecast_remote_first(&series, &FailingRemote).await;

    assert_eq!(result.tier, ForecastTier::Smoothing);
    assert_eq!(result.forecast.len(), 3);
    assert_approx_eq!(result.forecast[0], 22.0);
}

#[tokio::test]
async fn test_remote_length_mismatch_falls_back_to_local() {
    let series = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let remote = FixedRemote(vec![7.0]);
    let params = SmoothingParameters::linear_trend(0.8, 0.2).unwrap();
    let forecaster = Forecaster::new(pinned_options(3, params));

    let result = forecaster.forecast_remote_first(&series, &remote).await;

    assert_eq!(result.tier, ForecastTier::Smoothing);
    assert_eq!(result.forecast.len(), 3);
}

#[tokio::test]
async fn test_remote_first_short_series_skips_remote() {
    let forecaster = Forecaster::new(ForecastOptions::with_horizon(3));
    let result = forecaster
        .forecast_remote_first(&[1.0], &FailingRemote)
        .await;

    assert_eq!(result.tier, ForecastTier::Empty);
    assert!(result.forecast.is_empty());
}
