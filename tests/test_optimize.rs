use assert_approx_eq::assert_approx_eq;
use forecast_engine::models::SmoothingParameters;
use forecast_engine::optimize::{optimize, ParameterGrid};
use forecast_engine::utils::holdout_split;
use rstest::rstest;

#[rstest]
#[case(20, 3, 17, 3)]
#[case(20, 10, 15, 5)]
#[case(8, 2, 6, 2)]
#[case(100, 30, 75, 25)]
fn test_holdout_split_sizes(
    #[case] len: usize,
    #[case] horizon: usize,
    #[case] expected_train: usize,
    #[case] expected_holdout: usize,
) {
    let values: Vec<f64> = (0..len).map(|i| i as f64).collect();
    let (train, holdout) = holdout_split(&values, horizon);

    assert_eq!(train.len(), expected_train);
    assert_eq!(holdout.len(), expected_holdout);
}

#[test]
fn test_optimizer_is_deterministic() {
    let series: Vec<f64> = (0..24).map(|i| 50.0 + (i as f64) * 1.5).collect();
    let grid = ParameterGrid::default();

    let first = optimize(&series, 6, &grid);
    let second = optimize(&series, 6, &grid);

    assert_eq!(first.best_parameters, second.best_parameters);
    assert_eq!(first.best_error, second.best_error);
}

#[test]
fn test_optimizer_converges_on_trending_series() {
    let series: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64) * 2.0).collect();
    let result = optimize(&series, 5, &ParameterGrid::default());

    assert!(result.converged());
    assert!(result.best_error >= 0.0);
}

#[test]
fn test_optimizer_detects_seasonality() {
    // Five full cycles of a period-4 pattern; the seasonal fit matches the
    // holdout exactly and must beat every non-seasonal candidate
    let series: Vec<f64> = [10.0, 20.0, 30.0, 40.0].repeat(5);
    let result = optimize(&series, 4, &ParameterGrid::default());

    assert!(result.converged());
    assert_eq!(result.best_parameters.season_length(), 4);
    assert_approx_eq!(result.best_error, 0.0);
}

#[test]
fn test_optimizer_falls_back_to_default_on_tiny_series() {
    // Two points leave no training data after the holdout split
    let result = optimize(&[1.0, 2.0], 3, &ParameterGrid::default());

    assert!(!result.converged());
    assert!(result.best_error.is_infinite());
    assert_eq!(result.best_parameters, SmoothingParameters::default());
}

#[test]
fn test_custom_grid_is_respected() {
    let series: Vec<f64> = (0..20).map(|i| 10.0 + i as f64).collect();
    let grid = ParameterGrid {
        alphas: vec![0.5],
        betas: vec![0.2],
        gammas: vec![0.0],
        season_lengths: vec![0],
        ..ParameterGrid::default()
    };

    let result = optimize(&series, 4, &grid);

    assert!(result.converged());
    assert_approx_eq!(result.best_parameters.alpha(), 0.5);
    assert_approx_eq!(result.best_parameters.beta(), 0.2);
    assert_eq!(result.best_parameters.season_length(), 0);
}
