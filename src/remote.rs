//! Client for an external forecasting service.
//!
//! The wire contract: POST `{history: [{timestamp, value}], horizon}` and
//! receive an ordered array of `{timestamp, predictedValue}`. Any non-2xx
//! status, malformed body, or timeout is a `RemoteUnavailable` error; the
//! orchestrator treats all of these identically and falls back locally.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A single observed point sent to the remote service
#[derive(Debug, Clone, Serialize)]
pub struct HistoryPoint {
    /// Position of the observation, as a unix timestamp or plain index
    pub timestamp: i64,
    /// Observed value
    pub value: f64,
}

#[derive(Debug, Serialize)]
struct RemoteForecastRequest<'a> {
    history: &'a [HistoryPoint],
    horizon: usize,
}

/// A single predicted point returned by the remote service
#[derive(Debug, Clone, Deserialize)]
pub struct RemotePoint {
    /// Position of the prediction
    pub timestamp: i64,
    /// Predicted value
    #[serde(rename = "predictedValue")]
    pub predicted_value: f64,
}

/// Source of remotely computed forecasts.
///
/// The engine only depends on this trait; tests substitute a stub and the
/// production implementation is [`RemoteForecaster`].
pub trait RemoteSource {
    /// Request `horizon` predicted values for the given history.
    ///
    /// At most one attempt is made per call; the returned future must
    /// resolve within a bounded time.
    fn fetch(
        &self,
        values: &[f64],
        horizon: usize,
    ) -> impl Future<Output = Result<Vec<f64>>> + Send;
}

/// HTTP client for a remote forecasting service
#[derive(Debug, Clone)]
pub struct RemoteForecaster {
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl RemoteForecaster {
    /// Create a client for the given endpoint with the default timeout
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit per-request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
            timeout,
        })
    }

    /// Get the configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, history: &[HistoryPoint], horizon: usize) -> Result<Vec<f64>> {
        let request = RemoteForecastRequest { history, horizon };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ForecastError::RemoteUnavailable(format!(
                "Remote service returned status {}",
                response.status()
            )));
        }

        let points: Vec<RemotePoint> = response.json().await?;
        if points.len() != horizon {
            return Err(ForecastError::RemoteUnavailable(format!(
                "Remote service returned {} values, expected {}",
                points.len(),
                horizon
            )));
        }

        Ok(points.into_iter().map(|p| p.predicted_value).collect())
    }
}

impl RemoteSource for RemoteForecaster {
    async fn fetch(&self, values: &[f64], horizon: usize) -> Result<Vec<f64>> {
        let history: Vec<HistoryPoint> = values
            .iter()
            .enumerate()
            .map(|(i, &value)| HistoryPoint {
                timestamp: i as i64,
                value,
            })
            .collect();

        // The reqwest client has its own timeout; this outer bound also
        // covers connection setup and body streaming.
        match timeout(self.timeout, self.request(&history, horizon)).await {
            Ok(result) => result,
            Err(_) => Err(ForecastError::RemoteUnavailable(format!(
                "Remote service did not respond within {:?}",
                self.timeout
            ))),
        }
    }
}
