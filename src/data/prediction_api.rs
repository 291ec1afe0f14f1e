use reqwest::Client;
use tracing::{debug, warn};
use crate::data::types::{is_probability, PredictionRequest, PredictionResponse, StatsResponse};

/// HTTP client for the churn prediction service.
///
/// Holds no mutable state: every call is an independent round trip with no
/// retry, no caching and no client-side timeout.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: String,
}

/// The only two failures callers ever see.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("stats unavailable")]
    StatsUnavailable(#[source] FailureCause),

    #[error("prediction failed")]
    PredictionFailed(#[source] FailureCause),
}

/// Underlying reason for an [`ApiError`], kept for logs.
#[derive(Debug, thiserror::Error)]
pub enum FailureCause {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

impl PredictionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch aggregate stats from `GET {base_url}/stats`
    pub async fn fetch_stats(&self) -> Result<StatsResponse, ApiError> {
        let url = format!("{}/stats", self.base_url);
        debug!("GET {}", url);

        self.get_stats(&url).await.map_err(|cause| {
            warn!("Stats request to {} failed: {}", url, cause);
            ApiError::StatsUnavailable(cause)
        })
    }

    /// Submit a request to `POST {base_url}/prediction`.
    ///
    /// The request is only borrowed so the caller's draft survives a failure.
    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, ApiError> {
        let url = format!("{}/prediction", self.base_url);
        debug!("POST {}", url);

        self.post_prediction(&url, request).await.map_err(|cause| {
            warn!("Prediction request to {} failed: {}", url, cause);
            ApiError::PredictionFailed(cause)
        })
    }

    async fn get_stats(&self, url: &str) -> Result<StatsResponse, FailureCause> {
        let stats: StatsResponse = self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !is_probability(stats.mean_churn_probability) {
            return Err(FailureCause::OutOfRange {
                field: "meanChurnProbability",
                value: stats.mean_churn_probability,
            });
        }

        Ok(stats)
    }

    async fn post_prediction(
        &self,
        url: &str,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, FailureCause> {
        let response: PredictionResponse = self.client
            .post(url)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !is_probability(response.churn_probability) {
            return Err(FailureCause::OutOfRange {
                field: "churnProbability",
                value: response.churn_probability,
            });
        }

        debug!(
            "Prediction received: probability={:.3}, will_churn={}",
            response.churn_probability, response.will_churn
        );

        Ok(response)
    }
}
