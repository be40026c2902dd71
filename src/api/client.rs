//! HTTP client for the Crop Compass land API
//!
//! Each call is a single GET keyed by the farm coordinates. There is no
//! retry: a failed request is reported once and the caller decides what
//! to show.

use super::models::{Envelope, Prediction, RainfallRecord, RainfallSeries, SoilProperties, WeatherReport};
use super::traits::FarmApi;
use crate::storage::FarmLocation;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Default API base URL
pub const DEFAULT_API_URL: &str = "https://crop-compass-server.fly.dev/api/v1/land";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },
}

/// Client for the land endpoints (`/weather`, `/rainfall`, `/soilgrids`,
/// `/prediction`)
#[derive(Debug, Clone)]
pub struct FarmApiClient {
    http: Client,
    base_url: String,
}

impl FarmApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for an endpoint at the given location
    pub fn endpoint_url(&self, endpoint: &str, location: FarmLocation) -> String {
        format!(
            "{}/{}?lat={}&lon={}",
            self.base_url, endpoint, location.latitude, location.longitude
        )
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        location: FarmLocation,
    ) -> Result<T> {
        let url = self.endpoint_url(endpoint, location);
        tracing::debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {endpoint}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { endpoint, status }.into());
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to decode {endpoint} response"))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl FarmApi for FarmApiClient {
    async fn weather(&self, location: FarmLocation) -> Result<WeatherReport> {
        self.get("weather", location).await
    }

    async fn rainfall(&self, location: FarmLocation) -> Result<Vec<RainfallRecord>> {
        let series: RainfallSeries = self.get("rainfall", location).await?;
        Ok(series.data)
    }

    async fn soil(&self, location: FarmLocation) -> Result<SoilProperties> {
        self.get("soilgrids", location).await
    }

    async fn prediction(&self, location: FarmLocation) -> Result<Prediction> {
        self.get("prediction", location).await
    }
}
