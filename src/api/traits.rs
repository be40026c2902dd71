//! Trait abstractions over the remote services, enabling mocking in tests

use super::models::{Prediction, RainfallRecord, SoilProperties, WeatherReport};
use crate::storage::FarmLocation;
use anyhow::Result;
use async_trait::async_trait;

/// Read-only access to the Crop Compass land endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FarmApi: Send + Sync {
    /// Daily weather forecast for the plot
    async fn weather(&self, location: FarmLocation) -> Result<WeatherReport>;

    /// Daily rainfall history for the plot
    async fn rainfall(&self, location: FarmLocation) -> Result<Vec<RainfallRecord>>;

    /// Soil property summary
    async fn soil(&self, location: FarmLocation) -> Result<SoilProperties>;

    /// Crop recommendation
    async fn prediction(&self, location: FarmLocation) -> Result<Prediction>;
}

/// Best-effort lookup of where the user is
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn locate(&self) -> Result<FarmLocation>;
}
