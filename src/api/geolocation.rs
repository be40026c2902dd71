//! IP-based geolocation used to pre-fill the farm coordinates

use super::traits::GeolocationProvider;
use crate::storage::FarmLocation;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Default lookup endpoint
pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json/?fields=status,lat,lon";

#[derive(Debug, Deserialize)]
struct IpLocation {
    #[serde(default)]
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpLocation {
    fn into_location(self) -> Result<FarmLocation> {
        if !self.status.is_empty() && self.status != "success" {
            bail!("geolocation lookup failed with status {}", self.status);
        }
        match (self.lat, self.lon) {
            (Some(latitude), Some(longitude)) => Ok(FarmLocation {
                latitude,
                longitude,
            }),
            _ => bail!("geolocation response had no coordinates"),
        }
    }
}

pub struct IpGeolocation {
    http: Client,
    url: String,
}

impl IpGeolocation {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl GeolocationProvider for IpGeolocation {
    async fn locate(&self) -> Result<FarmLocation> {
        let body: IpLocation = self
            .http
            .get(&self.url)
            .send()
            .await
            .context("Failed to reach geolocation service")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to decode geolocation response")?;
        body.into_location()
    }
}
