//! Remote services: the Crop Compass land API and IP geolocation

mod client;
mod geolocation;
pub mod models;
mod traits;

pub use client::{FarmApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use geolocation::{IpGeolocation, DEFAULT_GEOLOCATION_URL};
pub use traits::{FarmApi, GeolocationProvider};

#[cfg(test)]
pub use traits::{MockFarmApi, MockGeolocationProvider};
