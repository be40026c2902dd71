//! Wire types of the Crop Compass land API
//!
//! Every endpoint wraps its payload in a `data` envelope; weather and
//! rainfall nest a second level underneath.

use serde::{Deserialize, Serialize};

/// `{ "data": T }`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// `GET /weather`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    #[serde(default)]
    pub days: Vec<WeatherDay>,
}

/// One day of the weather forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDay {
    /// `YYYY-MM-DD`
    pub datetime: String,
    pub temp: f64,
    pub tempmin: f64,
    pub tempmax: f64,
    #[serde(default)]
    pub humidity: f64,
}

/// `GET /rainfall` wraps the records in `data.data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainfallSeries {
    #[serde(default)]
    pub data: Vec<RainfallRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainfallRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub value: RainfallValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RainfallValue {
    pub avg: f64,
}

/// A single SoilGrids property summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilMeasure {
    pub mean: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub label: String,
}

/// `GET /soilgrids`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProperties {
    pub cec: SoilMeasure,
    pub nitrogen: SoilMeasure,
    pub phh2o: SoilMeasure,
    pub sand: SoilMeasure,
    pub soc: SoilMeasure,
}

/// `GET /prediction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Recommended crop
    pub prediction: String,
    /// Markdown explanation
    #[serde(default)]
    pub description: String,
}
