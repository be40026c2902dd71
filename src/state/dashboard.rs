//! Dashboard panel state and the mapping from API payloads to chart series

use crate::api::models::{Prediction, RainfallRecord, SoilProperties, WeatherReport};
use crate::storage::FarmLocation;

/// Lifecycle of one independently fetched panel
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    /// The fetch failed; the panel renders as empty
    Failed,
}

impl<T> PanelState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            PanelState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Store the outcome of a fetch
    pub fn resolve(&mut self, result: Option<T>) {
        *self = match result {
            Some(value) => PanelState::Loaded(value),
            None => PanelState::Failed,
        };
    }
}

/// One named line on a chart. `x` values are category labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub id: &'static str,
    pub points: Vec<(String, f64)>,
}

impl Series {
    /// `(index, y)` pairs for plotting on a category axis
    pub fn indexed(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, (_, y))| (i as f64, *y))
            .collect()
    }
}

/// Min/max over the y values of all series, padded so flat lines stay visible
pub fn y_bounds(series: &[Series]) -> [f64; 2] {
    let values = series.iter().flat_map(|s| s.points.iter().map(|(_, y)| *y));
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if (max - min).abs() < f64::EPSILON {
        return [min - 1.0, max + 1.0];
    }
    [min, max]
}

/// `2024-10-04` -> `10-04`
fn month_day(datetime: &str) -> String {
    datetime.get(5..).unwrap_or(datetime).to_string()
}

/// Temperature, Min Temperature and Max Temperature lines
pub fn temperature_series(report: &WeatherReport) -> Vec<Series> {
    let line = |id, pick: fn(&crate::api::models::WeatherDay) -> f64| Series {
        id,
        points: report
            .days
            .iter()
            .map(|day| (month_day(&day.datetime), pick(day)))
            .collect(),
    };
    vec![
        line("Temperature", |d| d.temp),
        line("Min Temperature", |d| d.tempmin),
        line("Max Temperature", |d| d.tempmax),
    ]
}

pub fn humidity_series(report: &WeatherReport) -> Vec<Series> {
    vec![Series {
        id: "Humidity",
        points: report
            .days
            .iter()
            .map(|day| (month_day(&day.datetime), day.humidity))
            .collect(),
    }]
}

/// Rainfall averages labelled `month-day`
pub fn rainfall_series(records: &[RainfallRecord]) -> Vec<Series> {
    vec![Series {
        id: "Rainfall",
        points: records
            .iter()
            .map(|r| (format!("{}-{}", r.month, r.day), r.value.avg))
            .collect(),
    }]
}

/// Shown when rainfall data could not be fetched
pub fn sample_rainfall_series() -> Vec<Series> {
    const SAMPLE: [(&str, f64); 12] = [
        ("2024-10-04", 12.0),
        ("2024-10-05", 5.0),
        ("2024-10-06", 22.0),
        ("2024-10-07", 0.0),
        ("2024-10-08", 18.0),
        ("2024-10-09", 35.0),
        ("2024-10-10", 10.0),
        ("2024-10-11", 45.0),
        ("2024-10-12", 30.0),
        ("2024-10-13", 3.0),
        ("2024-10-14", 20.0),
        ("2024-10-15", 7.0),
    ];
    vec![Series {
        id: "Rainfall",
        points: SAMPLE
            .iter()
            .map(|(x, y)| (month_day(x), *y))
            .collect(),
    }]
}

/// A soil property line on the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct SoilReading {
    pub name: &'static str,
    pub value: f64,
    pub unit: Option<String>,
}

/// Nitrogen, pH of water, cation exchange capacity and organic carbon.
/// SoilGrids reports pH multiplied by ten.
pub fn soil_readings(soil: &SoilProperties) -> Vec<SoilReading> {
    vec![
        SoilReading {
            name: "Nitrogen",
            value: soil.nitrogen.mean,
            unit: Some(soil.nitrogen.unit.clone()),
        },
        SoilReading {
            name: "pH of water",
            value: soil.phh2o.mean / 10.0,
            unit: None,
        },
        SoilReading {
            name: "Cation exchange capacity",
            value: soil.cec.mean,
            unit: Some(soil.cec.unit.clone()),
        },
        SoilReading {
            name: "Soil organic carbon",
            value: soil.soc.mean,
            unit: Some(soil.soc.unit.clone()),
        },
    ]
}

/// Everything the dashboard renders
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Location the panels were fetched for; `None` means not signed up
    pub location: Option<FarmLocation>,
    pub weather: PanelState<WeatherReport>,
    pub rainfall: PanelState<Vec<RainfallRecord>>,
    pub soil: PanelState<SoilProperties>,
    pub prediction: PanelState<Prediction>,
    /// Advances every frame while something is loading
    pub spinner_tick: usize,
    /// Bumped by every fetch; results tagged with an older value are stale
    pub fetch_generation: u64,
}

impl DashboardState {
    /// Mark every panel as loading for `location` and return the new
    /// fetch generation
    pub fn begin_fetch(&mut self, location: FarmLocation) -> u64 {
        self.fetch_generation = self.fetch_generation.wrapping_add(1);
        self.location = Some(location);
        self.weather = PanelState::Loading;
        self.rainfall = PanelState::Loading;
        self.soil = PanelState::Loading;
        self.prediction = PanelState::Loading;
        self.fetch_generation
    }

    /// Forget the location and every panel, invalidating in-flight fetches
    pub fn clear(&mut self) {
        self.fetch_generation = self.fetch_generation.wrapping_add(1);
        self.location = None;
        self.weather = PanelState::Idle;
        self.rainfall = PanelState::Idle;
        self.soil = PanelState::Idle;
        self.prediction = PanelState::Idle;
    }

    /// Whether a result tagged with `generation` belongs to the latest fetch
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.fetch_generation
    }

    pub fn is_loading(&self) -> bool {
        self.weather.is_loading()
            || self.rainfall.is_loading()
            || self.soil.is_loading()
            || self.prediction.is_loading()
    }

    pub fn tick(&mut self) {
        if self.is_loading() {
            self.spinner_tick = self.spinner_tick.wrapping_add(1);
        }
    }

    pub fn temperature(&self) -> Vec<Series> {
        self.weather.loaded().map(temperature_series).unwrap_or_default()
    }

    pub fn humidity(&self) -> Vec<Series> {
        self.weather.loaded().map(humidity_series).unwrap_or_default()
    }

    pub fn rainfall(&self) -> Vec<Series> {
        match self.rainfall.loaded() {
            Some(records) => rainfall_series(records),
            None => sample_rainfall_series(),
        }
    }

    pub fn soil_readings(&self) -> Option<Vec<SoilReading>> {
        self.soil.loaded().map(soil_readings)
    }
}
