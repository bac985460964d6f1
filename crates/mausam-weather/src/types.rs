use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::advisory::Advisory;

/// A place resolved from a free-text city name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub display_name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Combined label, e.g. "London, United Kingdom"
    pub fn label(&self) -> String {
        format!("{}, {}", self.display_name, self.country)
    }
}

/// Current conditions as reported by the forecast service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_celsius: f64,
    pub relative_humidity_percent: f64,
    pub precipitation_probability_percent: Option<f64>,
    /// WMO code; `None` when the forecast left it out
    pub weather_code: Option<i32>,
}

/// Everything produced by one lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: Location,
    pub conditions: CurrentConditions,
    pub condition_label: String,
    /// Reported probability, or a placeholder estimate when the service omitted it
    pub precipitation_probability: f64,
    /// True when `precipitation_probability` is the placeholder, not a forecast
    pub precipitation_estimated: bool,
    pub advisory: Advisory,
    pub fetched_at: DateTime<Utc>,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Geocoding request for '{city}' failed: {detail}")]
    GeocodingFailed { city: String, detail: String },
    #[error("No geocoding results for '{0}'")]
    NoResults(String),
    #[error("Forecast request failed: {0}")]
    ForecastFailed(String),
}
