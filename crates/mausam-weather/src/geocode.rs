//! Forward geocoding: convert a city name to coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use crate::types::{Location, WeatherError};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
    name: String,
    #[serde(default)]
    country: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        Self {
            display_name: result.name,
            country: result.country.unwrap_or_default(),
            latitude: result.latitude,
            longitude: result.longitude,
        }
    }
}

/// Resolves free-text city names to a single best-match [`Location`]
#[derive(Debug, Clone)]
pub struct Resolver {
    client: Arc<Client>,
    url: String,
    language: String,
}

impl Resolver {
    pub fn new(client: Arc<Client>, url: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            language: language.into(),
        }
    }

    /// Resolve `city` to the first geocoding match.
    ///
    /// `city` must already be trimmed and non-empty.
    ///
    /// # Errors
    ///
    /// [`WeatherError::GeocodingFailed`] when the request fails, returns a
    /// non-success status or an unreadable body; [`WeatherError::NoResults`]
    /// when the service knows no such place.
    pub async fn resolve(&self, city: &str) -> Result<Location, WeatherError> {
        let failed = |detail: String| WeatherError::GeocodingFailed {
            city: city.to_string(),
            detail,
        };

        tracing::debug!("Geocoding city: {}", city);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        if !response.status().is_success() {
            tracing::debug!("Geocoding returned status {}", response.status());
            return Err(failed(format!("status {}", response.status())));
        }

        let body = response.text().await.map_err(|e| failed(e.to_string()))?;
        let parsed: GeocodingResponse =
            serde_json::from_str(&body).map_err(|e| failed(format!("parse error: {}", e)))?;

        let first = parsed
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::NoResults(city.to_string()))?;

        let location = Location::from(first);
        tracing::info!(
            "Geocoded '{}' to {} ({}, {})",
            city,
            location.label(),
            location.latitude,
            location.longitude
        );
        Ok(location)
    }
}
