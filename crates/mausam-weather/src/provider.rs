//! Current conditions from the Open-Meteo forecast API.
//!
//! A forecast that omits precipitation probability gets a random placeholder,
//! flagged on the report as estimated.

use crate::advisory::select_advisory;
use crate::codes::{condition_label, UNKNOWN_LABEL};
use crate::geocode::{Resolver, GEOCODING_URL};
use crate::types::{CurrentConditions, Location, WeatherError, WeatherReport};
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,precipitation_probability,weather_code";

/// Upper bound (exclusive) of the placeholder precipitation estimate
pub const ESTIMATE_CEILING_PERCENT: u8 = 30;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: ForecastCurrent,
}

#[derive(Debug, Deserialize)]
struct ForecastCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    #[serde(default)]
    precipitation_probability: Option<f64>,
    #[serde(default)]
    weather_code: Option<i32>,
}

impl From<ForecastCurrent> for CurrentConditions {
    fn from(current: ForecastCurrent) -> Self {
        Self {
            temperature_celsius: current.temperature_2m,
            relative_humidity_percent: current.relative_humidity_2m,
            precipitation_probability_percent: current.precipitation_probability,
            weather_code: current.weather_code,
        }
    }
}

/// Endpoint and client settings for [`WeatherProvider`]
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub language: String,
    /// `None` means requests never time out
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            geocoding_url: GEOCODING_URL.to_string(),
            forecast_url: FORECAST_URL.to_string(),
            language: "en".to_string(),
            timeout: None,
            user_agent: concat!("Mausam/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Resolves cities and reports their current weather
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    resolver: Resolver,
    forecast_url: String,
}

impl WeatherProvider {
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn new(settings: ProviderSettings) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(settings.user_agent);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = Arc::new(builder.build()?);

        Ok(Self {
            resolver: Resolver::new(client.clone(), settings.geocoding_url, settings.language),
            client,
            forecast_url: settings.forecast_url,
        })
    }

    /// Resolve `city` to a location.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    pub async fn resolve(&self, city: &str) -> Result<Location, WeatherError> {
        self.resolver.resolve(city).await
    }

    /// Fetch current conditions for `location` and derive label and advisory.
    ///
    /// # Errors
    ///
    /// [`WeatherError::ForecastFailed`] on transport failure, non-success
    /// status or a body without the expected `current` block.
    pub async fn report(&self, location: Location) -> Result<WeatherReport, WeatherError> {
        let conditions = self.fetch_current(&location).await?;
        Ok(build_report(location, conditions, &mut rand::thread_rng()))
    }

    /// Resolve `city`, then report its weather.
    ///
    /// # Errors
    ///
    /// Whatever the failing step returns; the forecast is never requested
    /// when resolution fails.
    pub async fn lookup(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let location = self.resolve(city).await?;
        self.report(location).await
    }

    async fn fetch_current(&self, location: &Location) -> Result<CurrentConditions, WeatherError> {
        tracing::debug!(
            "Fetching forecast for {}, {}",
            location.latitude,
            location.longitude
        );

        let response = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::ForecastFailed(e.to_string()))?;

        if !response.status().is_success() {
            tracing::debug!("Forecast returned status {}", response.status());
            return Err(WeatherError::ForecastFailed(format!(
                "status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::ForecastFailed(e.to_string()))?;
        let parsed: ForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::ForecastFailed(format!("parse error: {}", e)))?;

        Ok(parsed.current.into())
    }
}

/// Placeholder used when the forecast omits precipitation probability.
/// Not a forecast: a uniform integer in `[0, ESTIMATE_CEILING_PERCENT)`.
pub fn estimate_precipitation<R: Rng>(rng: &mut R) -> f64 {
    f64::from(rng.gen_range(0..ESTIMATE_CEILING_PERCENT))
}

fn build_report<R: Rng>(
    location: Location,
    conditions: CurrentConditions,
    rng: &mut R,
) -> WeatherReport {
    let label = conditions
        .weather_code
        .map_or(UNKNOWN_LABEL, condition_label);
    let (precipitation, estimated) = match conditions.precipitation_probability_percent {
        Some(p) => (p, false),
        None => {
            let estimate = estimate_precipitation(rng);
            tracing::debug!("No precipitation probability in forecast, estimating {}", estimate);
            (estimate, true)
        }
    };
    let advisory = select_advisory(conditions.temperature_celsius, label, precipitation);

    WeatherReport {
        location,
        conditions,
        condition_label: label.to_string(),
        precipitation_probability: precipitation,
        precipitation_estimated: estimated,
        advisory,
        fetched_at: chrono::Utc::now(),
    }
}
