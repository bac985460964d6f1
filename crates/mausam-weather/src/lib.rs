//! Weather service for Mausam
//!
//! Resolves city names and reports current conditions via the Open-Meteo
//! geocoding and forecast APIs, with a condition label and a seasonal advisory.

pub mod advisory;
pub mod codes;
pub mod geocode;
pub mod provider;
pub mod types;

pub use advisory::{select_advisory, Advisory};
pub use codes::{condition_label, WeatherCodeTable, UNKNOWN_LABEL, WEATHER_CODES};
pub use geocode::Resolver;
pub use provider::{ProviderSettings, WeatherProvider};
pub use types::*;
