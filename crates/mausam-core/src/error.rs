//! Centralized error types for the Mausam application.
//!
//! Lookup failures keep their three kinds distinguishable and carry the
//! exact message shown in the widget's error panel. Transport detail stays
//! in the `Display` output for logging only.

use thiserror::Error;

/// Broad category of a lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    Validation,
    NotFound,
    WeatherUnavailable,
}

/// Failures of a single city lookup. All are terminal for that lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// Input was empty or whitespace only; no request was made.
    #[error("City name is empty")]
    EmptyInput,

    /// The geocoding request itself failed (transport or non-success status).
    #[error("Geocoding failed for '{city}': {detail}")]
    CityNotFound { city: String, detail: String },

    /// The geocoding request succeeded but returned no results.
    #[error("No geocoding results for '{city}'")]
    NoMatchingCity { city: String },

    /// The forecast request failed.
    #[error("Forecast unavailable: {0}")]
    WeatherUnavailable(String),
}

/// Messages shown in the error panel, Hindi first with the English in parentheses.
pub mod messages {
    pub const EMPTY_INPUT: &str = "कृपया शहर का नाम दर्ज करें (Please enter city name)";
    pub const CITY_NOT_FOUND: &str = "शहर नहीं मिला (City not found)";
    pub const NO_MATCHING_CITY: &str =
        "शहर नहीं मिला। कृपया सही नाम दर्ज करें (City not found. Please enter correct name)";
    pub const WEATHER_UNAVAILABLE: &str =
        "मौसम की जानकारी प्राप्त नहीं हो सकी (Weather data not available)";
}

impl LookupError {
    pub fn kind(&self) -> LookupErrorKind {
        match self {
            LookupError::EmptyInput => LookupErrorKind::Validation,
            LookupError::CityNotFound { .. } | LookupError::NoMatchingCity { .. } => {
                LookupErrorKind::NotFound
            }
            LookupError::WeatherUnavailable(_) => LookupErrorKind::WeatherUnavailable,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::EmptyInput => messages::EMPTY_INPUT,
            LookupError::CityNotFound { .. } => messages::CITY_NOT_FOUND,
            LookupError::NoMatchingCity { .. } => messages::NO_MATCHING_CITY,
            LookupError::WeatherUnavailable(_) => messages::WEATHER_UNAVAILABLE,
        }
    }
}
