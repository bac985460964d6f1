use mausam_core::LookupError;
use mausam_weather::WeatherError;

/// Classify a provider failure into the lookup error shown to the user.
pub fn lookup_error(e: WeatherError) -> LookupError {
    match e {
        WeatherError::GeocodingFailed { city, detail } => LookupError::CityNotFound { city, detail },
        WeatherError::NoResults(city) => LookupError::NoMatchingCity { city },
        WeatherError::ForecastFailed(detail) => LookupError::WeatherUnavailable(detail),
        // Only raised while building the provider
        WeatherError::Client(e) => LookupError::WeatherUnavailable(e.to_string()),
    }
}
