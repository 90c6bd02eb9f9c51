//! Error types and handling for the `kweather` application

use thiserror::Error;

/// Fallback status text for failures that carry no user-facing message
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Failures reported by the device geolocation capability
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Geolocation is not supported")]
    Unsupported,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable")]
    PositionUnavailable,
}

/// Main error type for the `kweather` application
#[derive(Error, Debug)]
pub enum KWeatherError {
    /// The search box was empty or only whitespace
    #[error("Invalid input: city name is empty")]
    EmptyInput,

    /// The geocoder returned no match for the query
    #[error("No geocoding match for '{query}'")]
    NotFound { query: String },

    /// Non-success HTTP status or transport failure talking to a provider
    #[error("Network error: {message}")]
    Network {
        message: String,
        status: Option<u16>,
    },

    /// The provider answered with a body we could not use
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Device position could not be obtained
    #[error("Geolocation error: {0}")]
    Geolocation(#[from] GeolocationError),

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl KWeatherError {
    /// Create a new network error with the text shown to the user
    pub fn network<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        Self::Network {
            message: message.into(),
            status,
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create a new invalid-response error
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Status-line text for this error
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            KWeatherError::EmptyInput => "Enter a city name".to_string(),
            KWeatherError::NotFound { .. } => "No matching city found".to_string(),
            KWeatherError::Network { message, .. } => message.clone(),
            KWeatherError::Geolocation(GeolocationError::Unsupported) => {
                "Geolocation is not supported on this device".to_string()
            }
            KWeatherError::Geolocation(_) => {
                "Unable to access location. Search by city instead.".to_string()
            }
            KWeatherError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            KWeatherError::InvalidResponse { .. } | KWeatherError::Io { .. } => {
                GENERIC_FAILURE.to_string()
            }
        }
    }
}
