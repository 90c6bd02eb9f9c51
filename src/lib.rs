//! `kweather` - weather lookup widget and static file server
//!
//! Resolves a city name or the device position through Open-Meteo, fetches
//! current conditions and the daily forecast, and renders them together with
//! the "weather with a K" feels-like temperature.

pub mod api;
pub mod conditions;
pub mod config;
pub mod controller;
pub mod error;
pub mod feels_like;
pub mod geolocation;
pub mod logging;
pub mod models;
pub mod render;
pub mod static_files;
pub mod weather;
pub mod web;
pub mod widget;

// Re-export core types for public API
pub use conditions::{Condition, describe};
pub use config::KWeatherConfig;
pub use controller::{InputController, LoadState};
pub use error::{GeolocationError, KWeatherError};
pub use feels_like::weather_with_k;
pub use geolocation::{DeviceLocation, Geolocator};
pub use models::{CurrentConditions, DailyForecastEntry, ForecastBundle, Location, Position};
pub use render::View;
pub use weather::{OpenMeteoClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, KWeatherError>;
