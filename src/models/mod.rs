//! Data models for the kweather pipeline
//!
//! - Location: resolved coordinates and the label shown above the forecast
//! - Weather: current conditions and per-day forecast entries
//! - Forecast: the bundle produced by one load cycle

pub mod forecast;
pub mod location;
pub mod weather;

pub use forecast::ForecastBundle;
pub use location::{DEVICE_LOCATION_LABEL, Location, Position};
pub use weather::{CurrentConditions, DailyForecastEntry};
