//! "Weather with a K": the shifted feels-like temperature

/// Below this the reading is raised
pub const COLD_THRESHOLD: f64 = 40.0;
/// Above this the reading is lowered
pub const HOT_THRESHOLD: f64 = 65.0;
/// Size of the shift in degrees Fahrenheit
pub const SHIFT: f64 = 20.0;

/// Shift a feels-like reading toward the comfortable band.
///
/// Readings in `[40, 65]` pass through unchanged.
#[must_use]
pub fn weather_with_k(feels_like: f64) -> f64 {
    if feels_like < COLD_THRESHOLD {
        feels_like + SHIFT
    } else if feels_like > HOT_THRESHOLD {
        feels_like - SHIFT
    } else {
        feels_like
    }
}
