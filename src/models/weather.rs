//! Current conditions and daily forecast entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Conditions right now at the requested coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Air temperature in Fahrenheit
    pub temperature: f64,
    /// Apparent ("feels like") temperature in Fahrenheit
    pub apparent_temperature: f64,
    /// WMO weather code
    pub weather_code: i32,
    /// Wind speed in mph
    pub wind_speed: f64,
}

/// One calendar day of the forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyForecastEntry {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temp_max: f64,
    pub temp_min: f64,
    /// Maximum precipitation probability in percent
    pub precip_probability_max: u8,
    pub apparent_temp_max: f64,
    pub apparent_temp_min: f64,
}

impl DailyForecastEntry {
    /// Mean of the day's apparent max and min
    #[must_use]
    pub fn feels_like(&self) -> f64 {
        (self.apparent_temp_max + self.apparent_temp_min) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_feels_like_is_mean() {
        let entry = DailyForecastEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            weather_code: 3,
            temp_max: 40.0,
            temp_min: 30.0,
            precip_probability_max: 0,
            apparent_temp_max: 35.0,
            apparent_temp_min: 24.0,
        };
        assert_eq!(entry.feels_like(), 29.5);
    }
}
