//! `OpenMeteo` API response structures and conversion into the domain models

use crate::KWeatherError;
use crate::models::{CurrentConditions, DailyForecastEntry, ForecastBundle, Location};
use chrono::NaiveDate;
use serde::Deserialize;

/// Current fields requested from the forecast endpoint
pub const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,weather_code,wind_speed_10m";

/// Daily fields requested from the forecast endpoint
pub const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max,apparent_temperature_max,apparent_temperature_min";

/// Geocoding response from `OpenMeteo`. `results` is omitted when nothing matched.
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// First-level administrative region, e.g. a state
    pub admin1: Option<String>,
    pub country: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        Location::from_parts(
            result.latitude,
            result.longitude,
            &result.name,
            result.admin1.as_deref(),
            result.country.as_deref(),
        )
    }
}

/// Forecast response from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: CurrentData,
    pub daily: DailyData,
}

#[derive(Debug, Deserialize)]
pub struct CurrentData {
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub weather_code: i32,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
}

/// Daily data as parallel arrays, one element per day
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<NaiveDate>,
    pub weather_code: Vec<i32>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Vec<f64>,
    #[serde(default)]
    pub precipitation_probability_max: Option<Vec<Option<f64>>>,
    pub apparent_temperature_max: Vec<f64>,
    pub apparent_temperature_min: Vec<f64>,
}

impl DailyData {
    fn check_parallel(&self) -> Result<(), KWeatherError> {
        let days = self.time.len();
        let mut lengths = vec![
            ("weather_code", self.weather_code.len()),
            ("temperature_2m_max", self.temperature_max.len()),
            ("temperature_2m_min", self.temperature_min.len()),
            ("apparent_temperature_max", self.apparent_temperature_max.len()),
            ("apparent_temperature_min", self.apparent_temperature_min.len()),
        ];
        if let Some(precipitation) = &self.precipitation_probability_max {
            lengths.push(("precipitation_probability_max", precipitation.len()));
        }

        match lengths.into_iter().find(|(_, len)| *len != days) {
            Some((field, len)) => Err(KWeatherError::invalid_response(format!(
                "daily.{field} has {len} entries but daily.time has {days}"
            ))),
            None => Ok(()),
        }
    }

    /// Precipitation for day `i`; absent array or null entry means 0
    fn precipitation(&self, i: usize) -> u8 {
        self.precipitation_probability_max
            .as_ref()
            .and_then(|values| values.get(i).copied().flatten())
            .map_or(0, |p| p.round().clamp(0.0, 100.0) as u8)
    }
}

impl TryFrom<ForecastResponse> for ForecastBundle {
    type Error = KWeatherError;

    fn try_from(response: ForecastResponse) -> Result<Self, Self::Error> {
        let daily = &response.daily;
        daily.check_parallel()?;

        let entries = daily
            .time
            .iter()
            .enumerate()
            .map(|(i, date)| DailyForecastEntry {
                date: *date,
                weather_code: daily.weather_code[i],
                temp_max: daily.temperature_max[i],
                temp_min: daily.temperature_min[i],
                precip_probability_max: daily.precipitation(i),
                apparent_temp_max: daily.apparent_temperature_max[i],
                apparent_temp_min: daily.apparent_temperature_min[i],
            })
            .collect();

        let current = CurrentConditions {
            temperature: response.current.temperature,
            apparent_temperature: response.current.apparent_temperature,
            weather_code: response.current.weather_code,
            wind_speed: response.current.wind_speed,
        };

        Ok(ForecastBundle::new(current, entries))
    }
}
