//! Weather API client for `OpenMeteo`
//!
//! Resolves place names through the geocoding endpoint and fetches current
//! conditions plus the daily forecast in Fahrenheit and mph. A failed call
//! is reported once; there is no retry.

use crate::config::ApiConfig;
use crate::models::{ForecastBundle, Location};
use crate::{KWeatherError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

pub mod open_meteo;

/// Status text when the geocoding endpoint fails
pub const GEOCODE_FAILURE: &str = "Could not find that city";
/// Status text when the forecast endpoint fails
pub const FORECAST_FAILURE: &str = "Could not load weather data";

/// Source of locations and forecasts used by the controller
pub trait WeatherSource {
    /// Resolve a non-empty place name to its best match
    fn resolve_city(&self, name: &str) -> impl Future<Output = Result<Location>> + Send;

    fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> impl Future<Output = Result<ForecastBundle>> + Send;
}

/// HTTP client for the `OpenMeteo` geocoding and forecast endpoints
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    api: ApiConfig,
}

impl OpenMeteoClient {
    /// Create a new client for the configured endpoints
    pub fn new(api: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_seconds.into()))
            .user_agent(concat!("kweather/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| KWeatherError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, api })
    }

    fn geocode_url(&self, name: &str) -> String {
        format!(
            "{}?name={}&count=1&language=en&format=json",
            self.api.geocoding_url,
            urlencoding::encode(name)
        )
    }

    fn forecast_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}?latitude={}&longitude={}&temperature_unit=fahrenheit&wind_speed_unit=mph&timezone=auto&current={}&daily={}",
            self.api.forecast_url,
            latitude,
            longitude,
            open_meteo::CURRENT_FIELDS,
            open_meteo::DAILY_FIELDS
        )
    }

    /// GET `url` and decode the JSON body. `failure` is the status text used
    /// for transport errors and non-success responses.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, failure: &str) -> Result<T> {
        let start_time = Instant::now();
        debug!("OpenMeteo API request URL: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Request to OpenMeteo failed: {}", e);
            KWeatherError::network(failure, None)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "OpenMeteo returned HTTP {} after {:.3}s",
                status,
                start_time.elapsed().as_secs_f64()
            );
            return Err(KWeatherError::network(failure, Some(status.as_u16())));
        }

        let body = response.json::<T>().await.map_err(|e| {
            warn!("Failed to parse OpenMeteo response: {}", e);
            KWeatherError::invalid_response(format!("Failed to parse OpenMeteo response: {e}"))
        })?;

        let total_duration = start_time.elapsed();
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow API response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(body)
    }
}

impl WeatherSource for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn resolve_city(&self, name: &str) -> Result<Location> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KWeatherError::EmptyInput);
        }

        info!("Geocoding location: '{}'", name);
        let response: open_meteo::GeocodingResponse =
            self.get_json(&self.geocode_url(name), GEOCODE_FAILURE).await?;

        let result = response
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| {
                warn!("No results found for location '{}'", name);
                KWeatherError::not_found(name)
            })?;

        let location = Location::from(result);
        info!(
            "Resolved '{}' to {} ({})",
            name,
            location.display_label,
            location.format_coordinates()
        );
        Ok(location)
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<ForecastBundle> {
        info!(
            "Getting forecast for coordinates: {:.4}, {:.4}",
            latitude, longitude
        );
        let response: open_meteo::ForecastResponse = self
            .get_json(&self.forecast_url(latitude, longitude), FORECAST_FAILURE)
            .await?;

        let bundle = ForecastBundle::try_from(response)?;
        info!("Retrieved forecast with {} days", bundle.daily.len());
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenMeteoClient {
        OpenMeteoClient::new(ApiConfig::default()).unwrap()
    }

    #[test]
    fn test_geocode_url_encodes_name() {
        let url = client().geocode_url("São Paulo");
        assert!(url.starts_with("https://geocoding-api.open-meteo.com/v1/search?name=S%C3%A3o%20Paulo"));
        assert!(url.ends_with("&count=1&language=en&format=json"));
    }

    #[test]
    fn test_forecast_url_requests_units_and_fields() {
        let url = client().forecast_url(40.7, -74.0);
        assert!(url.contains("latitude=40.7&longitude=-74"));
        assert!(url.contains("temperature_unit=fahrenheit"));
        assert!(url.contains("wind_speed_unit=mph"));
        assert!(url.contains("timezone=auto"));
        assert!(url.contains(&format!("daily={}", open_meteo::DAILY_FIELDS)));
    }

    #[tokio::test]
    async fn test_blank_name_rejected_without_request() {
        let err = client().resolve_city("   ").await.unwrap_err();
        assert!(matches!(err, KWeatherError::EmptyInput));
    }
}
