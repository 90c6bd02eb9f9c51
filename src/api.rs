//! JSON API over the controller
//!
//! `GET /api/forecast?city=NAME` or `GET /api/forecast?lat=..&lon=..` runs one
//! load cycle and returns the rendered view. Without any parameter the
//! configured default city is loaded. The page in `public/` supplies browser
//! coordinates for the "use my location" path.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use crate::KWeatherError;
use crate::controller::{InputController, LoadState};
use crate::error::GeolocationError;
use crate::geolocation::DeviceLocation;
use crate::models::{DEVICE_LOCATION_LABEL, Position};
use crate::render::View;
use crate::web::AppState;

/// Raw query parameters. Coordinates stay strings so a malformed value is
/// reported through the view instead of a bare extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub label: Option<String>,
}

impl ForecastQuery {
    /// `None` when no coordinate was given at all
    pub fn position(&self) -> Option<Result<Position, GeolocationError>> {
        if self.lat.is_none() && self.lon.is_none() {
            return None;
        }
        let parse = |value: &Option<String>| {
            value
                .as_deref()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };

        Some(match (parse(&self.lat), parse(&self.lon)) {
            (Some(latitude), Some(longitude))
                if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) =>
            {
                Ok(Position {
                    latitude,
                    longitude,
                })
            }
            _ => Err(GeolocationError::PositionUnavailable),
        })
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/forecast", get(get_forecast))
}

/// HTTP status for a failed load cycle
#[must_use]
pub fn status_for(err: &KWeatherError) -> StatusCode {
    match err {
        KWeatherError::EmptyInput | KWeatherError::Geolocation(_) => StatusCode::BAD_REQUEST,
        KWeatherError::NotFound { .. } => StatusCode::NOT_FOUND,
        KWeatherError::Network { .. } => StatusCode::BAD_GATEWAY,
        KWeatherError::InvalidResponse { .. }
        | KWeatherError::Config { .. }
        | KWeatherError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> (StatusCode, Json<View>) {
    let mut controller = InputController::new(
        state.client.clone(),
        DeviceLocation::default(),
        state.default_city.as_ref(),
        View::new(state.locale),
    );

    match (query.position(), query.city.as_deref()) {
        (Some(Ok(position)), _) => {
            let label = query.label.as_deref().unwrap_or(DEVICE_LOCATION_LABEL);
            controller
                .load_coordinates(position.latitude, position.longitude, label)
                .await;
        }
        (Some(Err(err)), _) => controller.reject(err.into()),
        (None, Some(city)) => controller.submit_search(city).await,
        (None, None) => controller.start().await,
    }

    let status = match controller.state() {
        LoadState::Shown => StatusCode::OK,
        LoadState::Failed(err) => status_for(err),
        LoadState::Idle | LoadState::Loading => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(controller.view().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn query(lat: Option<&str>, lon: Option<&str>) -> ForecastQuery {
        ForecastQuery {
            lat: lat.map(str::to_string),
            lon: lon.map(str::to_string),
            ..ForecastQuery::default()
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&KWeatherError::EmptyInput), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&KWeatherError::not_found("x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&KWeatherError::network("Could not load weather data", Some(500))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&KWeatherError::invalid_response("garbage")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&GeolocationError::PositionUnavailable.into()),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_no_coordinates() {
        assert!(query(None, None).position().is_none());
    }

    #[test]
    fn test_valid_coordinates() {
        let position = query(Some("41.85"), Some(" -87.65")).position().unwrap().unwrap();
        assert_eq!(position.latitude, 41.85);
        assert_eq!(position.longitude, -87.65);
    }

    #[rstest]
    #[case(Some("41.85"), None)]
    #[case(None, Some("-87.65"))]
    #[case(Some("abc"), Some("-87.65"))]
    #[case(Some("NaN"), Some("0"))]
    #[case(Some("91"), Some("0"))]
    #[case(Some("0"), Some("-180.5"))]
    fn test_bad_coordinates(#[case] lat: Option<&str>, #[case] lon: Option<&str>) {
        assert_eq!(
            query(lat, lon).position(),
            Some(Err(GeolocationError::PositionUnavailable))
        );
    }
}
