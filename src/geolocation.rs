//! Device position for the "use my location" action

use crate::config::GeolocationConfig;
use crate::error::GeolocationError;
use crate::models::Position;
use std::future::Future;

/// A single-shot source of the device position
pub trait Geolocator {
    /// Whether this device can report a position at all
    fn is_supported(&self) -> bool;

    fn current_position(
        &self,
    ) -> impl Future<Output = Result<Position, GeolocationError>> + Send;
}

/// Position taken from configuration. Without one, geolocation is unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceLocation {
    position: Option<Position>,
}

impl DeviceLocation {
    #[must_use]
    pub fn new(position: Option<Position>) -> Self {
        Self { position }
    }

    #[must_use]
    pub fn from_config(config: &GeolocationConfig) -> Self {
        let position = match (config.latitude, config.longitude) {
            (Some(latitude), Some(longitude)) => Some(Position {
                latitude,
                longitude,
            }),
            _ => None,
        };
        Self::new(position)
    }
}

impl Geolocator for DeviceLocation {
    fn is_supported(&self) -> bool {
        self.position.is_some()
    }

    async fn current_position(&self) -> Result<Position, GeolocationError> {
        self.position.ok_or(GeolocationError::PositionUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_configured_position() {
        let config = GeolocationConfig {
            latitude: Some(47.6),
            longitude: Some(-122.3),
        };
        let device = DeviceLocation::from_config(&config);
        assert!(device.is_supported());
        let position = device.current_position().await.unwrap();
        assert_eq!(position.latitude, 47.6);
    }

    #[tokio::test]
    async fn test_unconfigured_is_unsupported() {
        let device = DeviceLocation::from_config(&GeolocationConfig::default());
        assert!(!device.is_supported());
        assert_eq!(
            device.current_position().await,
            Err(GeolocationError::PositionUnavailable)
        );
    }
}
