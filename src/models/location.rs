//! Location model for resolved coordinates

use serde::{Deserialize, Serialize};

/// Label used when the forecast comes from the device position
pub const DEVICE_LOCATION_LABEL: &str = "Your location";

/// Raw coordinates reported by a geolocation source
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// A place the forecast is fetched for
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Text shown above the today panel
    pub display_label: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, display_label: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            display_label: display_label.into(),
        }
    }

    /// Build a location from geocoder parts, skipping absent or blank ones
    #[must_use]
    pub fn from_parts(
        latitude: f64,
        longitude: f64,
        name: &str,
        region: Option<&str>,
        country: Option<&str>,
    ) -> Self {
        let label = [Some(name), region, country]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(latitude, longitude, label)
    }

    /// Location for the device position
    #[must_use]
    pub fn from_position(position: Position) -> Self {
        Self::new(position.latitude, position.longitude, DEVICE_LOCATION_LABEL)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_joins_all_parts() {
        let location = Location::from_parts(
            40.71,
            -74.01,
            "New York",
            Some("New York"),
            Some("United States"),
        );
        assert_eq!(location.display_label, "New York, New York, United States");
    }

    #[test]
    fn test_label_skips_missing_parts() {
        let location = Location::from_parts(51.5, -0.12, "London", None, Some("United Kingdom"));
        assert_eq!(location.display_label, "London, United Kingdom");

        let bare = Location::from_parts(0.0, 0.0, "Nowhere", Some(""), None);
        assert_eq!(bare.display_label, "Nowhere");
    }

    #[test]
    fn test_device_location_label() {
        let location = Location::from_position(Position {
            latitude: 46.8182,
            longitude: 8.2275,
        });
        assert_eq!(location.display_label, "Your location");
        assert_eq!(location.format_coordinates(), "46.8182, 8.2275");
    }
}
