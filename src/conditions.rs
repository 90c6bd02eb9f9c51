//! WMO weather code mapping
//!
//! Codes get a label from a fixed table and an icon from a coarser
//! classification into sky buckets.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::Serialize;

/// Label for codes missing from the table, today panel wording
pub const UNKNOWN_CONDITIONS: &str = "Unknown conditions";
/// Label for codes missing from the table, forecast card wording
pub const UNKNOWN: &str = "Unknown";

/// Icon bucket a weather code falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sky {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    /// Anything outside the buckets above
    Other,
}

impl Sky {
    /// Classify a WMO code; membership is by exact code
    #[must_use]
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51 | 53 | 55 | 61 | 63 | 65 | 80 | 81 => Self::Rain,
            71 | 73 | 75 | 85 => Self::Snow,
            95 => Self::Thunderstorm,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::PartlyCloudy => "🌤️",
            Self::Overcast => "☁️",
            Self::Fog => "🌫️",
            Self::Rain => "🌧️",
            Self::Snow => "❄️",
            Self::Thunderstorm => "⛈️",
            Self::Other => "🌡️",
        }
    }
}

/// Human-readable condition for a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub label: &'static str,
    pub icon: &'static str,
}

/// Table label for a code, `None` when the code is not in the table
#[must_use]
pub fn label(code: i32) -> Option<&'static str> {
    let label = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        80 => "Rain showers",
        81 => "Heavy rain showers",
        85 => "Snow showers",
        95 => "Thunderstorm",
        _ => return None,
    };
    Some(label)
}

#[must_use]
pub fn icon(code: i32) -> &'static str {
    Sky::from_wmo_code(code).icon()
}

/// Label and icon for a code, falling back to [`UNKNOWN_CONDITIONS`]
#[must_use]
pub fn describe(code: i32) -> Condition {
    Condition {
        label: label(code).unwrap_or(UNKNOWN_CONDITIONS),
        icon: icon(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Clear sky", "☀️")]
    #[case(1, "Mainly clear", "🌤️")]
    #[case(2, "Partly cloudy", "🌤️")]
    #[case(3, "Overcast", "☁️")]
    #[case(48, "Rime fog", "🌫️")]
    #[case(55, "Dense drizzle", "🌧️")]
    #[case(61, "Slight rain", "🌧️")]
    #[case(81, "Heavy rain showers", "🌧️")]
    #[case(75, "Heavy snow", "❄️")]
    #[case(85, "Snow showers", "❄️")]
    #[case(95, "Thunderstorm", "⛈️")]
    fn test_known_codes(
        #[case] code: i32,
        #[case] label: &'static str,
        #[case] icon: &'static str,
    ) {
        assert_eq!(describe(code), Condition { label, icon });
    }

    #[rstest]
    #[case(999)]
    #[case(-1)]
    #[case(82)]
    #[case(96)]
    fn test_unknown_codes_fall_back(#[case] code: i32) {
        let condition = describe(code);
        assert_eq!(condition.label, UNKNOWN_CONDITIONS);
        assert_eq!(condition.icon, "🌡️");
        assert_eq!(label(code), None);
    }

    #[test]
    fn test_every_labelled_code_has_a_bucket() {
        for code in (0..100).filter(|code| label(*code).is_some()) {
            assert_ne!(Sky::from_wmo_code(code), Sky::Other, "code {code}");
        }
    }

    #[test]
    fn test_describe_is_stable() {
        assert_eq!(describe(63), describe(63));
    }
}
