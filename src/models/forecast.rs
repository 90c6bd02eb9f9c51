//! Forecast bundle produced by one load cycle

use super::{CurrentConditions, DailyForecastEntry};
use serde::{Deserialize, Serialize};

/// Current conditions plus the chronological daily forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastBundle {
    pub current: CurrentConditions,
    /// Index 0 is today
    pub daily: Vec<DailyForecastEntry>,
}

impl ForecastBundle {
    #[must_use]
    pub fn new(current: CurrentConditions, daily: Vec<DailyForecastEntry>) -> Self {
        Self { current, daily }
    }

    /// Today's daily entry, if the provider returned any days
    #[must_use]
    pub fn today(&self) -> Option<&DailyForecastEntry> {
        self.daily.first()
    }
}
