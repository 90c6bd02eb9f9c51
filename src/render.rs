//! View renderer
//!
//! The [`View`] is the owned UI handle: a status line, a visibility flag for
//! the weather view, the today panel and the forecast cards. Rendering only
//! writes formatted text into it; presenting it is up to the caller, either
//! through `Display` in the terminal or as JSON from the web API.

use crate::conditions::{self, UNKNOWN};
use crate::feels_like::weather_with_k;
use crate::models::ForecastBundle;
use chrono::{Local, Locale, NaiveDate, NaiveTime, TimeZone};
use serde::Serialize;
use std::fmt::{self, Display};

const DAY_FORMAT: &str = "%a, %b %-d";
/// Shown for today fields when the provider returned no days
const MISSING: &str = "--";

/// Round half up, matching how the browser rounded (`-2.5` becomes `-2`)
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[must_use]
pub fn format_temp(value: f64) -> String {
    format!("{}°F", round_half_up(value))
}

#[must_use]
pub fn format_wind(value: f64) -> String {
    format!("{} mph", round_half_up(value))
}

#[must_use]
pub fn format_percent(value: u8) -> String {
    format!("{value}%")
}

/// Abbreviated weekday, month and day of month, e.g. "Mon, Jan 15".
///
/// The date is anchored to local midnight so it never shifts by a day.
#[must_use]
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    match Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
    {
        Some(midnight) => midnight.format_localized(DAY_FORMAT, locale).to_string(),
        // midnight skipped by a DST jump
        None => date.format(DAY_FORMAT).to_string(),
    }
}

/// Summary block for today
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodayPanel {
    pub location_label: String,
    pub icon: String,
    /// Weather with a K of the current apparent temperature
    pub k_primary: String,
    pub actual: String,
    pub condition: String,
    pub high: String,
    pub low: String,
    pub rain: String,
    pub wind: String,
    pub feels_like: String,
    pub k_weather: String,
}

/// One day of the forecast grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastCard {
    pub day: String,
    pub icon: String,
    pub k_label: String,
    pub k_metric: String,
    pub temp_range: String,
    pub condition: String,
    pub feels_like: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct View {
    pub status: String,
    pub weather_visible: bool,
    pub today: Option<TodayPanel>,
    pub forecast: Vec<ForecastCard>,
    #[serde(skip)]
    locale: Locale,
}

impl View {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            status: String::new(),
            weather_visible: false,
            today: None,
            forecast: Vec::new(),
            locale,
        }
    }

    pub fn render_loading(&mut self, message: &str) {
        self.status = message.to_string();
        self.weather_visible = false;
    }

    /// Show an error in the status line. Previous content stays, hidden.
    pub fn render_error(&mut self, message: &str) {
        self.status = message.to_string();
        self.weather_visible = false;
    }

    pub fn render_bundle(&mut self, bundle: &ForecastBundle, label: &str) {
        let current = &bundle.current;
        let current_k = weather_with_k(current.apparent_temperature);
        let now = conditions::describe(current.weather_code);
        let today = bundle.today();

        self.today = Some(TodayPanel {
            location_label: label.to_string(),
            icon: now.icon.to_string(),
            k_primary: format_temp(current_k),
            actual: format!("Actual {}", format_temp(current.temperature)),
            condition: now.label.to_string(),
            high: today.map_or_else(|| MISSING.to_string(), |d| format_temp(d.temp_max)),
            low: today.map_or_else(|| MISSING.to_string(), |d| format_temp(d.temp_min)),
            rain: today.map_or_else(
                || MISSING.to_string(),
                |d| format_percent(d.precip_probability_max),
            ),
            wind: format_wind(current.wind_speed),
            feels_like: format_temp(current.apparent_temperature),
            k_weather: format_temp(current_k),
        });

        // full replacement, no diffing
        self.forecast = bundle
            .daily
            .iter()
            .map(|day| {
                let feels_like = day.feels_like();
                ForecastCard {
                    day: format_date(day.date, self.locale),
                    icon: conditions::icon(day.weather_code).to_string(),
                    k_label: "Weather with a K".to_string(),
                    k_metric: format_temp(weather_with_k(feels_like)),
                    temp_range: format!(
                        "Actual: {} / {}",
                        format_temp(day.temp_max),
                        format_temp(day.temp_min)
                    ),
                    condition: conditions::label(day.weather_code)
                        .unwrap_or(UNKNOWN)
                        .to_string(),
                    feels_like: format!("Feels like: {}", format_temp(feels_like)),
                }
            })
            .collect();

        self.status.clear();
        self.weather_visible = true;
    }
}

impl Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.status.is_empty() {
            writeln!(f, "{}", self.status)?;
        }
        if !self.weather_visible {
            return Ok(());
        }

        if let Some(today) = &self.today {
            writeln!(f, "📍 {}", today.location_label)?;
            writeln!(
                f,
                "   {} {}  Weather with a K  ({})",
                today.icon, today.k_primary, today.actual
            )?;
            writeln!(f, "   {}", today.condition)?;
            writeln!(
                f,
                "   High {}  Low {}  Rain {}  Wind {}",
                today.high, today.low, today.rain, today.wind
            )?;
            writeln!(
                f,
                "   Feels like {}  Weather with a K {}",
                today.feels_like, today.k_weather
            )?;
        }

        if !self.forecast.is_empty() {
            writeln!(f)?;
        }
        for card in &self.forecast {
            writeln!(
                f,
                "{:<12} {} {:>6}  {}  {}  {}",
                card.day, card.icon, card.k_metric, card.temp_range, card.condition, card.feels_like
            )?;
        }
        Ok(())
    }
}
