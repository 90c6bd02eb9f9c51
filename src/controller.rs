//! Input controller
//!
//! Wires the search box and the "use my location" action to the weather
//! source and the view. Every action moves through `Loading` and ends in
//! `Shown` or `Failed`; a new action may start from any state.
//!
//! Each load takes a [`LoadTicket`]. Completing a load whose ticket is no
//! longer the newest is a no-op, so the most recently started load is the one
//! that ends up on screen even when loads overlap.

use crate::error::GeolocationError;
use crate::geolocation::Geolocator;
use crate::models::{DEVICE_LOCATION_LABEL, ForecastBundle};
use crate::render::View;
use crate::weather::WeatherSource;
use crate::{KWeatherError, Result};
use tracing::{debug, info, warn};

pub const LOADING_MESSAGE: &str = "Loading weather...";
pub const LOCATING_MESSAGE: &str = "Getting your location...";
pub const LOADING_POSITION_MESSAGE: &str = "Loading weather for your location...";

#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Shown,
    Failed(KWeatherError),
}

/// Identifies one load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Resolve `name` and fetch its forecast. Returns the bundle and the label to show.
pub async fn load_city<S: WeatherSource>(source: &S, name: &str) -> Result<(ForecastBundle, String)> {
    let location = source.resolve_city(name).await?;
    let bundle = source
        .fetch_forecast(location.latitude, location.longitude)
        .await?;
    Ok((bundle, location.display_label))
}

pub struct InputController<S, G> {
    source: S,
    geolocator: G,
    default_city: String,
    view: View,
    state: LoadState,
    generation: u64,
}

impl<S: WeatherSource, G: Geolocator> InputController<S, G> {
    pub fn new(source: S, geolocator: G, default_city: impl Into<String>, view: View) -> Self {
        Self {
            source,
            geolocator,
            default_city: default_city.into(),
            view,
            state: LoadState::Idle,
            generation: 0,
        }
    }

    #[must_use]
    pub fn view(&self) -> &View {
        &self.view
    }

    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Start a load cycle: show `message` and hide the weather view
    pub fn begin(&mut self, message: &str) -> LoadTicket {
        self.generation += 1;
        self.view.render_loading(message);
        self.state = LoadState::Loading;
        LoadTicket(self.generation)
    }

    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Finish a load cycle. Returns `false` if a newer load superseded it.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<(ForecastBundle, String)>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale load {} (current is {})",
                ticket.0, self.generation
            );
            return false;
        }

        match outcome {
            Ok((bundle, label)) => {
                self.view.render_bundle(&bundle, &label);
                self.state = LoadState::Shown;
                info!("Showing {} forecast days for {}", bundle.daily.len(), label);
            }
            Err(err) => self.fail(err),
        }
        true
    }

    /// Fail immediately, superseding anything in flight
    pub fn reject(&mut self, err: KWeatherError) {
        self.generation += 1;
        self.fail(err);
    }

    fn fail(&mut self, err: KWeatherError) {
        warn!("Load failed: {}", err);
        self.view.render_error(&err.user_message());
        self.state = LoadState::Failed(err);
    }

    /// Load the configured default city
    pub async fn start(&mut self) {
        let city = self.default_city.clone();
        self.submit_search(&city).await;
    }

    /// Handle a search box submission
    pub async fn submit_search(&mut self, input: &str) {
        let city = input.trim();
        if city.is_empty() {
            self.reject(KWeatherError::EmptyInput);
            return;
        }

        let ticket = self.begin(LOADING_MESSAGE);
        let outcome = load_city(&self.source, city).await;
        self.complete(ticket, outcome);
    }

    /// Handle the "use my location" action
    pub async fn use_my_location(&mut self) {
        if !self.geolocator.is_supported() {
            self.reject(GeolocationError::Unsupported.into());
            return;
        }

        let ticket = self.begin(LOCATING_MESSAGE);
        let position = self.geolocator.current_position().await;
        match position {
            Ok(position) if self.is_current(ticket) => {
                self.load_coordinates(
                    position.latitude,
                    position.longitude,
                    DEVICE_LOCATION_LABEL,
                )
                .await;
            }
            Ok(_) => debug!("Position arrived after a newer load started"),
            Err(err) => {
                self.complete(ticket, Err(err.into()));
            }
        }
    }

    /// Fetch and show the forecast for known coordinates
    pub async fn load_coordinates(&mut self, latitude: f64, longitude: f64, label: &str) {
        let ticket = self.begin(LOADING_POSITION_MESSAGE);
        let outcome = self
            .source
            .fetch_forecast(latitude, longitude)
            .await
            .map(|bundle| (bundle, label.to_string()));
        self.complete(ticket, outcome);
    }
}
