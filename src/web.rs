use anyhow::{Context, Result};
use axum::Router;
use chrono::Locale;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::KWeatherConfig;
use crate::weather::OpenMeteoClient;
use crate::{api, static_files};

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub root: Arc<PathBuf>,
    pub client: OpenMeteoClient,
    pub default_city: Arc<str>,
    pub locale: Locale,
}

impl AppState {
    pub fn new(config: &KWeatherConfig) -> crate::Result<Self> {
        Ok(Self {
            root: Arc::new(config.server.root.clone()),
            client: OpenMeteoClient::new(config.api.clone())?,
            default_city: Arc::from(config.display.default_city.as_str()),
            locale: config.display.locale()?,
        })
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router().layer(cors))
        .fallback(static_files::serve_file)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: &KWeatherConfig) -> Result<()> {
    let state = AppState::new(config)?;
    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(
        "Weather app running at http://{} serving {}",
        addr,
        config.server.root.display()
    );
    axum::serve(listener, app).await?;
    Ok(())
}
