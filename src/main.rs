use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kweather::{
    DeviceLocation, InputController, KWeatherConfig, OpenMeteoClient, View, logging, web, widget,
};

/// Weather lookup with a "weather with a K" feels-like temperature
#[derive(Parser, Debug)]
#[command(name = "kweather", version, about)]
struct Cli {
    /// Config file (defaults to <config dir>/kweather/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal widget (default)
    Widget,
    /// Serve static files and the forecast API
    Serve {
        #[arg(long)]
        port: Option<u16>,
        /// Directory to serve
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        KWeatherConfig::load_from_path(cli.config).context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    match cli.command.unwrap_or(Command::Widget) {
        Command::Widget => {
            let client = OpenMeteoClient::new(config.api.clone())?;
            let controller = InputController::new(
                client,
                DeviceLocation::from_config(&config.geolocation),
                config.display.default_city.clone(),
                View::new(config.display.locale()?),
            );
            widget::run(controller).await
        }
        Command::Serve { port, root } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(root) = root {
                config.server.root = root;
            }
            web::run(&config).await
        }
    }
}
