// UFO Shapes Dashboard - Web Server
// Loads the sightings file once and serves the dashboard until terminated

use anyhow::{Context, Result};
use log::info;
use ufo_shapes::server::{router, AppState};
use ufo_shapes::{load_csv, Config, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("UFO Shapes Dashboard v{}", VERSION);

    let config = Config::from_env()?;
    let dataset = load_csv(&config.csv_path)?;

    let app = router(AppState::new(dataset), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!("serving on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
