// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use air_quality_dashboard::application::air_quality_service::AirQualityService;
use air_quality_dashboard::application::mock_service::MockService;
use air_quality_dashboard::infrastructure::config::load_app_config;
use air_quality_dashboard::infrastructure::openaq_source::OpenAqSource;
use air_quality_dashboard::infrastructure::openweather_source::OpenWeatherSource;
use air_quality_dashboard::infrastructure::sqlite_store::SqliteReadingStore;
use air_quality_dashboard::infrastructure::tempo_source::TempoSource;
use air_quality_dashboard::init_tracing;
use air_quality_dashboard::presentation::app_state::AppState;
use air_quality_dashboard::presentation::router::{cors_layer, create_router};
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // Load configuration
    let config = load_app_config()?;

    // Open the store before accepting any request
    let store = Arc::new(
        SqliteReadingStore::connect(&config.database.url)
            .await
            .with_context(|| format!("Failed to open database {}", config.database.url))?,
    );
    tracing::info!("Using sensor database at {}", config.database.url);

    // Upstream sources share one HTTP client
    let client = reqwest::Client::new();
    let tempo = Arc::new(TempoSource::new(config.tempo.api_key.clone()));
    let openaq = Arc::new(OpenAqSource::new(
        client.clone(),
        config.openaq.base_url.clone(),
        config.location.lat,
        config.location.lon,
        config.openaq.radius_m,
    ));
    let weather = Arc::new(OpenWeatherSource::new(
        client,
        config.openweather.base_url.clone(),
        config.openweather.api_key.clone(),
        config.location.lat,
        config.location.lon,
    ));

    let state = Arc::new(AppState {
        air_quality_service: AirQualityService::new(tempo, openaq, weather, store),
        mock_service: MockService::new(),
    });

    let router = create_router(state, cors_layer(&config.server.allowed_origin)?);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid listen address")?;
    tracing::info!("Air Quality API running on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
