use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub location: LocationSettings,
    pub openaq: OpenAqSettings,
    pub openweather: OpenWeatherSettings,
    pub tempo: TempoSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub allowed_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationSettings {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenAqSettings {
    pub base_url: String,
    pub radius_m: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenWeatherSettings {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TempoSettings {
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub api_base: String,
    pub poll_interval_secs: u64,
    pub use_mock: bool,
}

impl DashboardSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Flat variable names kept working alongside the `AQ_` prefixed ones
const LEGACY_ENV: [(&str, &str); 8] = [
    ("PORT", "server.port"),
    ("ALLOWED_ORIGIN", "server.allowed_origin"),
    ("DATABASE_URL", "database.url"),
    ("LOCATION_LAT", "location.lat"),
    ("LOCATION_LON", "location.lon"),
    ("TEMPO_API_KEY", "tempo.api_key"),
    ("OPENWEATHER_API_KEY", "openweather.api_key"),
    ("API_BASE", "dashboard.api_base"),
];

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 4000)?
        .set_default("server.allowed_origin", "*")?
        .set_default("database.url", "sqlite://sqlite.db")?
        .set_default("location.lat", 38.8951)?
        .set_default("location.lon", -77.0364)?
        .set_default("openaq.base_url", "https://api.openaq.org/v2")?
        .set_default("openaq.radius_m", 10000)?
        .set_default("openweather.base_url", "https://api.openweathermap.org/data/2.5")?
        .set_default("openweather.api_key", "")?
        .set_default("tempo.api_key", "")?
        .set_default("dashboard.api_base", "http://localhost:4000/api")?
        .set_default("dashboard.poll_interval_secs", 90)?
        .set_default("dashboard.use_mock", false)
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let mut builder = with_defaults()?
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix("AQ")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    for (var, key) in LEGACY_ENV {
        builder = builder.set_override_option(key, std::env::var(var).ok())?;
    }

    Ok(builder.build()?.try_deserialize()?)
}
