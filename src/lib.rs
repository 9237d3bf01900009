//! Air quality aggregation service and dashboard client.
//!
//! The server merges satellite, ground-station, weather and local sensor
//! readings into one snapshot and keeps a history of sensor submissions.
//! The client polls it and renders panels, alerts and a history chart.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
