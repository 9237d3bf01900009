// Dashboard client - polls the air quality API and renders to the terminal
use std::sync::Arc;
use std::time::Duration;

use air_quality_dashboard::application::dashboard_service::DashboardService;
use air_quality_dashboard::application::polling_service::PollingService;
use air_quality_dashboard::infrastructure::config::load_app_config;
use air_quality_dashboard::infrastructure::dashboard_client::{FeedMode, HttpDashboardFeed};
use air_quality_dashboard::init_tracing;
use air_quality_dashboard::presentation::terminal::render;
use clap::Parser;

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Terminal dashboard for the air quality API", long_about = None)]
struct Cli {
    /// Use the mock endpoints instead of live data
    #[arg(long)]
    mock: bool,

    /// API base URL, e.g. http://localhost:4000/api
    #[arg(long)]
    api_base: Option<String>,

    /// Seconds between refreshes
    #[arg(long)]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let settings = load_app_config()?.dashboard;

    let mode = if cli.mock || settings.use_mock {
        FeedMode::Mock
    } else {
        FeedMode::Live
    };
    let api_base = cli.api_base.unwrap_or(settings.api_base.clone());
    let interval = cli
        .interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| settings.poll_interval());

    tracing::info!("Polling {} every {:?} ({:?} data)", api_base, interval, mode);

    let feed = Arc::new(HttpDashboardFeed::new(reqwest::Client::new(), api_base, mode));
    let poller = PollingService::new(feed, interval).start();
    let mut updates = poller.subscribe();
    let view_builder = DashboardService::new();

    loop {
        let view = view_builder.build(&updates.borrow_and_update());
        println!("{}", render(&view));

        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down dashboard");
                break;
            }
        }
    }

    poller.stop().await;
    Ok(())
}
