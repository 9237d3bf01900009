// Polling service - Periodic refresh of the dashboard data with explicit start/stop
use crate::domain::sensor::StoredReading;
use crate::domain::snapshot::Snapshot;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(90);

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
}

/// Where the dashboard gets its data from (live or mock endpoints).
#[async_trait]
pub trait DashboardFeed: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FeedError>;

    async fn fetch_history(&self) -> Result<Vec<StoredReading>, FeedError>;
}

/// What the dashboard currently knows. A failed refresh clears both the
/// snapshot and the history so stale data is never shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub loading: bool,
    pub snapshot: Option<Snapshot>,
    pub history: Vec<StoredReading>,
}

#[derive(Clone)]
pub struct PollingService {
    feed: Arc<dyn DashboardFeed>,
    interval: Duration,
}

impl PollingService {
    pub fn new(feed: Arc<dyn DashboardFeed>, interval: Duration) -> Self {
        Self { feed, interval }
    }

    /// Run one fetch cycle and publish the outcome.
    pub async fn refresh(&self, state: &watch::Sender<ViewState>) {
        state.send_modify(|s| s.loading = true);

        let result = tokio::try_join!(self.feed.fetch_snapshot(), self.feed.fetch_history());

        let next = match result {
            Ok((snapshot, history)) => {
                tracing::debug!("Refreshed dashboard with {} history rows", history.len());
                ViewState {
                    loading: false,
                    snapshot: Some(snapshot),
                    history,
                }
            }
            Err(e) => {
                tracing::warn!("Dashboard refresh failed: {}", e);
                ViewState::default()
            }
        };
        state.send_replace(next);
    }

    /// Spawn the polling task. It refreshes immediately, then once per
    /// interval, until the returned handle is stopped or dropped.
    pub fn start(&self) -> PollerHandle {
        let (state_tx, state_rx) = watch::channel(ViewState {
            loading: true,
            ..Default::default()
        });
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let poller = self.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poller.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {}
                }
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = poller.refresh(&state_tx) => {}
                }
            }
            tracing::debug!("Dashboard poller stopped");
        });

        PollerHandle {
            state: state_rx,
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Owner of a running poller. Dropping it also ends the task, because the
/// shutdown channel closes with it.
pub struct PollerHandle {
    state: watch::Receiver<ViewState>,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            tracing::warn!("Dashboard poller ended abnormally: {}", e);
        }
    }
}
