// HTTP feed used by the dashboard client
use crate::application::polling_service::{DashboardFeed, FeedError};
use crate::domain::sensor::StoredReading;
use crate::domain::snapshot::Snapshot;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    Live,
    Mock,
}

impl FeedMode {
    fn snapshot_path(&self) -> &'static str {
        match self {
            FeedMode::Live => "air-quality",
            FeedMode::Mock => "mock/air-quality",
        }
    }

    fn history_path(&self) -> &'static str {
        match self {
            FeedMode::Live => "history",
            FeedMode::Mock => "mock/history",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpDashboardFeed {
    client: reqwest::Client,
    api_base: String,
    mode: FeedMode,
}

impl HttpDashboardFeed {
    pub fn new(client: reqwest::Client, api_base: String, mode: FeedMode) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            mode,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FeedError> {
        let response = self.client.get(self.url(path)).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status()));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl DashboardFeed for HttpDashboardFeed {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FeedError> {
        self.get_json(self.mode.snapshot_path()).await
    }

    async fn fetch_history(&self) -> Result<Vec<StoredReading>, FeedError> {
        self.get_json(self.mode.history_path()).await
    }
}
