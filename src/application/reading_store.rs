// Repository trait for locally submitted sensor readings
use crate::domain::sensor::{SensorSubmission, StoredReading};
use async_trait::async_trait;
use thiserror::Error;

/// Number of rows served as history
pub const HISTORY_WINDOW: u32 = 100;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Insert one validated submission, returning its new identity
    async fn append(&self, submission: &SensorSubmission) -> Result<i64, StoreError>;

    /// The row with the greatest timestamp, if any
    async fn latest(&self) -> Result<Option<StoredReading>, StoreError>;

    /// Up to `limit` rows, newest first
    async fn recent(&self, limit: u32) -> Result<Vec<StoredReading>, StoreError>;
}
