// Upstream source trait - one implementation per external data provider
use crate::domain::reading::{SourceReading, SourceTag};
use async_trait::async_trait;

#[async_trait]
pub trait AirQualitySource: Send + Sync {
    fn tag(&self) -> SourceTag;

    /// Fetch the current values. Never fails: any problem comes back as
    /// `SourceReading::Failed` for this source only.
    async fn fetch(&self) -> SourceReading;
}
