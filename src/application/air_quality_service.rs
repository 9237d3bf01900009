// Air quality service - Use case for the live snapshot and sensor history
use crate::application::air_quality_source::AirQualitySource;
use crate::application::reading_store::{HISTORY_WINDOW, ReadingStore, StoreError};
use crate::domain::reading::SourceReading;
use crate::domain::sensor::{SensorSubmission, StoredReading};
use crate::domain::snapshot::Snapshot;
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct AirQualityService {
    tempo: Arc<dyn AirQualitySource>,
    openaq: Arc<dyn AirQualitySource>,
    weather: Arc<dyn AirQualitySource>,
    store: Arc<dyn ReadingStore>,
}

impl AirQualityService {
    pub fn new(
        tempo: Arc<dyn AirQualitySource>,
        openaq: Arc<dyn AirQualitySource>,
        weather: Arc<dyn AirQualitySource>,
        store: Arc<dyn ReadingStore>,
    ) -> Self {
        Self {
            tempo,
            openaq,
            weather,
            store,
        }
    }

    /// Query all sources at once and merge them. Source failures stay inside
    /// their own entry; only a store failure fails the whole snapshot.
    pub async fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let (tempo, openaq, weather, latest) = tokio::join!(
            self.tempo.fetch(),
            self.openaq.fetch(),
            self.weather.fetch(),
            self.store.latest(),
        );

        for (source, reading) in [
            (&self.tempo, &tempo),
            (&self.openaq, &openaq),
            (&self.weather, &weather),
        ] {
            if let Some(reason) = reading.error() {
                tracing::debug!("{} unavailable in snapshot: {}", source.tag(), reason);
            }
        }

        let arduino = match latest? {
            Some(row) => SourceReading::Reported(row.to_reading()),
            None => SourceReading::Empty,
        };

        Ok(Snapshot {
            tempo,
            openaq,
            weather,
            arduino,
            last_updated: Utc::now(),
        })
    }

    /// The most recent sensor rows, oldest first
    pub async fn history(&self) -> Result<Vec<StoredReading>, StoreError> {
        let mut rows = self.store.recent(HISTORY_WINDOW).await?;
        rows.reverse();
        Ok(rows)
    }

    pub async fn submit(&self, submission: &SensorSubmission) -> Result<i64, StoreError> {
        let id = self.store.append(submission).await?;
        tracing::debug!("Stored sensor reading {} at {}", id, submission.timestamp);
        Ok(id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::reading::{Measurements, Reading, SourceTag};
    use async_trait::async_trait;
    use std::sync::Mutex;

    pub struct FixedSource(pub SourceReading, pub SourceTag);

    #[async_trait]
    impl AirQualitySource for FixedSource {
        fn tag(&self) -> SourceTag {
            self.1
        }

        async fn fetch(&self) -> SourceReading {
            self.0.clone()
        }
    }

    #[derive(Default)]
    pub struct MemoryStore {
        pub rows: Mutex<Vec<StoredReading>>,
        pub broken: bool,
    }

    #[async_trait]
    impl ReadingStore for MemoryStore {
        async fn append(&self, submission: &SensorSubmission) -> Result<i64, StoreError> {
            let mut rows = self.rows.lock().unwrap();
            let id = rows.len() as i64 + 1;
            rows.push(StoredReading {
                id: Some(id),
                pm25: Some(submission.pm25),
                no2: Some(submission.no2),
                temperature: Some(submission.temperature),
                humidity: Some(submission.humidity),
                timestamp: Some(submission.timestamp.clone()),
            });
            Ok(id)
        }

        async fn latest(&self) -> Result<Option<StoredReading>, StoreError> {
            if self.broken {
                return Err(StoreError::Database(sqlx::Error::PoolClosed));
            }
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().max_by(|a, b| a.timestamp.cmp(&b.timestamp)).cloned())
        }

        async fn recent(&self, limit: u32) -> Result<Vec<StoredReading>, StoreError> {
            if self.broken {
                return Err(StoreError::Database(sqlx::Error::PoolClosed));
            }
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            rows.truncate(limit as usize);
            Ok(rows)
        }
    }

    fn reported(tag: SourceTag, pm25: f64) -> SourceReading {
        SourceReading::Reported(Reading::new(
            tag,
            Measurements {
                pm25: Some(pm25),
                ..Default::default()
            },
        ))
    }

    fn service(openaq: SourceReading, store: MemoryStore) -> AirQualityService {
        AirQualityService::new(
            Arc::new(FixedSource(reported(SourceTag::Tempo, 30.0), SourceTag::Tempo)),
            Arc::new(FixedSource(openaq, SourceTag::OpenAq)),
            Arc::new(FixedSource(reported(SourceTag::Weather, 1.0), SourceTag::Weather)),
            Arc::new(store),
        )
    }

    #[tokio::test]
    async fn test_failed_source_is_isolated() {
        let failed = SourceReading::failed(SourceTag::OpenAq, "OpenAQ fetch error");
        let service = service(failed.clone(), MemoryStore::default());

        let started = Utc::now();
        let snapshot = service.snapshot().await.unwrap();

        assert_eq!(snapshot.openaq, failed);
        assert_eq!(snapshot.tempo.reading().unwrap().measurements.pm25, Some(30.0));
        assert!(snapshot.weather.reading().is_some());
        assert_eq!(snapshot.arduino, SourceReading::Empty);
        assert!(snapshot.last_updated >= started);
    }

    #[tokio::test]
    async fn test_snapshot_uses_latest_submission() {
        let service = service(reported(SourceTag::OpenAq, 10.0), MemoryStore::default());
        for (pm25, ts) in [(5.0, "2024-01-01T02:00:00Z"), (9.0, "2024-01-01T01:00:00Z")] {
            let submission = SensorSubmission {
                pm25,
                no2: 1.0,
                temperature: 20.0,
                humidity: 50.0,
                timestamp: ts.to_string(),
            };
            service.submit(&submission).await.unwrap();
        }

        let snapshot = service.snapshot().await.unwrap();
        let arduino = snapshot.arduino.reading().unwrap();
        assert_eq!(arduino.source, SourceTag::Arduino);
        assert_eq!(arduino.measurements.pm25, Some(5.0));
    }

    #[tokio::test]
    async fn test_store_failure_fails_snapshot() {
        let store = MemoryStore {
            broken: true,
            ..Default::default()
        };
        let service = service(reported(SourceTag::OpenAq, 10.0), store);

        assert!(service.snapshot().await.is_err());
        assert!(service.history().await.is_err());
    }

    #[tokio::test]
    async fn test_history_is_oldest_first() {
        let service = service(reported(SourceTag::OpenAq, 10.0), MemoryStore::default());
        for ts in ["2024-01-01T03:00:00Z", "2024-01-01T01:00:00Z", "2024-01-01T02:00:00Z"] {
            let submission = SensorSubmission {
                pm25: 1.0,
                no2: 1.0,
                temperature: 1.0,
                humidity: 1.0,
                timestamp: ts.to_string(),
            };
            service.submit(&submission).await.unwrap();
        }

        let history = service.history().await.unwrap();
        let stamps: Vec<_> = history.iter().filter_map(|r| r.timestamp.as_deref()).collect();
        assert_eq!(
            stamps,
            vec!["2024-01-01T01:00:00Z", "2024-01-01T02:00:00Z", "2024-01-01T03:00:00Z"]
        );
    }
}
