// Mock service - Demo data with the live schema, no upstream calls or store access
use crate::domain::reading::{Measurements, Reading, SourceReading, SourceTag};
use crate::domain::sensor::StoredReading;
use crate::domain::snapshot::Snapshot;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;

const MOCK_HISTORY_HOURS: i64 = 24;

#[derive(Clone, Default)]
pub struct MockService;

impl MockService {
    pub fn new() -> Self {
        Self
    }

    pub fn snapshot(&self) -> Snapshot {
        let reported = |source, measurements| SourceReading::Reported(Reading::new(source, measurements));

        Snapshot {
            tempo: reported(
                SourceTag::Tempo,
                Measurements {
                    pm25: Some(33.0),
                    no2: Some(12.0),
                    o3: Some(41.0),
                    ..Default::default()
                },
            ),
            openaq: reported(
                SourceTag::OpenAq,
                Measurements {
                    pm25: Some(29.0),
                    no2: Some(14.0),
                    o3: Some(39.0),
                    ..Default::default()
                },
            ),
            weather: reported(
                SourceTag::Weather,
                Measurements {
                    temperature: Some(26.0),
                    humidity: Some(60.0),
                    wind: Some(2.4),
                    ..Default::default()
                },
            ),
            arduino: reported(
                SourceTag::Arduino,
                Measurements {
                    pm25: Some(35.0),
                    no2: Some(13.0),
                    temperature: Some(27.0),
                    humidity: Some(55.0),
                    ..Default::default()
                },
            ),
            last_updated: Utc::now(),
        }
    }

    pub fn history(&self) -> Vec<StoredReading> {
        self.history_ending_at(Utc::now())
    }

    /// Hourly rows ending at `now`, oldest first
    pub fn history_ending_at(&self, now: DateTime<Utc>) -> Vec<StoredReading> {
        let mut rng = rand::thread_rng();

        (0..MOCK_HISTORY_HOURS)
            .rev()
            .map(|hours_ago| {
                let at = now - Duration::hours(hours_ago);
                StoredReading {
                    id: None,
                    pm25: Some(rng.gen_range(25.0..40.0)),
                    no2: Some(rng.gen_range(8.0..13.0)),
                    temperature: Some(rng.gen_range(25.0..30.0)),
                    humidity: Some(rng.gen_range(50.0..65.0)),
                    timestamp: Some(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_snapshot_matches_live_schema() {
        let snapshot = MockService::new().snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["tempo"]["pm25"], 33.0);
        assert_eq!(json["weather"]["wind"], 2.4);
        assert_eq!(json["arduino"]["source"], "arduino");
        assert!(json["openaq"].get("error").is_none());
        assert!(json.get("lastUpdated").is_some());
    }

    #[test]
    fn test_mock_history_is_hourly_and_bounded() {
        let now = Utc::now();
        let history = MockService::new().history_ending_at(now);

        assert_eq!(history.len(), 24);
        assert_eq!(
            history.last().unwrap().timestamp.as_deref(),
            Some(now.to_rfc3339_opts(SecondsFormat::Millis, true).as_str())
        );

        let stamps: Vec<DateTime<Utc>> = history
            .iter()
            .map(|r| r.timestamp.as_deref().unwrap().parse().unwrap())
            .collect();
        for pair in stamps.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::hours(1));
        }

        for row in &history {
            let pm25 = row.pm25.unwrap();
            let humidity = row.humidity.unwrap();
            assert!((25.0..40.0).contains(&pm25));
            assert!((50.0..65.0).contains(&humidity));
            assert!(row.id.is_none());
        }
    }
}
