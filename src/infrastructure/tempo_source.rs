// TEMPO satellite source
use crate::application::air_quality_source::AirQualitySource;
use crate::domain::reading::{Measurements, Reading, SourceReading, SourceTag};
use async_trait::async_trait;
use rand::Rng;
use std::ops::Range;

const PM25_RANGE: Range<f64> = 25.0..35.0;
const NO2_RANGE: Range<f64> = 8.0..10.0;
const O3_RANGE: Range<f64> = 30.0..40.0;

/// Placeholder for the TEMPO satellite feed: produces plausible values inside
/// fixed ranges until a real upstream integration exists. The API key is
/// carried so the real client can slot in without a configuration change.
#[derive(Debug, Clone)]
pub struct TempoSource {
    api_key: String,
}

impl TempoSource {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }

    fn synthetic_measurements() -> Measurements {
        let mut rng = rand::thread_rng();
        Measurements {
            pm25: Some(rng.gen_range(PM25_RANGE)),
            no2: Some(rng.gen_range(NO2_RANGE)),
            o3: Some(rng.gen_range(O3_RANGE)),
            ..Default::default()
        }
    }
}

#[async_trait]
impl AirQualitySource for TempoSource {
    fn tag(&self) -> SourceTag {
        SourceTag::Tempo
    }

    async fn fetch(&self) -> SourceReading {
        tracing::trace!(
            key_configured = !self.api_key.is_empty(),
            "Generating placeholder TEMPO reading"
        );
        SourceReading::Reported(Reading::new(self.tag(), Self::synthetic_measurements()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_synthetic_values_stay_in_range() {
        let source = TempoSource::new(String::new());

        for _ in 0..50 {
            let reading = source.fetch().await;
            let reading = reading.reading().unwrap();
            let m = &reading.measurements;

            assert_eq!(reading.source, SourceTag::Tempo);
            assert!(PM25_RANGE.contains(&m.pm25.unwrap()));
            assert!(NO2_RANGE.contains(&m.no2.unwrap()));
            assert!(O3_RANGE.contains(&m.o3.unwrap()));
            assert!(m.temperature.is_none());
            assert!(reading.timestamp.is_some());
        }
    }
}
