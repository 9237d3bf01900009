// OpenAQ ground-station source
use crate::application::air_quality_source::AirQualitySource;
use crate::domain::reading::{Measurements, Reading, SourceReading, SourceTag};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

const FETCH_ERROR: &str = "OpenAQ fetch error";

#[derive(Debug, Clone)]
pub struct OpenAqSource {
    client: reqwest::Client,
    base_url: String,
    lat: f64,
    lon: f64,
    radius_m: u32,
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    results: Vec<LatestLocation>,
}

#[derive(Debug, Deserialize)]
struct LatestLocation {
    #[serde(default)]
    measurements: Vec<LatestMeasurement>,
}

// Entries for parameters we never read may carry a null or missing value.
#[derive(Debug, Deserialize)]
struct LatestMeasurement {
    #[serde(default)]
    parameter: String,
    #[serde(default)]
    value: Option<f64>,
}

impl OpenAqSource {
    pub fn new(client: reqwest::Client, base_url: String, lat: f64, lon: f64, radius_m: u32) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            lat,
            lon,
            radius_m,
        }
    }

    fn build_latest_url(&self) -> String {
        let coordinates = format!("{},{}", self.lat, self.lon);
        format!(
            "{}/latest?coordinates={}&radius={}",
            self.base_url,
            urlencoding::encode(&coordinates),
            self.radius_m
        )
    }

    async fn try_fetch(&self) -> Result<Measurements> {
        let url = self.build_latest_url();
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to OpenAQ")?;

        if !response.status().is_success() {
            anyhow::bail!("OpenAQ request failed with status {}", response.status());
        }

        let latest = response
            .json::<LatestResponse>()
            .await
            .context("Failed to parse OpenAQ response")?;

        Ok(measurements_from_latest(latest))
    }
}

/// Take PM2.5, NO₂ and O₃ from the first location; anything not listed stays absent.
fn measurements_from_latest(latest: LatestResponse) -> Measurements {
    let mut measurements = Measurements::default();

    if let Some(location) = latest.results.into_iter().next() {
        for m in location.measurements {
            match m.parameter.as_str() {
                "pm25" => measurements.pm25 = m.value,
                "no2" => measurements.no2 = m.value,
                "o3" => measurements.o3 = m.value,
                _ => {}
            }
        }
    }

    measurements
}

#[async_trait]
impl AirQualitySource for OpenAqSource {
    fn tag(&self) -> SourceTag {
        SourceTag::OpenAq
    }

    async fn fetch(&self) -> SourceReading {
        match self.try_fetch().await {
            Ok(measurements) => SourceReading::Reported(Reading::new(self.tag(), measurements)),
            Err(e) => {
                tracing::warn!("OpenAQ fetch failed: {:#}", e);
                SourceReading::failed(self.tag(), FETCH_ERROR)
            }
        }
    }
}
