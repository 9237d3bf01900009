// OpenWeatherMap source
use crate::application::air_quality_source::AirQualitySource;
use crate::domain::reading::{Measurements, Reading, SourceReading, SourceTag};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

const FETCH_ERROR: &str = "Weather fetch error";

#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    lat: f64,
    lon: f64,
}

// Every field is required: a response missing any of them is a failed fetch.
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
    wind: WeatherWind,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherWind {
    speed: f64,
}

impl From<WeatherResponse> for Measurements {
    fn from(weather: WeatherResponse) -> Self {
        Measurements {
            temperature: Some(weather.main.temp),
            humidity: Some(weather.main.humidity),
            wind: Some(weather.wind.speed),
            ..Default::default()
        }
    }
}

impl OpenWeatherSource {
    pub fn new(client: reqwest::Client, base_url: String, api_key: String, lat: f64, lon: f64) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            lat,
            lon,
        }
    }

    fn build_weather_url(&self) -> String {
        format!(
            "{}/weather?lat={}&lon={}&units=metric&appid={}",
            self.base_url,
            self.lat,
            self.lon,
            urlencoding::encode(&self.api_key)
        )
    }

    async fn try_fetch(&self) -> Result<Measurements> {
        let response = self
            .client
            .get(self.build_weather_url())
            .send()
            .await
            .context("Failed to send request to OpenWeatherMap")?;

        if !response.status().is_success() {
            anyhow::bail!("OpenWeatherMap request failed with status {}", response.status());
        }

        let weather = response
            .json::<WeatherResponse>()
            .await
            .context("Unexpected OpenWeatherMap response shape")?;

        Ok(weather.into())
    }
}

#[async_trait]
impl AirQualitySource for OpenWeatherSource {
    fn tag(&self) -> SourceTag {
        SourceTag::Weather
    }

    async fn fetch(&self) -> SourceReading {
        match self.try_fetch().await {
            Ok(measurements) => SourceReading::Reported(Reading::new(self.tag(), measurements)),
            Err(e) => {
                tracing::warn!("Weather fetch failed: {:#}", e);
                SourceReading::failed(self.tag(), FETCH_ERROR)
            }
        }
    }
}
