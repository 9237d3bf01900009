// Reading domain model - one normalized measurement per data source
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed identifier for where a reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    Tempo,
    OpenAq,
    Weather,
    Arduino,
}

impl SourceTag {
    pub const ALL: [SourceTag; 4] = [
        SourceTag::Tempo,
        SourceTag::OpenAq,
        SourceTag::Weather,
        SourceTag::Arduino,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Tempo => "tempo",
            SourceTag::OpenAq => "openaq",
            SourceTag::Weather => "weather",
            SourceTag::Arduino => "arduino",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measured values; each field is absent when the source does not report it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurements {
    pub pm25: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind: Option<f64>,
}

impl Measurements {
    pub fn is_empty(&self) -> bool {
        self.pm25.is_none()
            && self.no2.is_none()
            && self.o3.is_none()
            && self.temperature.is_none()
            && self.humidity.is_none()
            && self.wind.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub source: SourceTag,
    pub measurements: Measurements,
    /// ISO-8601 time the reading was produced or recorded
    pub timestamp: Option<String>,
}

impl Reading {
    pub fn new(source: SourceTag, measurements: Measurements) -> Self {
        Self {
            source,
            measurements,
            timestamp: Some(now_iso()),
        }
    }
}

/// Outcome of asking one source for its current values.
///
/// A failed source carries only its reason, so a reading can never hold an
/// error and measurements at the same time. The flat JSON shape with an
/// `error` field exists only at the serialization boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceReading {
    Reported(Reading),
    Failed { source: SourceTag, reason: String },
    Empty,
}

impl SourceReading {
    pub fn failed(source: SourceTag, reason: impl Into<String>) -> Self {
        SourceReading::Failed {
            source,
            reason: reason.into(),
        }
    }

    pub fn reading(&self) -> Option<&Reading> {
        match self {
            SourceReading::Reported(reading) => Some(reading),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SourceReading::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Rebuild the internal form from the wire shape. `tag` is used when the
    /// payload does not name its own source.
    pub fn from_payload(tag: SourceTag, payload: ReadingPayload) -> Self {
        let source = payload.source.unwrap_or(tag);
        if let Some(reason) = payload.error {
            return SourceReading::Failed { source, reason };
        }

        let measurements = Measurements {
            pm25: payload.pm25,
            no2: payload.no2,
            o3: payload.o3,
            temperature: payload.temperature,
            humidity: payload.humidity,
            wind: payload.wind,
        };
        if measurements.is_empty() && payload.timestamp.is_none() && payload.source.is_none() {
            return SourceReading::Empty;
        }

        SourceReading::Reported(Reading {
            source,
            measurements,
            timestamp: payload.timestamp,
        })
    }
}

/// Flat JSON shape shared by every source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm25: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&SourceReading> for ReadingPayload {
    fn from(reading: &SourceReading) -> Self {
        match reading {
            SourceReading::Reported(r) => ReadingPayload {
                pm25: r.measurements.pm25,
                no2: r.measurements.no2,
                o3: r.measurements.o3,
                temperature: r.measurements.temperature,
                humidity: r.measurements.humidity,
                wind: r.measurements.wind,
                timestamp: r.timestamp.clone(),
                source: Some(r.source),
                error: None,
            },
            SourceReading::Failed { source, reason } => ReadingPayload {
                source: Some(*source),
                error: Some(reason.clone()),
                ..Default::default()
            },
            SourceReading::Empty => ReadingPayload::default(),
        }
    }
}

/// Current UTC time in the same format browsers produce for `toISOString`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
