// Hardware sensor submissions and the rows they become
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::reading::{Measurements, Reading, SourceTag};

/// A persisted sensor submission. Mock history rows have no `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredReading {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub pm25: Option<f64>,
    pub no2: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub timestamp: Option<String>,
}

impl StoredReading {
    pub fn to_reading(&self) -> Reading {
        Reading {
            source: SourceTag::Arduino,
            measurements: Measurements {
                pm25: self.pm25,
                no2: self.no2,
                temperature: self.temperature,
                humidity: self.humidity,
                ..Default::default()
            },
            timestamp: self.timestamp.clone(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SubmissionError {
    #[error("payload must be a JSON object")]
    NotAnObject,
    #[error("field `{0}` must be a number")]
    NotANumber(&'static str),
    #[error("field `timestamp` is missing or empty")]
    MissingTimestamp,
}

/// A validated submission, ready to be appended to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSubmission {
    pub pm25: f64,
    pub no2: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub timestamp: String,
}

impl SensorSubmission {
    pub fn from_json(body: &Value) -> Result<Self, SubmissionError> {
        let fields = body.as_object().ok_or(SubmissionError::NotAnObject)?;

        let number = |name: &'static str| {
            fields
                .get(name)
                .and_then(Value::as_f64)
                .ok_or(SubmissionError::NotANumber(name))
        };

        Ok(Self {
            pm25: number("pm25")?,
            no2: number("no2")?,
            temperature: number("temperature")?,
            humidity: number("humidity")?,
            timestamp: timestamp_text(fields.get("timestamp"))
                .ok_or(SubmissionError::MissingTimestamp)?,
        })
    }
}

// Only text and number timestamps are accepted; booleans, arrays and objects are
// rejected even though they are truthy. Numbers are kept as their decimal text.
fn timestamp_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
