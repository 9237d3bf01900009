// Composite snapshot - merged current state keyed by source tag
use super::reading::{ReadingPayload, SourceReading, SourceTag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Assembled per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SnapshotPayload", into = "SnapshotPayload")]
pub struct Snapshot {
    pub tempo: SourceReading,
    pub openaq: SourceReading,
    pub weather: SourceReading,
    pub arduino: SourceReading,
    pub last_updated: DateTime<Utc>,
}

impl Snapshot {
    pub fn get(&self, tag: SourceTag) -> &SourceReading {
        match tag {
            SourceTag::Tempo => &self.tempo,
            SourceTag::OpenAq => &self.openaq,
            SourceTag::Weather => &self.weather,
            SourceTag::Arduino => &self.arduino,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotPayload {
    #[serde(default)]
    pub tempo: ReadingPayload,
    #[serde(default)]
    pub openaq: ReadingPayload,
    #[serde(default)]
    pub weather: ReadingPayload,
    #[serde(default)]
    pub arduino: ReadingPayload,
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
}

impl From<Snapshot> for SnapshotPayload {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            tempo: ReadingPayload::from(&snapshot.tempo),
            openaq: ReadingPayload::from(&snapshot.openaq),
            weather: ReadingPayload::from(&snapshot.weather),
            arduino: ReadingPayload::from(&snapshot.arduino),
            last_updated: snapshot.last_updated,
        }
    }
}

impl From<SnapshotPayload> for Snapshot {
    fn from(payload: SnapshotPayload) -> Self {
        Self {
            tempo: SourceReading::from_payload(SourceTag::Tempo, payload.tempo),
            openaq: SourceReading::from_payload(SourceTag::OpenAq, payload.openaq),
            weather: SourceReading::from_payload(SourceTag::Weather, payload.weather),
            arduino: SourceReading::from_payload(SourceTag::Arduino, payload.arduino),
            last_updated: payload.last_updated,
        }
    }
}
