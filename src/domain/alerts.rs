// Threshold alerts over a composite snapshot
use super::reading::{Measurements, SourceTag};
use super::snapshot::Snapshot;
use std::fmt;

pub const PM25_THRESHOLD: f64 = 35.0; // µg/m³
pub const NO2_THRESHOLD: f64 = 20.0; // ppb
pub const O3_THRESHOLD: f64 = 80.0; // ppb

/// Sources checked for alerts, in message order. Weather is never alerted on.
const ALERT_SOURCES: [SourceTag; 3] = [SourceTag::Tempo, SourceTag::OpenAq, SourceTag::Arduino];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pollutant {
    Pm25,
    No2,
    O3,
}

impl Pollutant {
    pub fn label(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::No2 => "NO₂",
            Pollutant::O3 => "O₃",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "µg/m³",
            Pollutant::No2 | Pollutant::O3 => "ppb",
        }
    }

    pub fn threshold(&self) -> f64 {
        match self {
            Pollutant::Pm25 => PM25_THRESHOLD,
            Pollutant::No2 => NO2_THRESHOLD,
            Pollutant::O3 => O3_THRESHOLD,
        }
    }

    fn value(&self, measurements: &Measurements) -> Option<f64> {
        match self {
            Pollutant::Pm25 => measurements.pm25,
            Pollutant::No2 => measurements.no2,
            Pollutant::O3 => measurements.o3,
        }
    }
}

/// Name shown to people for an alerted source.
pub fn source_display_name(tag: SourceTag) -> &'static str {
    match tag {
        SourceTag::Tempo => "TEMPO",
        SourceTag::OpenAq => "OpenAQ",
        SourceTag::Arduino => "Local Sensor",
        SourceTag::Weather => "Weather",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Breach {
    pub source: SourceTag,
    pub pollutant: Pollutant,
    pub value: f64,
}

impl fmt::Display for Breach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} high ({} {})",
            source_display_name(self.source),
            self.pollutant.label(),
            self.value,
            self.pollutant.unit()
        )
    }
}

/// Every threshold breach in the snapshot, ordered by source then pollutant.
/// An empty result means there is nothing to show.
pub fn evaluate(snapshot: &Snapshot) -> Vec<Breach> {
    let mut breaches = Vec::new();

    for tag in ALERT_SOURCES {
        let Some(reading) = snapshot.get(tag).reading() else {
            continue;
        };

        for pollutant in [Pollutant::Pm25, Pollutant::No2, Pollutant::O3] {
            if let Some(value) = pollutant.value(&reading.measurements) {
                if value > pollutant.threshold() {
                    breaches.push(Breach {
                        source: tag,
                        pollutant,
                        value,
                    });
                }
            }
        }
    }

    breaches
}

/// Human-readable alert messages for the banner.
pub fn alert_messages(snapshot: &Snapshot) -> Vec<String> {
    evaluate(snapshot).iter().map(ToString::to_string).collect()
}
