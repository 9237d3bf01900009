// Dashboard service - Use case for turning polled data into a dashboard view
use crate::application::polling_service::ViewState;
use crate::domain::alerts::alert_messages;
use crate::domain::dashboard::{Dashboard, DashboardView, Panel, PanelLine};
use crate::domain::reading::{SourceReading, SourceTag};
use crate::domain::sensor::StoredReading;
use crate::domain::snapshot::Snapshot;
use crate::domain::telemetry::{Axis, ChartData, SeriesData, TimeSeriesPoint};
use chrono::{DateTime, Local, TimeZone};
use std::fmt;

const DASHBOARD_TITLE: &str = "Air Quality Dashboard";

/// Panel order and titles
const PANELS: [(SourceTag, &str); 4] = [
    (SourceTag::Tempo, "TEMPO Satellite"),
    (SourceTag::OpenAq, "Ground Station (OpenAQ)"),
    (SourceTag::Arduino, "Local Sensor (Arduino)"),
    (SourceTag::Weather, "Weather"),
];

struct SeriesSpec {
    name: &'static str,
    axis: Axis,
    value: fn(&StoredReading) -> Option<f64>,
}

const HISTORY_SERIES: [SeriesSpec; 3] = [
    SeriesSpec {
        name: "PM2.5 (µg/m³)",
        axis: Axis::Primary,
        value: |r| r.pm25,
    },
    SeriesSpec {
        name: "NO₂ (ppb)",
        axis: Axis::Primary,
        value: |r| r.no2,
    },
    SeriesSpec {
        name: "Temperature (°C)",
        axis: Axis::Secondary,
        value: |r| r.temperature,
    },
];

#[derive(Clone)]
pub struct DashboardService<Tz: TimeZone = Local> {
    timezone: Tz,
}

impl DashboardService<Local> {
    pub fn new() -> Self {
        Self { timezone: Local }
    }
}

impl Default for DashboardService<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz> DashboardService<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    pub fn with_timezone(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn build(&self, state: &ViewState) -> DashboardView {
        if state.loading {
            return DashboardView::Loading;
        }

        let snapshot = state.snapshot.as_ref();
        let last_updated = snapshot.map(|s| {
            s.last_updated
                .with_timezone(&self.timezone)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        });
        let alerts = snapshot.map(alert_messages).unwrap_or_default();
        let panels = snapshot.map(|s| self.build_panels(s)).unwrap_or_default();
        let chart = self.build_chart(&state.history);

        DashboardView::Ready(Dashboard::new(
            DASHBOARD_TITLE.to_string(),
            last_updated,
            alerts,
            panels,
            chart,
        ))
    }

    fn build_panels(&self, snapshot: &Snapshot) -> Vec<Panel> {
        PANELS
            .iter()
            .map(|&(tag, title)| match snapshot.get(tag) {
                SourceReading::Reported(reading) => {
                    let m = &reading.measurements;
                    let lines = [
                        ("PM2.5", m.pm25, "µg/m³"),
                        ("NO₂", m.no2, "ppb"),
                        ("O₃", m.o3, "ppb"),
                        ("Temp", m.temperature, "°C"),
                        ("Humidity", m.humidity, "%"),
                        ("Wind", m.wind, "m/s"),
                    ]
                    .into_iter()
                    .filter_map(|(label, value, unit)| {
                        value.map(|value| PanelLine { label, value, unit })
                    })
                    .collect();

                    Panel {
                        title,
                        lines: Some(lines),
                        timestamp: reading
                            .timestamp
                            .as_deref()
                            .map(|ts| self.format_local(ts, "%Y-%m-%d %H:%M:%S")),
                    }
                }
                SourceReading::Failed { .. } | SourceReading::Empty => Panel {
                    title,
                    lines: None,
                    timestamp: None,
                },
            })
            .collect()
    }

    fn build_chart(&self, history: &[StoredReading]) -> Option<ChartData> {
        if history.is_empty() {
            return None;
        }

        let labels: Vec<String> = history
            .iter()
            .map(|row| {
                row.timestamp
                    .as_deref()
                    .map(|ts| self.format_local(ts, "%H:%M"))
                    .unwrap_or_default()
            })
            .collect();

        let series = HISTORY_SERIES
            .iter()
            .map(|spec| {
                let points = history
                    .iter()
                    .zip(&labels)
                    .map(|(row, label)| TimeSeriesPoint::new(label.clone(), (spec.value)(row)))
                    .collect();
                SeriesData::new(spec.name.to_string(), spec.axis, points)
            })
            .collect();

        Some(ChartData::new(
            "Historical Trends (Past 24h)".to_string(),
            "Air Quality".to_string(),
            "Temperature (°C)".to_string(),
            series,
        ))
    }

    /// Submitted timestamps are free text; show them verbatim when they are not RFC 3339.
    fn format_local(&self, timestamp: &str, pattern: &str) -> String {
        match DateTime::parse_from_rfc3339(timestamp) {
            Ok(at) => at.with_timezone(&self.timezone).format(pattern).to_string(),
            Err(_) => timestamp.to_string(),
        }
    }
}
