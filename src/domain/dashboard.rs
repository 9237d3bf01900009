// Dashboard domain model - what the client shows for one poll result
use super::telemetry::ChartData;

#[derive(Debug, Clone, PartialEq)]
pub struct PanelLine {
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: &'static str,
    /// `None` renders the "No data" placeholder
    pub lines: Option<Vec<PanelLine>>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub title: String,
    pub last_updated: Option<String>,
    pub alerts: Vec<String>,
    pub panels: Vec<Panel>,
    pub chart: Option<ChartData>,
}

impl Dashboard {
    pub fn new(
        title: String,
        last_updated: Option<String>,
        alerts: Vec<String>,
        panels: Vec<Panel>,
        chart: Option<ChartData>,
    ) -> Self {
        Self {
            title,
            last_updated,
            alerts,
            panels,
            chart,
        }
    }
}

/// Overall state of the client screen.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Loading,
    Ready(Dashboard),
}
