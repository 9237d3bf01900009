// Plain-text rendering of the dashboard view
use crate::domain::dashboard::{Dashboard, DashboardView, Panel};
use crate::domain::telemetry::{Axis, ChartData, SeriesData};
use std::fmt::Write;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn render(view: &DashboardView) -> String {
    match view {
        DashboardView::Loading => "Loading...\n".to_string(),
        DashboardView::Ready(dashboard) => render_dashboard(dashboard),
    }
}

fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", dashboard.title);
    let _ = writeln!(
        out,
        "Last updated: {}",
        dashboard.last_updated.as_deref().unwrap_or("...")
    );

    if !dashboard.alerts.is_empty() {
        out.push('\n');
        out.push_str("⚠️ Air Quality Alert\n");
        for alert in &dashboard.alerts {
            let _ = writeln!(out, "  - {}", alert);
        }
    }

    if !dashboard.panels.is_empty() {
        out.push_str("\nLatest Readings\n");
        for panel in &dashboard.panels {
            render_panel(&mut out, panel);
        }
    }

    if let Some(chart) = &dashboard.chart {
        out.push('\n');
        render_chart(&mut out, chart);
    }

    out
}

fn render_panel(out: &mut String, panel: &Panel) {
    let _ = writeln!(out, "  [{}]", panel.title);
    match &panel.lines {
        Some(lines) => {
            for line in lines {
                let _ = writeln!(out, "    {}: {} {}", line.label, line.value, line.unit);
            }
            if let Some(timestamp) = &panel.timestamp {
                let _ = writeln!(out, "    {}", timestamp);
            }
        }
        None => out.push_str("    No data\n"),
    }
}

fn render_chart(out: &mut String, chart: &ChartData) {
    let _ = writeln!(out, "{}", chart.title);
    let labels = chart.labels();
    if let (Some(first), Some(last)) = (labels.first(), labels.last()) {
        let _ = writeln!(out, "  {} .. {} ({} points)", first, last, labels.len());
    }

    for series in &chart.series {
        let axis = match series.axis {
            Axis::Primary => &chart.primary_axis_title,
            Axis::Secondary => &chart.secondary_axis_title,
        };
        let stats = match (series.latest(), series.min(), series.max()) {
            (Some(latest), Some(min), Some(max)) => {
                format!("latest {:.1}, min {:.1}, max {:.1}", latest, min, max)
            }
            _ => "no values".to_string(),
        };
        let _ = writeln!(
            out,
            "  {:<18} {} [{}] {}",
            series.name,
            sparkline(series),
            axis,
            stats
        );
    }
}

/// One block character per point; gaps render as spaces.
fn sparkline(series: &SeriesData) -> String {
    let (Some(min), Some(max)) = (series.min(), series.max()) else {
        return String::new();
    };
    let span = max - min;
    let top = (SPARK_LEVELS.len() - 1) as f64;

    series
        .points
        .iter()
        .map(|p| match p.value {
            Some(v) if span > 0.0 => SPARK_LEVELS[(((v - min) / span) * top).round() as usize],
            Some(_) => SPARK_LEVELS[0],
            None => ' ',
        })
        .collect()
}
