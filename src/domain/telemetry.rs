// Chart domain models for the history view

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub label: String,
    pub value: Option<f64>,
}

impl TimeSeriesPoint {
    pub fn new(label: String, value: Option<f64>) -> Self {
        Self { label, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub name: String,
    pub axis: Axis,
    pub points: Vec<TimeSeriesPoint>,
}

impl SeriesData {
    pub fn new(name: String, axis: Axis, points: Vec<TimeSeriesPoint>) -> Self {
        Self { name, axis, points }
    }

    /// Values that are present, in time order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().filter_map(|p| p.value)
    }

    pub fn latest(&self) -> Option<f64> {
        self.points.iter().rev().find_map(|p| p.value)
    }

    pub fn min(&self) -> Option<f64> {
        self.values().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values().reduce(f64::max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub primary_axis_title: String,
    pub secondary_axis_title: String,
    pub series: Vec<SeriesData>,
}

impl ChartData {
    pub fn new(
        title: String,
        primary_axis_title: String,
        secondary_axis_title: String,
        series: Vec<SeriesData>,
    ) -> Self {
        Self {
            title,
            primary_axis_title,
            secondary_axis_title,
            series,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.series
            .first()
            .map(|s| s.points.iter().map(|p| p.label.as_str()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_stats_skip_gaps() {
        let series = SeriesData::new(
            "PM2.5".to_string(),
            Axis::Primary,
            vec![
                TimeSeriesPoint::new("10:00".to_string(), Some(12.0)),
                TimeSeriesPoint::new("11:00".to_string(), None),
                TimeSeriesPoint::new("12:00".to_string(), Some(30.0)),
                TimeSeriesPoint::new("13:00".to_string(), None),
            ],
        );

        assert_eq!(series.latest(), Some(30.0));
        assert_eq!(series.min(), Some(12.0));
        assert_eq!(series.max(), Some(30.0));
    }
}
