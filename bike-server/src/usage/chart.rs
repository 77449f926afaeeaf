//! Chart specification.

use serde::{Deserialize, Serialize};

use super::history::UsageHistory;

/// How the usage series is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
}

/// Palette for the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartColors {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub grid: &'static str,
    pub text: &'static str,
}

impl ChartColors {
    pub fn for_kind(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Bar => Self {
                fill: "#4CAF50",
                stroke: "#388E3C",
                grid: "#E0E0E0",
                text: "#424242",
            },
            ChartKind::Line => Self {
                fill: "#1976D2",
                stroke: "#2196F3",
                grid: "#E0E0E0",
                text: "#424242",
            },
        }
    }
}

/// Everything the browser needs to draw the usage chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: &'static str,
    pub series_label: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: ChartColors,
}

impl ChartSpec {
    pub fn from_history(history: &UsageHistory, kind: ChartKind) -> Self {
        let (labels, values) = history
            .records()
            .iter()
            .map(|r| (r.time.clone(), r.usage_count))
            .unzip();

        Self {
            kind,
            title: "YouBike monthly usage",
            series_label: "Usage count",
            labels,
            values,
            colors: ChartColors::for_kind(kind),
        }
    }
}
