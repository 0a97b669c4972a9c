//! Activity line chart
//!
//! Messages per day over the last few days.

use serde::{Deserialize, Serialize};

use super::{
    style, ChartConfig, ChartData, ChartKind, ChartSlot, ChartSurface, ChartUpdate, Dataset,
};
use crate::backend::schema::ActivityPoint;
use crate::format::{format_month_day, format_weekday};

const LINE_COLOR: &str = "#6366f1";
const FILL_COLOR: &str = "rgba(99, 102, 241, 0.1)";

/// How x-axis dates are labelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLabelStyle {
    /// `Mon`
    #[default]
    Weekday,
    /// `May 3`
    MonthDay,
}

/// X-axis labels for a series of activity points
pub fn activity_labels(points: &[ActivityPoint], label_style: ActivityLabelStyle) -> Vec<String> {
    points
        .iter()
        .map(|p| match label_style {
            ActivityLabelStyle::Weekday => format_weekday(p.date),
            ActivityLabelStyle::MonthDay => format_month_day(p.date),
        })
        .collect()
}

/// Full line chart configuration with the dashboard theme
pub fn line_config(labels: Vec<String>, values: Vec<i64>) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: Some("Messages".to_string()),
                data: values,
                style: style(serde_json::json!({
                    "borderColor": LINE_COLOR,
                    "backgroundColor": FILL_COLOR,
                    "borderWidth": 3,
                    "tension": 0.4,
                    "fill": true,
                    "pointBackgroundColor": LINE_COLOR,
                    "pointBorderColor": "#fff",
                    "pointBorderWidth": 2,
                    "pointRadius": 4,
                    "pointHoverRadius": 7
                })),
            }],
        },
        options: serde_json::json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": { "display": false },
                "tooltip": {
                    "backgroundColor": "#1e2139",
                    "titleColor": "#e4e4e7",
                    "bodyColor": "#a1a1aa",
                    "borderColor": "#27272a",
                    "borderWidth": 1,
                    "padding": 12,
                    "displayColors": false
                }
            },
            "scales": {
                "y": {
                    "beginAtZero": true,
                    "grid": { "display": true, "color": "#27272a", "drawBorder": false },
                    "ticks": { "color": "#a1a1aa" }
                },
                "x": {
                    "grid": { "display": false },
                    "ticks": { "color": "#a1a1aa" }
                }
            }
        }),
    }
}

/// Push a new activity series into the chart slot
pub fn update_activity_chart<S: ChartSurface + ?Sized>(
    slot: &mut ChartSlot,
    surface: &mut S,
    points: &[ActivityPoint],
    label_style: ActivityLabelStyle,
) -> ChartUpdate {
    let labels = activity_labels(points, label_style);
    let values = points.iter().map(|p| p.count).collect();

    slot.update(surface, labels, values, line_config)
}
