//! Chart Adapters
//!
//! Long-lived chart instances for the dashboard's two charts.
//!
//! A [`ChartSlot`] holds at most one [`ChartInstance`]. The first update
//! mounts a new instance on the slot's canvas; later updates replace the
//! labels and data of that same instance and redraw it. Updates against a
//! surface without the canvas do nothing.
//!
//! The chart library itself sits behind [`ChartSurface`]. The
//! [`Document`] implementation publishes the Chart.js configuration on
//! the canvas element for the browser to pick up.

pub mod activity;
pub mod games;

pub use activity::{activity_labels, update_activity_chart, ActivityLabelStyle};
pub use games::update_games_chart;

use serde::Serialize;

use crate::document::Document;

/// Attribute holding a canvas' chart configuration
pub const CHART_CONFIG_ATTRIBUTE: &str = "data-chart";
/// Attribute holding the id of the instance mounted on a canvas
pub const CHART_ID_ATTRIBUTE: &str = "data-chart-id";
/// Attribute holding the number of redraws since mount
pub const CHART_REVISION_ATTRIBUTE: &str = "data-chart-revision";

/// Identifier of a mounted chart instance
pub type ChartId = u64;

/// Chart type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Doughnut,
}

/// Chart.js-shaped chart configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: serde_json::Value,
}

/// Labels plus datasets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One dataset with its fixed styling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<i64>,
    #[serde(flatten)]
    pub style: serde_json::Map<String, serde_json::Value>,
}

/// Whatever charts are mounted on and redrawn through
pub trait ChartSurface {
    /// Whether the named canvas exists
    fn has_canvas(&self, canvas: &str) -> bool;

    /// Construct a chart on the canvas
    fn mount_chart(&mut self, canvas: &str, config: &ChartConfig) -> ChartId;

    /// Redraw an existing chart with its updated configuration
    fn redraw_chart(&mut self, id: ChartId, canvas: &str, config: &ChartConfig, revision: u64);
}

/// A live chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    pub id: ChartId,
    pub canvas: String,
    pub config: ChartConfig,
    /// Number of in-place redraws since mount
    pub revision: u64,
}

impl ChartInstance {
    /// Replace the first dataset's labels and values
    pub fn set_data(&mut self, labels: Vec<String>, values: Vec<i64>) {
        self.config.data.labels = labels;
        if let Some(dataset) = self.config.data.datasets.first_mut() {
            dataset.data = values;
        }
    }
}

/// What an update call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartUpdate {
    /// Canvas absent, nothing happened
    Skipped,
    /// A new instance was mounted
    Created(ChartId),
    /// The existing instance was redrawn
    Updated(ChartId),
}

/// Holder for at most one chart instance bound to one canvas
#[derive(Debug, Clone)]
pub struct ChartSlot {
    canvas: String,
    instance: Option<ChartInstance>,
}

impl ChartSlot {
    pub fn new(canvas: impl Into<String>) -> Self {
        Self {
            canvas: canvas.into(),
            instance: None,
        }
    }

    pub fn canvas(&self) -> &str {
        &self.canvas
    }

    pub fn instance(&self) -> Option<&ChartInstance> {
        self.instance.as_ref()
    }

    /// Update the chart in place, mounting it on first use.
    ///
    /// `build` produces the full configuration and is only called when
    /// no instance exists yet.
    pub fn update<S, F>(
        &mut self,
        surface: &mut S,
        labels: Vec<String>,
        values: Vec<i64>,
        build: F,
    ) -> ChartUpdate
    where
        S: ChartSurface + ?Sized,
        F: FnOnce(Vec<String>, Vec<i64>) -> ChartConfig,
    {
        if !surface.has_canvas(&self.canvas) {
            return ChartUpdate::Skipped;
        }

        match self.instance.as_mut() {
            Some(instance) => {
                instance.set_data(labels, values);
                instance.revision += 1;
                surface.redraw_chart(
                    instance.id,
                    &instance.canvas,
                    &instance.config,
                    instance.revision,
                );
                ChartUpdate::Updated(instance.id)
            }
            None => {
                let config = build(labels, values);
                let id = surface.mount_chart(&self.canvas, &config);
                tracing::debug!(canvas = %self.canvas, chart_id = id, "Mounted chart");
                self.instance = Some(ChartInstance {
                    id,
                    canvas: self.canvas.clone(),
                    config,
                    revision: 0,
                });
                ChartUpdate::Created(id)
            }
        }
    }
}

/// Both dashboard charts
#[derive(Debug, Clone)]
pub struct ChartSlots {
    pub activity: ChartSlot,
    pub games: ChartSlot,
}

impl Default for ChartSlots {
    fn default() -> Self {
        Self {
            activity: ChartSlot::new(crate::document::ids::ACTIVITY_CHART),
            games: ChartSlot::new(crate::document::ids::GAMES_CHART),
        }
    }
}

impl ChartSurface for Document {
    fn has_canvas(&self, canvas: &str) -> bool {
        self.get(canvas).map(|el| el.tag == "canvas").unwrap_or(false)
    }

    fn mount_chart(&mut self, canvas: &str, config: &ChartConfig) -> ChartId {
        let id = self.next_chart_id();
        self.set_attribute(canvas, CHART_ID_ATTRIBUTE, id.to_string());
        self.set_attribute(canvas, CHART_REVISION_ATTRIBUTE, "0");
        self.set_attribute(canvas, CHART_CONFIG_ATTRIBUTE, config_json(config));
        id
    }

    fn redraw_chart(&mut self, id: ChartId, canvas: &str, config: &ChartConfig, revision: u64) {
        let bound = self
            .get(canvas)
            .and_then(|el| el.attributes.get(CHART_ID_ATTRIBUTE))
            .map(|v| v == &id.to_string())
            .unwrap_or(false);

        if !bound {
            // The canvas was rebuilt under us; rebind the existing instance
            self.set_attribute(canvas, CHART_ID_ATTRIBUTE, id.to_string());
        }
        self.set_attribute(canvas, CHART_REVISION_ATTRIBUTE, revision.to_string());
        self.set_attribute(canvas, CHART_CONFIG_ATTRIBUTE, config_json(config));
    }
}

fn config_json(config: &ChartConfig) -> String {
    serde_json::to_string(config).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to serialize chart config");
        "null".to_string()
    })
}

/// Style map from a JSON object literal
pub(crate) fn style(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}
