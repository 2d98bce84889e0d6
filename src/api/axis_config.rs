use serde::{Deserialize, Serialize};

use super::FontSpec;

/// Side of the plot an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrient {
    Top,
    Bottom,
    Left,
    Right,
}

impl AxisOrient {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Grid, axis line, tick and label settings for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    #[serde(default = "default_true")]
    pub show_axis: bool,
    /// Grid lines across the plot.
    #[serde(default = "default_true")]
    pub show_lines: bool,
    #[serde(default = "default_true")]
    pub show_labels: bool,
    #[serde(default = "default_true")]
    pub show_ticks: bool,
    /// Draw the axis line at the data zero instead of the plot edge.
    #[serde(default)]
    pub zero_axis: bool,
    #[serde(default)]
    pub orient: Option<AxisOrient>,
    /// Explicit tick positions; empty means generated ticks.
    #[serde(default)]
    pub tick_values: Vec<f64>,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
    #[serde(default = "default_axis_color")]
    pub color: String,
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
    #[serde(default = "default_axis_stroke_width")]
    pub stroke_width: f64,
    #[serde(default)]
    pub label: FontSpec,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            show_axis: default_true(),
            show_lines: default_true(),
            show_labels: default_true(),
            show_ticks: default_true(),
            zero_axis: false,
            orient: None,
            tick_values: Vec::new(),
            tick_count: default_tick_count(),
            color: default_axis_color(),
            grid_color: default_grid_color(),
            stroke_width: default_axis_stroke_width(),
            label: FontSpec::default(),
        }
    }
}

impl AxisOptions {
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            show_axis: false,
            show_lines: false,
            show_labels: false,
            show_ticks: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_orient(mut self, orient: AxisOrient) -> Self {
        self.orient = Some(orient);
        self
    }

    #[must_use]
    pub fn with_tick_values(mut self, tick_values: Vec<f64>) -> Self {
        self.tick_values = tick_values;
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    #[must_use]
    pub fn with_zero_axis(mut self, zero_axis: bool) -> Self {
        self.zero_axis = zero_axis;
        self
    }
}

fn default_true() -> bool {
    true
}

fn default_tick_count() -> usize {
    5
}

fn default_axis_color() -> String {
    "#3e90f0".to_owned()
}

fn default_grid_color() -> String {
    "#e0e0e0".to_owned()
}

fn default_axis_stroke_width() -> f64 {
    1.0
}
