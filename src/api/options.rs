use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, Margin};
use crate::render::{Color, Drawable, TextHAlign, TextPrimitive};

use super::resolve::color_or;
use super::{AreaGate, AxisOptions, AxisOrient, PointGate};

/// Font used by axis and region labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default = "default_font_fill")]
    pub fill: String,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            bold: false,
            italic: false,
            fill: default_font_fill(),
        }
    }
}

impl FontSpec {
    /// Builds a text primitive in this font; an unparsable fill falls back to black.
    #[must_use]
    pub fn text(&self, text: impl Into<String>, x: f64, y: f64, h_align: TextHAlign) -> TextPrimitive {
        TextPrimitive {
            text: text.into(),
            x,
            y,
            font_family: self.font_family.clone(),
            font_size_px: self.font_size,
            font_weight: if self.bold { "bold" } else { "normal" }.to_owned(),
            font_style: if self.italic { "italic" } else { "normal" }.to_owned(),
            color: color_or(&self.fill, Color::BLACK, "label.fill"),
            h_align,
        }
    }
}

/// Base series color, given either as `"#hex"` or as `{ "color": "#hex" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorOption {
    Hex(String),
    Object { color: String },
}

impl ColorOption {
    #[must_use]
    pub fn hex(&self) -> &str {
        match self {
            Self::Hex(hex) | Self::Object { color: hex } => hex,
        }
    }
}

/// Which series take part in the stroke reveal.
///
/// Series outside the selection are drawn with a fixed `[8, 12]` dash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealEligibility {
    All,
    /// Series with index `< n`.
    FirstN(usize),
    Only(Vec<usize>),
}

impl Default for RevealEligibility {
    fn default() -> Self {
        Self::FirstN(4)
    }
}

impl RevealEligibility {
    #[must_use]
    pub fn includes(&self, series_index: usize) -> bool {
        match self {
            Self::All => true,
            Self::FirstN(count) => series_index < *count,
            Self::Only(indices) => indices.contains(&series_index),
        }
    }
}

/// Replacement marker content for `(series_index, point_index)`.
///
/// The returned drawable is placed inside a group already translated to the
/// point, so it should be drawn around the local origin.
#[derive(Clone)]
pub struct PointRenderer(pub Arc<dyn Fn(usize, usize) -> Drawable + Send + Sync>);

impl PointRenderer {
    #[must_use]
    pub fn new(f: impl Fn(usize, usize) -> Drawable + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[must_use]
    pub fn render(&self, series_index: usize, point_index: usize) -> Drawable {
        (self.0)(series_index, point_index)
    }
}

impl fmt::Debug for PointRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PointRenderer(..)")
    }
}

impl PartialEq for PointRenderer {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Chart-level drawing options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartOptions {
    #[serde(default)]
    pub color: Option<ColorOption>,
    #[serde(default = "default_show_areas")]
    pub show_areas: AreaGate,
    #[serde(default = "default_show_points")]
    pub show_points: PointGate,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "default_point_radius")]
    pub point_radius: f64,
    #[serde(skip)]
    pub render_point: Option<PointRenderer>,
    #[serde(default = "default_axis_x")]
    pub axis_x: AxisOptions,
    #[serde(default = "default_axis_y")]
    pub axis_y: AxisOptions,
    #[serde(default = "default_margin")]
    pub margin: Margin,
    #[serde(default)]
    pub label: FontSpec,
    /// Lower bound the y domain is widened to.
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper bound the y domain is widened to.
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub reveal_series: RevealEligibility,
}

impl Default for LineChartOptions {
    fn default() -> Self {
        Self {
            color: None,
            show_areas: default_show_areas(),
            show_points: default_show_points(),
            stroke_width: default_stroke_width(),
            point_radius: default_point_radius(),
            render_point: None,
            axis_x: default_axis_x(),
            axis_y: default_axis_y(),
            margin: default_margin(),
            label: FontSpec::default(),
            min: None,
            max: None,
            reveal_series: RevealEligibility::default(),
        }
    }
}

impl LineChartOptions {
    #[must_use]
    pub fn with_color(mut self, hex: impl Into<String>) -> Self {
        self.color = Some(ColorOption::Hex(hex.into()));
        self
    }

    #[must_use]
    pub fn with_show_areas(mut self, gate: AreaGate) -> Self {
        self.show_areas = gate;
        self
    }

    #[must_use]
    pub fn with_show_points(mut self, gate: PointGate) -> Self {
        self.show_points = gate;
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    #[must_use]
    pub fn with_point_radius(mut self, point_radius: f64) -> Self {
        self.point_radius = point_radius;
        self
    }

    #[must_use]
    pub fn with_render_point(
        mut self,
        f: impl Fn(usize, usize) -> Drawable + Send + Sync + 'static,
    ) -> Self {
        self.render_point = Some(PointRenderer::new(f));
        self
    }

    #[must_use]
    pub fn with_axes(mut self, axis_x: AxisOptions, axis_y: AxisOptions) -> Self {
        self.axis_x = axis_x;
        self.axis_y = axis_y;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: FontSpec) -> Self {
        self.label = label;
        self
    }

    #[must_use]
    pub fn with_domain_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub fn with_reveal_series(mut self, reveal_series: RevealEligibility) -> Self {
        self.reveal_series = reveal_series;
        self
    }
}

/// Label position relative to the region's top edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelOffset {
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub top: Option<f64>,
}

/// Horizontal background band between two y-domain values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub from: f64,
    pub to: f64,
    /// Hex fill; black when absent.
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub fill_opacity: Option<f64>,
    #[serde(default)]
    pub label_offset: Option<LabelOffset>,
}

impl Region {
    #[must_use]
    pub fn new(from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            fill: None,
            label: None,
            fill_opacity: None,
            label_offset: None,
        }
    }

    #[must_use]
    pub fn with_fill(mut self, hex: impl Into<String>) -> Self {
        self.fill = Some(hex.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_fill_opacity(mut self, fill_opacity: f64) -> Self {
        self.fill_opacity = Some(fill_opacity);
        self
    }

    #[must_use]
    pub fn with_label_offset(mut self, label_offset: LabelOffset) -> Self {
        self.label_offset = Some(label_offset);
        self
    }
}

/// Styling shared by every region unless a region overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionStyling {
    #[serde(default)]
    pub fill_opacity: Option<f64>,
    #[serde(default)]
    pub label_offset: Option<LabelOffset>,
}

/// Everything a line chart is built from.
///
/// `data: None` renders the no-data placeholder; `Some(vec![])` renders an
/// empty plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub data: Option<Vec<DataPoint>>,
    #[serde(default = "default_x_key")]
    pub x_key: String,
    #[serde(default = "default_y_key")]
    pub y_key: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub options: LineChartOptions,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub region_styling: RegionStyling,
    #[serde(default, alias = "pallete")]
    pub palette: Option<Vec<String>>,
    #[serde(default)]
    pub animatable: bool,
    #[serde(default)]
    pub no_data_message: Option<String>,
}

impl ChartConfig {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            data: None,
            x_key: default_x_key(),
            y_key: default_y_key(),
            width,
            height,
            options: LineChartOptions::default(),
            regions: Vec::new(),
            region_styling: RegionStyling::default(),
            palette: None,
            animatable: false,
            no_data_message: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Vec<DataPoint>) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_keys(mut self, x_key: impl Into<String>, y_key: impl Into<String>) -> Self {
        self.x_key = x_key.into();
        self.y_key = y_key.into();
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: LineChartOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = regions;
        self
    }

    #[must_use]
    pub fn with_region_styling(mut self, region_styling: RegionStyling) -> Self {
        self.region_styling = region_styling;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<String>) -> Self {
        self.palette = Some(palette);
        self
    }

    #[must_use]
    pub fn with_animatable(mut self, animatable: bool) -> Self {
        self.animatable = animatable;
        self
    }

    #[must_use]
    pub fn with_no_data_message(mut self, message: impl Into<String>) -> Self {
        self.no_data_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn no_data_message(&self) -> &str {
        self.no_data_message
            .as_deref()
            .unwrap_or(DEFAULT_NO_DATA_MESSAGE)
    }

    /// Plot-area size after subtracting margins, floored at zero.
    #[must_use]
    pub fn plot_size(&self) -> (f64, f64) {
        let margin = self.options.margin;
        (
            (self.width - margin.horizontal()).max(0.0),
            (self.height - margin.vertical()).max(0.0),
        )
    }
}

pub const DEFAULT_NO_DATA_MESSAGE: &str = "No data available";

fn default_font_family() -> String {
    "Arial".to_owned()
}

fn default_font_size() -> f64 {
    14.0
}

fn default_font_fill() -> String {
    "#000000".to_owned()
}

fn default_show_areas() -> AreaGate {
    AreaGate::Always
}

fn default_show_points() -> PointGate {
    PointGate::Never
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_point_radius() -> f64 {
    5.0
}

fn default_axis_x() -> AxisOptions {
    AxisOptions::default().with_orient(AxisOrient::Bottom)
}

fn default_axis_y() -> AxisOptions {
    AxisOptions::default().with_orient(AxisOrient::Left)
}

fn default_margin() -> Margin {
    Margin::new(20.0, 40.0, 40.0, 20.0)
}

fn default_x_key() -> String {
    "x".to_owned()
}

fn default_y_key() -> String {
    "y".to_owned()
}
