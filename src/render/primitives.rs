use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(text: &str) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidColor(text.to_owned());
        let digits = text.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| -> ChartResult<f64> {
            u8::from_str_radix(&digits[range], 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|_| invalid())
        };

        match digits.len() {
            3 => {
                let short = |index: usize| -> ChartResult<f64> {
                    let nibble = u8::from_str_radix(&digits[index..=index], 16).map_err(|_| invalid())?;
                    Ok(f64::from(nibble * 17) / 255.0)
                };
                Ok(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(invalid()),
        }
    }

    /// `#rrggbb` form; alpha is emitted separately by renderers.
    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }

    /// Linear blend towards `other`; `amount` is clamped to `[0, 1]`.
    #[must_use]
    pub fn mix(self, other: Self, amount: f64) -> Self {
        let t = amount.clamp(0.0, 1.0);
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Self::rgba(
            lerp(self.red, other.red),
            lerp(self.green, other.green),
            lerp(self.blue, other.blue),
            lerp(self.alpha, other.alpha),
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Dash pattern applied to a stroked path.
///
/// `reveal_bound` dashes carry the shared reveal value as their offset and
/// are rewritten by [`super::Scene::apply_reveal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeDash {
    pub pattern: SmallVec<[f64; 2]>,
    pub offset: Option<f64>,
    pub reveal_bound: bool,
}

impl StrokeDash {
    /// Fixed decorative pattern without offset.
    #[must_use]
    pub fn fixed(pattern: &[f64]) -> Self {
        Self {
            pattern: SmallVec::from_slice(pattern),
            offset: None,
            reveal_bound: false,
        }
    }

    /// One dash as long as the path, shifted by the remaining reveal length.
    #[must_use]
    pub fn reveal(path_length: f64, remaining: f64) -> Self {
        Self {
            pattern: SmallVec::from_slice(&[path_length]),
            offset: Some(remaining),
            reveal_bound: true,
        }
    }
}

/// Draw command for SVG path data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPrimitive {
    pub data: String,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub fill: Option<Color>,
    pub fill_opacity: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub dash: Option<StrokeDash>,
}

impl PathPrimitive {
    #[must_use]
    pub fn stroked(data: impl Into<String>, stroke: Color, stroke_width: f64) -> Self {
        Self {
            data: data.into(),
            stroke: Some(stroke),
            stroke_width,
            fill: None,
            fill_opacity: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            dash: None,
        }
    }

    #[must_use]
    pub fn filled(data: impl Into<String>, fill: Color, fill_opacity: f64) -> Self {
        Self {
            data: data.into(),
            stroke: None,
            stroke_width: 0.0,
            fill: Some(fill),
            fill_opacity,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            dash: None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.stroke.is_some() && (!self.stroke_width.is_finite() || self.stroke_width <= 0.0) {
            return Err(ChartError::InvalidData(
                "path stroke width must be finite and > 0".to_owned(),
            ));
        }
        validate_opacity(self.fill_opacity)?;
        if let Some(dash) = &self.dash {
            let offset_ok = dash.offset.is_none_or(f64::is_finite);
            if !offset_ok || dash.pattern.iter().any(|len| !len.is_finite() || *len < 0.0) {
                return Err(ChartError::InvalidData(
                    "dash pattern and offset must be finite and >= 0".to_owned(),
                ));
            }
        }
        for color in self.stroke.iter().chain(self.fill.iter()) {
            color.validate()?;
        }
        Ok(())
    }
}

/// Draw command for a straight segment (grid lines, axis lines, ticks).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Filled rectangle. Height may be negative (inverted region bands).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub fill_opacity: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill: Color, fill_opacity: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill,
            fill_opacity,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ChartError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        validate_opacity(self.fill_opacity)?;
        self.fill.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Color,
    pub fill_opacity: f64,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(cx: f64, cy: f64, radius: f64, fill: Color, fill_opacity: f64) -> Self {
        Self {
            cx,
            cy,
            radius,
            fill,
            fill_opacity,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(ChartError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be finite and >= 0".to_owned(),
            ));
        }
        validate_opacity(self.fill_opacity)?;
        self.fill.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_family: String,
    pub font_size_px: f64,
    pub font_weight: String,
    pub font_style: String,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Children drawn with a translated origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPrimitive {
    pub translate_x: f64,
    pub translate_y: f64,
    pub children: Vec<Drawable>,
}

impl GroupPrimitive {
    #[must_use]
    pub fn new(translate_x: f64, translate_y: f64, children: Vec<Drawable>) -> Self {
        Self {
            translate_x,
            translate_y,
            children,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.translate_x.is_finite() || !self.translate_y.is_finite() {
            return Err(ChartError::InvalidData(
                "group translation must be finite".to_owned(),
            ));
        }
        self.children.iter().try_for_each(Drawable::validate)
    }
}

/// Any primitive the scene can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Drawable {
    Path(PathPrimitive),
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Text(TextPrimitive),
    Group(GroupPrimitive),
}

impl Drawable {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Path(path) => path.validate(),
            Self::Line(line) => line.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Text(text) => text.validate(),
            Self::Group(group) => group.validate(),
        }
    }

    /// Number of leaf primitives, descending into groups.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Group(group) => group.children.iter().map(Self::leaf_count).sum(),
            _ => 1,
        }
    }
}

fn validate_opacity(opacity: f64) -> ChartResult<()> {
    if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
        return Err(ChartError::InvalidData(
            "opacity must be finite and in [0, 1]".to_owned(),
        ));
    }
    Ok(())
}
