use std::fmt::Write as _;

use crate::error::ChartResult;
use crate::render::{
    ChartOutput, CirclePrimitive, Color, Drawable, LineCap, LineJoin, LinePrimitive,
    PathPrimitive, RectPrimitive, Renderer, Scene, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub paths_drawn: usize,
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Serializes scenes into standalone SVG documents.
///
/// Reference backend for hosts that hand geometry to a browser or an SVG
/// rasterizer; the document of the last render is kept in memory.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    fn write_scene(&mut self, scene: &Scene) {
        let mut stats = SvgRenderStats::default();
        let mut out = String::with_capacity(4096);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            scene.viewport.width, scene.viewport.height
        );
        let _ = write!(
            out,
            r#"<g transform="translate({},{})">"#,
            scene.origin[0], scene.origin[1]
        );
        for item in scene.drawables() {
            write_drawable(&mut out, item, &mut stats);
        }
        out.push_str("</g></svg>");
        self.document = out;
        self.last_stats = stats;
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, output: &ChartOutput) -> ChartResult<()> {
        match output {
            ChartOutput::Placeholder(message) => {
                self.document = format!(
                    r#"<svg xmlns="http://www.w3.org/2000/svg"><text x="0" y="16">{}</text></svg>"#,
                    escape(message)
                );
                self.last_stats = SvgRenderStats {
                    texts_drawn: 1,
                    ..SvgRenderStats::default()
                };
            }
            ChartOutput::Scene(scene) => {
                scene.validate()?;
                self.write_scene(scene);
            }
        }
        Ok(())
    }
}

fn write_drawable(out: &mut String, item: &Drawable, stats: &mut SvgRenderStats) {
    match item {
        Drawable::Path(path) => {
            write_path(out, path);
            stats.paths_drawn += 1;
        }
        Drawable::Line(line) => {
            write_line(out, line);
            stats.lines_drawn += 1;
        }
        Drawable::Rect(rect) => {
            write_rect(out, rect);
            stats.rects_drawn += 1;
        }
        Drawable::Circle(circle) => {
            write_circle(out, circle);
            stats.circles_drawn += 1;
        }
        Drawable::Text(text) => {
            write_text(out, text);
            stats.texts_drawn += 1;
        }
        Drawable::Group(group) => {
            let _ = write!(
                out,
                r#"<g transform="translate({},{})">"#,
                group.translate_x, group.translate_y
            );
            for child in &group.children {
                write_drawable(out, child, stats);
            }
            out.push_str("</g>");
        }
    }
}

fn write_path(out: &mut String, path: &PathPrimitive) {
    let _ = write!(out, r#"<path d="{}""#, escape(&path.data));
    match path.fill {
        Some(fill) => {
            write_paint(out, "fill", fill);
            let _ = write!(out, r#" fill-opacity="{}""#, path.fill_opacity * fill.alpha);
        }
        None => out.push_str(r#" fill="none""#),
    }
    match path.stroke {
        Some(stroke) => {
            write_paint(out, "stroke", stroke);
            let _ = write!(out, r#" stroke-width="{}""#, path.stroke_width);
            if stroke.alpha < 1.0 {
                let _ = write!(out, r#" stroke-opacity="{}""#, stroke.alpha);
            }
            let cap = match path.line_cap {
                LineCap::Butt => "butt",
                LineCap::Round => "round",
                LineCap::Square => "square",
            };
            let join = match path.line_join {
                LineJoin::Miter => "miter",
                LineJoin::Round => "round",
                LineJoin::Bevel => "bevel",
            };
            let _ = write!(out, r#" stroke-linecap="{cap}" stroke-linejoin="{join}""#);
        }
        None => out.push_str(r#" stroke="none""#),
    }
    if let Some(dash) = &path.dash {
        let pattern: Vec<String> = dash.pattern.iter().map(f64::to_string).collect();
        let _ = write!(out, r#" stroke-dasharray="{}""#, pattern.join(","));
        if let Some(offset) = dash.offset {
            let _ = write!(out, r#" stroke-dashoffset="{offset}""#);
        }
    }
    out.push_str("/>");
}

fn write_line(out: &mut String, line: &LinePrimitive) {
    let _ = write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{}""#,
        line.x1, line.y1, line.x2, line.y2, line.stroke_width
    );
    write_paint(out, "stroke", line.color);
    out.push_str("/>");
}

fn write_rect(out: &mut String, rect: &RectPrimitive) {
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill-opacity="{}""#,
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        rect.fill_opacity * rect.fill.alpha
    );
    write_paint(out, "fill", rect.fill);
    out.push_str("/>");
}

fn write_circle(out: &mut String, circle: &CirclePrimitive) {
    let _ = write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" fill-opacity="{}""#,
        circle.cx,
        circle.cy,
        circle.radius,
        circle.fill_opacity * circle.fill.alpha
    );
    write_paint(out, "fill", circle.fill);
    out.push_str("/>");
}

fn write_text(out: &mut String, text: &TextPrimitive) {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" font-style="{}" text-anchor="{anchor}""#,
        text.x,
        text.y,
        escape(&text.font_family),
        text.font_size_px,
        escape(&text.font_weight),
        escape(&text.font_style),
    );
    write_paint(out, "fill", text.color);
    let _ = write!(out, ">{}</text>", escape(&text.text));
}

fn write_paint(out: &mut String, attribute: &str, color: Color) {
    let _ = write!(out, r#" {attribute}="{}""#, color.to_hex());
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
