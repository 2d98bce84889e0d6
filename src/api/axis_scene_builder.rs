use tracing::trace;

use crate::core::{ChartArea, Scale};
use crate::error::ChartResult;
use crate::render::{Color, Drawable, LinePrimitive, TextHAlign};

use super::axis_ticks::axis_ticks;
use super::resolve::color_or;
use super::{AxisOptions, AxisOrient};

const TICK_MARK_LENGTH_PX: f64 = 5.0;
const LABEL_GAP_PX: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AxisKind {
    X,
    Y,
}

/// Plot-space geometry shared by grid and axis builders.
#[derive(Debug, Clone, Copy)]
pub(super) struct AxisSceneContext<'a> {
    pub chart_area: &'a ChartArea,
    pub xscale: &'a dyn Scale,
    pub yscale: &'a dyn Scale,
}

struct AxisFrame {
    /// Pixel span of the other axis: `(x_left, x_right)` or `(y_bottom, y_top)`.
    across: (f64, f64),
    /// Pixel span along this axis.
    along: (f64, f64),
    domain: (f64, f64),
}

impl AxisSceneContext<'_> {
    fn frame(&self, kind: AxisKind) -> Option<AxisFrame> {
        let x_pixels = self.chart_area.x.pixels()?;
        let y_pixels = self.chart_area.y.pixels()?;
        match kind {
            AxisKind::X => Some(AxisFrame {
                across: y_pixels,
                along: x_pixels,
                domain: self.chart_area.x.domain()?,
            }),
            AxisKind::Y => Some(AxisFrame {
                across: x_pixels,
                along: y_pixels,
                domain: self.chart_area.y.domain()?,
            }),
        }
    }

    fn scale(&self, kind: AxisKind) -> &dyn Scale {
        match kind {
            AxisKind::X => self.xscale,
            AxisKind::Y => self.yscale,
        }
    }
}

/// Grid lines across the plot at every tick of `kind`.
pub(super) fn build_grid(
    options: &AxisOptions,
    kind: AxisKind,
    ctx: AxisSceneContext<'_>,
) -> ChartResult<Vec<Drawable>> {
    if !options.show_lines {
        return Ok(Vec::new());
    }
    let Some(frame) = ctx.frame(kind) else {
        trace!(?kind, "axis area undefined; grid skipped");
        return Ok(Vec::new());
    };
    let color = color_or(&options.grid_color, Color::BLACK, "axis.grid_color");
    let scale = ctx.scale(kind);
    let (from, to) = frame.across;

    Ok(
        axis_ticks(frame.domain.0, frame.domain.1, &options.tick_values, options.tick_count)
            .into_iter()
            .map(|tick| {
                let at = scale.apply(tick.value);
                let line = match kind {
                    AxisKind::X => LinePrimitive::new(at, from, at, to, options.stroke_width, color),
                    AxisKind::Y => LinePrimitive::new(from, at, to, at, options.stroke_width, color),
                };
                Drawable::Line(line)
            })
            .collect(),
    )
}

/// Axis line, tick marks and tick labels for `kind`.
pub(super) fn build_axis(
    options: &AxisOptions,
    kind: AxisKind,
    ctx: AxisSceneContext<'_>,
) -> ChartResult<Vec<Drawable>> {
    if !options.show_axis && !options.show_ticks && !options.show_labels {
        return Ok(Vec::new());
    }
    let Some(frame) = ctx.frame(kind) else {
        trace!(?kind, "axis area undefined; axis skipped");
        return Ok(Vec::new());
    };

    let orient = resolve_orient(options.orient, kind);
    let color = color_or(&options.color, Color::BLACK, "axis.color");
    let scale = ctx.scale(kind);
    let other_scale = match kind {
        AxisKind::X => ctx.yscale,
        AxisKind::Y => ctx.xscale,
    };

    let baseline = if options.zero_axis {
        other_scale.apply(0.0)
    } else {
        match orient {
            AxisOrient::Bottom | AxisOrient::Left => frame.across.0,
            AxisOrient::Top | AxisOrient::Right => frame.across.1,
        }
    };
    // Tick marks and labels grow away from the plot.
    let outward = match orient {
        AxisOrient::Bottom | AxisOrient::Right => 1.0,
        AxisOrient::Top | AxisOrient::Left => -1.0,
    };

    let mut items = Vec::new();
    if options.show_axis {
        let (start, end) = frame.along;
        items.push(Drawable::Line(match kind {
            AxisKind::X => LinePrimitive::new(start, baseline, end, baseline, options.stroke_width, color),
            AxisKind::Y => LinePrimitive::new(baseline, start, baseline, end, options.stroke_width, color),
        }));
    }

    let font_size = options.label.font_size;
    for tick in axis_ticks(frame.domain.0, frame.domain.1, &options.tick_values, options.tick_count) {
        let at = scale.apply(tick.value);
        let mark_end = baseline + outward * TICK_MARK_LENGTH_PX;
        if options.show_ticks {
            items.push(Drawable::Line(match kind {
                AxisKind::X => LinePrimitive::new(at, baseline, at, mark_end, options.stroke_width, color),
                AxisKind::Y => LinePrimitive::new(baseline, at, mark_end, at, options.stroke_width, color),
            }));
        }
        if options.show_labels {
            let label_gap = TICK_MARK_LENGTH_PX + LABEL_GAP_PX;
            let text = match orient {
                AxisOrient::Bottom => options.label.text(
                    tick.label,
                    at,
                    baseline + label_gap + font_size,
                    TextHAlign::Center,
                ),
                AxisOrient::Top => {
                    options
                        .label
                        .text(tick.label, at, baseline - label_gap, TextHAlign::Center)
                }
                AxisOrient::Left => options.label.text(
                    tick.label,
                    baseline - label_gap,
                    at + font_size / 3.0,
                    TextHAlign::Right,
                ),
                AxisOrient::Right => options.label.text(
                    tick.label,
                    baseline + label_gap,
                    at + font_size / 3.0,
                    TextHAlign::Left,
                ),
            };
            items.push(Drawable::Text(text));
        }
    }
    Ok(items)
}

fn resolve_orient(configured: Option<AxisOrient>, kind: AxisKind) -> AxisOrient {
    match (kind, configured) {
        (AxisKind::X, Some(orient)) if orient.is_horizontal() => orient,
        (AxisKind::Y, Some(orient)) if !orient.is_horizontal() => orient,
        (AxisKind::X, _) => AxisOrient::Bottom,
        (AxisKind::Y, _) => AxisOrient::Left,
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisKind, AxisSceneContext, build_axis, build_grid};
    use crate::api::{AxisOptions, AxisOrient};
    use crate::core::{AxisArea, ChartArea, LinearScale, Margin};
    use crate::render::Drawable;

    fn area() -> (ChartArea, LinearScale, LinearScale) {
        let xscale = LinearScale::new((0.0, 10.0), (0.0, 100.0)).expect("x scale");
        let yscale = LinearScale::new((0.0, 10.0), (50.0, 0.0)).expect("y scale");
        let chart_area = ChartArea {
            x: AxisArea {
                min_value: Some(0.0),
                max_value: Some(10.0),
                min: Some(0.0),
                max: Some(100.0),
            },
            y: AxisArea {
                min_value: Some(0.0),
                max_value: Some(10.0),
                min: Some(50.0),
                max: Some(0.0),
            },
            margin: Margin::default(),
        };
        (chart_area, xscale, yscale)
    }

    #[test]
    fn x_grid_spans_full_plot_height() {
        let (chart_area, xscale, yscale) = area();
        let ctx = AxisSceneContext {
            chart_area: &chart_area,
            xscale: &xscale,
            yscale: &yscale,
        };
        let grid = build_grid(&AxisOptions::default(), AxisKind::X, ctx).expect("grid");
        assert_eq!(grid.len(), 6);
        let Drawable::Line(line) = &grid[1] else {
            panic!("grid should be lines");
        };
        assert_eq!((line.x1, line.y1, line.x2, line.y2), (20.0, 50.0, 20.0, 0.0));
    }

    #[test]
    fn undefined_area_renders_nothing() {
        let (_, xscale, yscale) = area();
        let chart_area = ChartArea::default();
        let ctx = AxisSceneContext {
            chart_area: &chart_area,
            xscale: &xscale,
            yscale: &yscale,
        };
        assert!(build_axis(&AxisOptions::default(), AxisKind::Y, ctx).expect("axis").is_empty());
        assert!(build_grid(&AxisOptions::default(), AxisKind::Y, ctx).expect("grid").is_empty());
    }

    #[test]
    fn left_axis_labels_are_right_aligned_outside_plot() {
        let (chart_area, xscale, yscale) = area();
        let ctx = AxisSceneContext {
            chart_area: &chart_area,
            xscale: &xscale,
            yscale: &yscale,
        };
        let options = AxisOptions::default()
            .with_orient(AxisOrient::Left)
            .with_tick_values(vec![5.0]);
        let items = build_axis(&options, AxisKind::Y, ctx).expect("axis");
        assert_eq!(items.len(), 3);
        let Drawable::Text(label) = &items[2] else {
            panic!("third item should be the label");
        };
        assert_eq!(label.text, "5");
        assert!(label.x < 0.0);
    }
}
