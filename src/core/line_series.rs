use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::core::path::{CurvePath, PathCommand};
use crate::core::scale::{LinearScale, Scale};
use crate::core::types::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Reads one numeric coordinate out of a data record.
pub type Accessor<'a> = &'a dyn Fn(&DataPoint) -> Option<f64>;

/// Everything a chart-type strategy receives from the pipeline.
pub struct ChartTypeInput<'a> {
    pub data: &'a [DataPoint],
    pub x_accessor: Accessor<'a>,
    pub y_accessor: Accessor<'a>,
    pub width: f64,
    pub height: f64,
    /// Close areas against the zero line instead of the plot bottom.
    pub closed: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl fmt::Debug for ChartTypeInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartTypeInput")
            .field("points", &self.data.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("closed", &self.closed)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}

/// One series: its source records plus line and area paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub item: Vec<DataPoint>,
    pub line: CurvePath,
    pub area: CurvePath,
}

/// Output of a chart-type strategy.
#[derive(Debug, Clone)]
pub struct CurveSet {
    pub curves: Vec<Curve>,
    pub xscale: Arc<dyn Scale>,
    pub yscale: Arc<dyn Scale>,
}

/// Strategy that groups records into series and fits curves through them.
///
/// Implementations are interchangeable: the rest of the pipeline only sees
/// the returned [`CurveSet`].
pub trait ChartType: fmt::Debug + Send + Sync {
    fn build(&self, input: &ChartTypeInput<'_>) -> ChartResult<CurveSet>;
}

/// How a flat record list is split into series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeriesGrouping {
    /// Every record belongs to one series.
    #[default]
    Single,
    /// Records sharing the value at this key form a series, in first-seen order.
    ByKey(String),
}

impl SeriesGrouping {
    fn group<'a>(&self, data: &'a [DataPoint]) -> Vec<Vec<&'a DataPoint>> {
        match self {
            Self::Single => vec![data.iter().collect()],
            Self::ByKey(key) => {
                let mut groups: IndexMap<String, Vec<&DataPoint>> = IndexMap::new();
                for point in data {
                    let name = match point.get(key) {
                        Some(Value::String(text)) => text.clone(),
                        Some(value) => value.to_string(),
                        None => String::new(),
                    };
                    groups.entry(name).or_default().push(point);
                }
                groups.into_values().collect()
            }
        }
    }
}

/// Straight segments between consecutive points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockLine {
    pub grouping: SeriesGrouping,
}

impl StockLine {
    #[must_use]
    pub fn new(grouping: SeriesGrouping) -> Self {
        Self { grouping }
    }
}

impl ChartType for StockLine {
    fn build(&self, input: &ChartTypeInput<'_>) -> ChartResult<CurveSet> {
        fit_curves(input, &self.grouping, |anchors, commands| {
            for anchor in &anchors[1..] {
                commands.push(PathCommand::LineTo(*anchor));
            }
        })
    }
}

/// Cubic Bézier curve through every point (Catmull-Rom style tangents).
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothLine {
    pub grouping: SeriesGrouping,
    /// Tangent scale; `1/6` matches a uniform Catmull-Rom spline.
    pub tension: f64,
}

impl Default for SmoothLine {
    fn default() -> Self {
        Self {
            grouping: SeriesGrouping::Single,
            tension: 1.0 / 6.0,
        }
    }
}

impl SmoothLine {
    #[must_use]
    pub fn new(grouping: SeriesGrouping) -> Self {
        Self {
            grouping,
            ..Self::default()
        }
    }
}

impl ChartType for SmoothLine {
    fn build(&self, input: &ChartTypeInput<'_>) -> ChartResult<CurveSet> {
        if !self.tension.is_finite() || self.tension < 0.0 {
            return Err(ChartError::InvalidData(
                "smooth line tension must be finite and >= 0".to_owned(),
            ));
        }
        let tension = self.tension;
        fit_curves(input, &self.grouping, move |anchors, commands| {
            let last = anchors.len() - 1;
            for index in 0..last {
                let prev = anchors[index.saturating_sub(1)];
                let from = anchors[index];
                let to = anchors[index + 1];
                let next = anchors[(index + 2).min(last)];
                commands.push(PathCommand::CubicTo {
                    control1: [
                        from[0] + (to[0] - prev[0]) * tension,
                        from[1] + (to[1] - prev[1]) * tension,
                    ],
                    control2: [
                        to[0] - (next[0] - from[0]) * tension,
                        to[1] - (next[1] - from[1]) * tension,
                    ],
                    to,
                });
            }
        })
    }
}

/// Horizontal-then-vertical steps (value holds until the next sample).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepLine {
    pub grouping: SeriesGrouping,
}

impl StepLine {
    #[must_use]
    pub fn new(grouping: SeriesGrouping) -> Self {
        Self { grouping }
    }
}

impl ChartType for StepLine {
    fn build(&self, input: &ChartTypeInput<'_>) -> ChartResult<CurveSet> {
        fit_curves(input, &self.grouping, |anchors, commands| {
            for pair in anchors.windows(2) {
                commands.push(PathCommand::LineTo([pair[1][0], pair[0][1]]));
                commands.push(PathCommand::LineTo(pair[1]));
            }
        })
    }
}

struct Projected {
    item: Vec<DataPoint>,
    values: Vec<[f64; 2]>,
}

/// Shared fitting: grouping, domain extents, scales, and line/area assembly.
///
/// `trace_line` appends the commands that follow the initial `MoveTo` of a line.
fn fit_curves(
    input: &ChartTypeInput<'_>,
    grouping: &SeriesGrouping,
    trace_line: impl Fn(&[[f64; 2]], &mut Vec<PathCommand>),
) -> ChartResult<CurveSet> {
    if !input.width.is_finite() || !input.height.is_finite() {
        return Err(ChartError::InvalidViewport {
            width: input.width,
            height: input.height,
        });
    }

    let mut skipped = 0usize;
    let mut series = Vec::new();
    for group in grouping.group(input.data) {
        let mut projected = Projected {
            item: Vec::with_capacity(group.len()),
            values: Vec::with_capacity(group.len()),
        };
        for point in group {
            match ((input.x_accessor)(point), (input.y_accessor)(point)) {
                (Some(x), Some(y)) => {
                    projected.item.push(point.clone());
                    projected.values.push([x, y]);
                }
                _ => skipped += 1,
            }
        }
        if !projected.values.is_empty() {
            series.push(projected);
        }
    }
    if skipped > 0 {
        trace!(skipped, "records without numeric x/y were dropped");
    }

    let (x_domain, y_domain) = extents(&series, input.min, input.max);
    let xscale = LinearScale::new(x_domain, (0.0, input.width))?;
    let yscale = LinearScale::new(y_domain, (input.height, 0.0))?;

    let baseline = if input.closed {
        yscale.apply(0.0).clamp(0.0, input.height.max(0.0))
    } else {
        input.height
    };

    let curves = series
        .into_iter()
        .map(|projected| {
            let anchors: Vec<[f64; 2]> = projected
                .values
                .iter()
                .map(|[x, y]| [xscale.apply(*x), yscale.apply(*y)])
                .collect();

            let mut line_commands = Vec::with_capacity(anchors.len() * 2);
            line_commands.push(PathCommand::MoveTo(anchors[0]));
            trace_line(&anchors, &mut line_commands);

            let first_x = anchors[0][0];
            let last_x = anchors[anchors.len() - 1][0];
            let mut area_commands = line_commands.clone();
            area_commands.push(PathCommand::LineTo([last_x, baseline]));
            area_commands.push(PathCommand::LineTo([first_x, baseline]));
            area_commands.push(PathCommand::Close);

            Curve {
                item: projected.item,
                line: CurvePath::from_parts(line_commands, anchors.clone()),
                area: CurvePath::from_parts(area_commands, anchors),
            }
        })
        .collect();

    Ok(CurveSet {
        curves,
        xscale: Arc::new(xscale),
        yscale: Arc::new(yscale),
    })
}

/// Data extents; the y extent is widened (never narrowed) by configured bounds.
fn extents(
    series: &[Projected],
    min: Option<f64>,
    max: Option<f64>,
) -> ((f64, f64), (f64, f64)) {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for [px, py] in series.iter().flat_map(|projected| projected.values.iter()) {
        x = (x.0.min(*px), x.1.max(*px));
        y = (y.0.min(*py), y.1.max(*py));
    }
    if x.0 > x.1 {
        x = (0.0, 1.0);
    }
    if y.0 > y.1 {
        y = (min.unwrap_or(0.0), max.unwrap_or(1.0));
    } else {
        if let Some(min) = min.filter(|value| value.is_finite()) {
            y.0 = y.0.min(min);
        }
        if let Some(max) = max.filter(|value| value.is_finite()) {
            y.1 = y.1.max(max);
        }
    }
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::{ChartType, ChartTypeInput, SeriesGrouping, SmoothLine, StepLine, StockLine};
    use crate::core::path::PathCommand;
    use crate::core::types::DataPoint;

    fn input<'a>(
        data: &'a [DataPoint],
        x: &'a dyn Fn(&DataPoint) -> Option<f64>,
        y: &'a dyn Fn(&DataPoint) -> Option<f64>,
    ) -> ChartTypeInput<'a> {
        ChartTypeInput {
            data,
            x_accessor: x,
            y_accessor: y,
            width: 100.0,
            height: 50.0,
            closed: false,
            min: None,
            max: None,
        }
    }

    #[test]
    fn stock_line_maps_extremes_to_plot_corners() {
        let data = vec![DataPoint::xy(0.0, 0.0), DataPoint::xy(1.0, 10.0)];
        let x = |p: &DataPoint| p.number("x");
        let y = |p: &DataPoint| p.number("y");
        let set = StockLine::default().build(&input(&data, &x, &y)).expect("build");

        assert_eq!(set.curves.len(), 1);
        assert_eq!(set.curves[0].line.points(), &[[0.0, 50.0], [100.0, 0.0]]);
        assert_eq!(set.curves[0].line.print(), "M0,50 L100,0");
        assert_eq!(set.curves[0].area.print(), "M0,50 L100,0 L100,50 L0,50 Z");
        assert_eq!(set.yscale.domain(), (0.0, 10.0));
    }

    #[test]
    fn grouping_by_key_keeps_first_seen_order() {
        let data = vec![
            DataPoint::xy(0.0, 1.0).with_text("s", "b"),
            DataPoint::xy(0.0, 2.0).with_text("s", "a"),
            DataPoint::xy(1.0, 3.0).with_text("s", "b"),
        ];
        let x = |p: &DataPoint| p.number("x");
        let y = |p: &DataPoint| p.number("y");
        let set = StockLine::new(SeriesGrouping::ByKey("s".to_owned()))
            .build(&input(&data, &x, &y))
            .expect("build");

        assert_eq!(set.curves.len(), 2);
        assert_eq!(set.curves[0].item.len(), 2);
        assert_eq!(set.curves[1].item.len(), 1);
    }

    #[test]
    fn step_line_inserts_corner_but_keeps_anchor_points() {
        let data = vec![DataPoint::xy(0.0, 0.0), DataPoint::xy(1.0, 1.0)];
        let x = |p: &DataPoint| p.number("x");
        let y = |p: &DataPoint| p.number("y");
        let set = StepLine::default().build(&input(&data, &x, &y)).expect("build");

        assert_eq!(set.curves[0].line.print(), "M0,50 L100,50 L100,0");
        assert_eq!(set.curves[0].line.points().len(), 2);
    }

    #[test]
    fn smooth_line_emits_one_cubic_per_gap() {
        let data = vec![
            DataPoint::xy(0.0, 0.0),
            DataPoint::xy(1.0, 4.0),
            DataPoint::xy(2.0, 1.0),
        ];
        let x = |p: &DataPoint| p.number("x");
        let y = |p: &DataPoint| p.number("y");
        let set = SmoothLine::default().build(&input(&data, &x, &y)).expect("build");
        let cubics = set.curves[0]
            .line
            .commands()
            .iter()
            .filter(|command| matches!(command, PathCommand::CubicTo { .. }))
            .count();
        assert_eq!(cubics, 2);
    }

    #[test]
    fn closed_area_uses_zero_line_as_baseline() {
        let data = vec![DataPoint::xy(0.0, -5.0), DataPoint::xy(1.0, 5.0)];
        let x = |p: &DataPoint| p.number("x");
        let y = |p: &DataPoint| p.number("y");
        let mut request = input(&data, &x, &y);
        request.closed = true;
        let set = StockLine::default().build(&request).expect("build");
        assert_eq!(set.curves[0].area.print(), "M0,50 L100,0 L100,25 L0,25 Z");
    }

    #[test]
    fn records_without_numbers_are_skipped() {
        let data = vec![
            DataPoint::xy(0.0, 0.0),
            DataPoint::new().with_text("x", "n/a").with_number("y", 3.0),
        ];
        let x = |p: &DataPoint| p.number("x");
        let y = |p: &DataPoint| p.number("y");
        let set = StockLine::default().build(&input(&data, &x, &y)).expect("build");
        assert_eq!(set.curves[0].item.len(), 1);
    }

    #[test]
    fn empty_data_yields_no_curves() {
        let x = |p: &DataPoint| p.number("x");
        let y = |p: &DataPoint| p.number("y");
        let set = StockLine::default().build(&input(&[], &x, &y)).expect("build");
        assert!(set.curves.is_empty());
    }
}
