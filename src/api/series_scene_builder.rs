use crate::animation::RevealController;
use crate::core::Curve;
use crate::render::{Drawable, LineCap, LineJoin, PathPrimitive, StrokeDash};

use super::{Palette, RevealEligibility};

/// Decorative dash for series excluded from the reveal.
pub const EXCLUDED_SERIES_DASH: [f64; 2] = [8.0, 12.0];

#[derive(Debug, Clone, Copy)]
pub(super) struct SeriesSceneContext<'a> {
    pub palette: &'a Palette,
    pub stroke_width: f64,
    pub eligibility: &'a RevealEligibility,
    /// Present only when the chart is animatable.
    pub reveal: Option<&'a RevealController>,
}

/// Stroked line per series with round caps and joins.
///
/// Eligible series of an animatable chart carry a reveal dash sized to the
/// longest line and offset by the controller's current value. Ineligible
/// series always get [`EXCLUDED_SERIES_DASH`].
pub(super) fn build_series_lines(curves: &[Curve], ctx: SeriesSceneContext<'_>) -> Vec<Drawable> {
    curves
        .iter()
        .enumerate()
        .map(|(series_index, curve)| {
            let mut path = PathPrimitive::stroked(
                curve.line.print(),
                ctx.palette.color(series_index),
                ctx.stroke_width,
            );
            path.line_cap = LineCap::Round;
            path.line_join = LineJoin::Round;
            path.dash = if !ctx.eligibility.includes(series_index) {
                Some(StrokeDash::fixed(&EXCLUDED_SERIES_DASH))
            } else {
                ctx.reveal.map(|reveal| {
                    StrokeDash::reveal(reveal.max_line_length(), reveal.value())
                })
            };
            Drawable::Path(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{SeriesSceneContext, build_series_lines};
    use crate::animation::RevealController;
    use crate::api::{Palette, RevealEligibility};
    use crate::core::{Curve, CurvePath, PathCommand};
    use crate::render::{Color, Drawable};

    fn curves(count: usize) -> Vec<Curve> {
        (0..count)
            .map(|index| {
                let y = index as f64;
                Curve {
                    item: Vec::new(),
                    line: CurvePath::from_parts(
                        vec![PathCommand::MoveTo([0.0, y]), PathCommand::LineTo([10.0, y])],
                        vec![[0.0, y], [10.0, y]],
                    ),
                    area: CurvePath::new(),
                }
            })
            .collect()
    }

    fn dashes(lines: &[Drawable]) -> Vec<Option<(Vec<f64>, Option<f64>)>> {
        lines
            .iter()
            .map(|item| match item {
                Drawable::Path(path) => path
                    .dash
                    .as_ref()
                    .map(|dash| (dash.pattern.to_vec(), dash.offset)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn fifth_series_gets_decorative_dash_by_default() {
        let palette = Palette::new([Color::BLACK]).expect("palette");
        let mut reveal = RevealController::default();
        reveal.observe_max_length(10.0);
        let lines = build_series_lines(
            &curves(5),
            SeriesSceneContext {
                palette: &palette,
                stroke_width: 2.0,
                eligibility: &RevealEligibility::default(),
                reveal: Some(&reveal),
            },
        );
        let dashes = dashes(&lines);
        assert_eq!(dashes[3], Some((vec![10.0], Some(10.0))));
        assert_eq!(dashes[4], Some((vec![8.0, 12.0], None)));
    }

    #[test]
    fn static_chart_has_no_reveal_dash() {
        let palette = Palette::new([Color::BLACK]).expect("palette");
        let lines = build_series_lines(
            &curves(2),
            SeriesSceneContext {
                palette: &palette,
                stroke_width: 1.0,
                eligibility: &RevealEligibility::All,
                reveal: None,
            },
        );
        assert_eq!(dashes(&lines), vec![None, None]);
    }
}
