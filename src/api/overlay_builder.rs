use tracing::{trace, warn};

use crate::core::{ChartArea, Curve, Scale};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, Drawable, GroupPrimitive, PathPrimitive, RectPrimitive, TextHAlign,
};

use super::resolve::{color_or, opacity_or, resolve};
use super::{AreaGate, FontSpec, Palette, PointGate, PointRenderer, Region, RegionStyling};

pub const DEFAULT_REGION_FILL_OPACITY: f64 = 0.5;
pub const DEFAULT_REGION_LABEL_LEFT: f64 = 20.0;
pub const DEFAULT_REGION_LABEL_TOP: f64 = 0.0;
pub const AREA_FILL_OPACITY: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
pub(super) struct PointOverlayContext<'a> {
    pub gate: &'a PointGate,
    pub render_point: Option<&'a PointRenderer>,
    pub point_radius: f64,
    pub palette: &'a Palette,
}

/// One translated group per visible point, in series then point order.
pub(super) fn build_point_markers(curves: &[Curve], ctx: PointOverlayContext<'_>) -> Vec<Drawable> {
    if ctx.gate.is_never() {
        return Vec::new();
    }

    let mut markers = Vec::new();
    for (series_index, curve) in curves.iter().enumerate() {
        for (point_index, point) in curve.line.points().iter().enumerate() {
            if !ctx.gate.allows(series_index, point_index) {
                continue;
            }
            let content = match ctx.render_point {
                Some(renderer) => renderer.render(series_index, point_index),
                None => Drawable::Circle(CirclePrimitive::new(
                    0.0,
                    0.0,
                    ctx.point_radius,
                    ctx.palette.color(series_index),
                    1.0,
                )),
            };
            markers.push(Drawable::Group(GroupPrimitive::new(
                point[0],
                point[1],
                vec![content],
            )));
        }
    }
    trace!(markers = markers.len(), "point markers built");
    markers
}

/// Filled area per series the gate admits; `Never` yields nothing.
pub(super) fn build_areas(curves: &[Curve], gate: &AreaGate, palette: &Palette) -> Vec<Drawable> {
    if gate.is_never() {
        return Vec::new();
    }
    curves
        .iter()
        .enumerate()
        .filter(|(series_index, curve)| gate.allows(curve, *series_index))
        .map(|(series_index, curve)| {
            Drawable::Path(PathPrimitive::filled(
                curve.area.print(),
                palette.color(series_index),
                AREA_FILL_OPACITY,
            ))
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub(super) struct RegionOverlayContext<'a> {
    pub chart_area: &'a ChartArea,
    pub yscale: &'a dyn Scale,
    pub styling: &'a RegionStyling,
    pub label_font: &'a FontSpec,
}

/// Background band plus optional label for every region.
///
/// Bands start at `x = 0` and span to the pixel position of the largest x
/// value. Nothing is emitted while the x extent is undefined.
pub(super) fn build_regions(
    regions: &[Region],
    ctx: RegionOverlayContext<'_>,
) -> ChartResult<Vec<Drawable>> {
    let Some(width) = ctx.chart_area.x.max else {
        if !regions.is_empty() {
            trace!(regions = regions.len(), "x extent undefined; regions skipped");
        }
        return Ok(Vec::new());
    };

    let group_offset = ctx.styling.label_offset.unwrap_or_default();
    let mut items = Vec::with_capacity(regions.len());
    for region in regions {
        let offset = region.label_offset.unwrap_or_default();
        let label_left = resolve(offset.left, group_offset.left, DEFAULT_REGION_LABEL_LEFT);
        let label_top = resolve(offset.top, group_offset.top, DEFAULT_REGION_LABEL_TOP);
        let fill_opacity = opacity_or(
            resolve(
                region.fill_opacity,
                ctx.styling.fill_opacity,
                DEFAULT_REGION_FILL_OPACITY,
            ),
            DEFAULT_REGION_FILL_OPACITY,
        );

        let y1 = ctx.yscale.apply(region.from);
        let y2 = ctx.yscale.apply(region.to);
        let height = y2 - y1;
        if height < 0.0 {
            warn!(
                from = region.from,
                to = region.to,
                height,
                "region bounds are inverted in pixel space; band drawn with negative height"
            );
        }

        let fill = region
            .fill
            .as_deref()
            .map_or(Color::BLACK, |hex| color_or(hex, Color::BLACK, "region.fill"));
        let mut children = vec![Drawable::Rect(RectPrimitive::new(
            0.0,
            y1,
            width,
            height,
            fill,
            fill_opacity,
        ))];
        if let Some(label) = region.label.as_deref().filter(|label| !label.is_empty()) {
            children.push(Drawable::Text(ctx.label_font.text(
                label,
                label_left,
                y2 + label_top,
                TextHAlign::Center,
            )));
        }
        items.push(Drawable::Group(GroupPrimitive::new(0.0, 0.0, children)));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::{
        PointOverlayContext, RegionOverlayContext, build_areas, build_point_markers,
        build_regions,
    };
    use crate::api::{
        AreaGate, FontSpec, LabelOffset, Palette, PointGate, Region, RegionStyling,
    };
    use crate::core::{AxisArea, ChartArea, Curve, CurvePath, LinearScale, Margin};
    use crate::render::{Color, Drawable};

    fn curve(points: &[[f64; 2]]) -> Curve {
        let mut line = CurvePath::new();
        for point in points {
            line.push_point(*point);
        }
        Curve {
            item: Vec::new(),
            line,
            area: CurvePath::new(),
        }
    }

    fn palette() -> Palette {
        Palette::new([Color::BLACK, Color::WHITE]).expect("palette")
    }

    #[test]
    fn markers_are_translated_to_their_point() {
        let curves = vec![curve(&[[1.0, 2.0], [3.0, 4.0]])];
        let palette = palette();
        let markers = build_point_markers(
            &curves,
            PointOverlayContext {
                gate: &PointGate::Always,
                render_point: None,
                point_radius: 5.0,
                palette: &palette,
            },
        );
        assert_eq!(markers.len(), 2);
        let Drawable::Group(group) = &markers[1] else {
            panic!("marker should be a group");
        };
        assert_eq!((group.translate_x, group.translate_y), (3.0, 4.0));
        let Drawable::Circle(circle) = &group.children[0] else {
            panic!("default marker should be a circle");
        };
        assert_eq!(circle.radius, 5.0);
        assert_eq!(circle.fill_opacity, 1.0);
    }

    #[test]
    fn area_predicate_sees_series_index() {
        let curves = vec![curve(&[[0.0, 0.0]]), curve(&[[0.0, 0.0]])];
        let gate = AreaGate::predicate(|_, index| index == 1);
        let areas = build_areas(&curves, &gate, &palette());
        assert_eq!(areas.len(), 1);
        let Drawable::Path(path) = &areas[0] else {
            panic!("area should be a path");
        };
        assert_eq!(path.fill, Some(Color::WHITE));
        assert_eq!(path.stroke, None);
    }

    #[test]
    fn region_label_offset_resolves_per_field() {
        let chart_area = ChartArea {
            x: AxisArea {
                min_value: Some(0.0),
                max_value: Some(10.0),
                min: Some(0.0),
                max: Some(200.0),
            },
            y: AxisArea::default(),
            margin: Margin::default(),
        };
        let yscale = LinearScale::new((0.0, 100.0), (100.0, 0.0)).expect("scale");
        let styling = RegionStyling {
            fill_opacity: None,
            label_offset: Some(LabelOffset {
                left: Some(7.0),
                top: Some(3.0),
            }),
        };
        let regions = vec![
            Region::new(10.0, 40.0)
                .with_label("band")
                .with_label_offset(LabelOffset {
                    left: None,
                    top: Some(-2.0),
                }),
        ];
        let items = build_regions(
            &regions,
            RegionOverlayContext {
                chart_area: &chart_area,
                yscale: &yscale,
                styling: &styling,
                label_font: &FontSpec::default(),
            },
        )
        .expect("regions");

        let Drawable::Group(group) = &items[0] else {
            panic!("region should be a group");
        };
        let Drawable::Rect(rect) = &group.children[0] else {
            panic!("first child should be the band");
        };
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (0.0, 90.0, 200.0, -30.0));
        let Drawable::Text(label) = &group.children[1] else {
            panic!("second child should be the label");
        };
        assert_eq!((label.x, label.y), (7.0, 58.0));
    }
}
