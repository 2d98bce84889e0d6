use line_chart_rs::api::{ChartConfig, LineChart, LineChartOptions, PointGate, Region};
use line_chart_rs::core::{DataPoint, SeriesGrouping, StockLine};
use line_chart_rs::render::{
    ChartOutput, Drawable, NullRenderer, SceneLayerKind, SvgRenderer,
};

fn data() -> Vec<DataPoint> {
    vec![
        DataPoint::xy(0.0, 1.0).with_text("s", "a"),
        DataPoint::xy(1.0, 4.0).with_text("s", "a"),
        DataPoint::xy(2.0, 2.0).with_text("s", "a"),
        DataPoint::xy(0.0, 3.0).with_text("s", "b"),
        DataPoint::xy(2.0, 5.0).with_text("s", "b"),
    ]
}

fn full_config() -> ChartConfig {
    ChartConfig::new(480.0, 320.0)
        .with_data(data())
        .with_options(LineChartOptions::default().with_show_points(PointGate::Always))
        .with_regions(vec![Region::new(1.0, 2.0).with_label("band")])
}

fn by_series() -> Box<StockLine> {
    Box::new(StockLine::new(SeriesGrouping::ByKey("s".to_owned())))
}

#[test]
fn layers_paint_in_canonical_order() {
    let mut chart = LineChart::new(NullRenderer::default(), full_config())
        .expect("chart init")
        .with_chart_type(by_series());
    let scene = chart
        .build_output()
        .expect("build output")
        .into_scene()
        .expect("scene");

    let order: Vec<SceneLayerKind> = scene
        .layers
        .iter()
        .filter(|layer| !layer.items.is_empty())
        .map(|layer| layer.kind)
        .collect();
    assert_eq!(
        order,
        vec![
            SceneLayerKind::Grid,
            SceneLayerKind::Regions,
            SceneLayerKind::Areas,
            SceneLayerKind::Lines,
            SceneLayerKind::Points,
            SceneLayerKind::Axes,
        ]
    );
    assert_eq!(scene.origin, [40.0, 20.0]);
    assert_eq!(scene.viewport.width, 480.0);
}

#[test]
fn absent_data_renders_default_placeholder() {
    let mut chart =
        LineChart::new(NullRenderer::default(), ChartConfig::new(200.0, 100.0)).expect("init");
    chart.render().expect("render");

    assert_eq!(
        chart.renderer().last_placeholder.as_deref(),
        Some("No data available")
    );
    assert_eq!(chart.renderer().frames_rendered, 1);
}

#[test]
fn custom_placeholder_message_is_used() {
    let config = ChartConfig::new(200.0, 100.0).with_no_data_message("Loading");
    let mut chart = LineChart::new(NullRenderer::default(), config).expect("init");

    let output = chart.build_output().expect("build output");
    assert_eq!(output, ChartOutput::Placeholder("Loading".to_owned()));
}

#[test]
fn null_renderer_counts_leaf_drawables() {
    let mut chart = LineChart::new(NullRenderer::default(), full_config())
        .expect("chart init")
        .with_chart_type(by_series());
    chart.render().expect("render");

    let scene = chart
        .build_output()
        .expect("build output")
        .into_scene()
        .expect("scene");
    assert_eq!(chart.renderer().last_drawable_count, scene.leaf_count());
    assert!(chart.renderer().last_placeholder.is_none());
}

#[test]
fn svg_output_carries_reveal_dash() {
    let config = full_config().with_animatable(true);
    let mut chart = LineChart::new(SvgRenderer::new(), config)
        .expect("chart init")
        .with_chart_type(by_series());
    chart.render().expect("render");

    let max = chart.reveal().max_line_length();
    let document = chart.renderer().document();
    assert!(document.starts_with("<svg"));
    assert!(document.contains(&format!(r#"stroke-dasharray="{max}""#)));
    assert!(document.contains(&format!(r#"stroke-dashoffset="{max}""#)));

    let stats = chart.renderer().last_stats();
    assert_eq!(stats.circles_drawn, 5);
    assert!(stats.texts_drawn >= 1);
}

#[test]
fn region_labels_are_text_inside_region_groups() {
    let mut chart = LineChart::new(NullRenderer::default(), full_config())
        .expect("chart init")
        .with_chart_type(by_series());
    let scene = chart
        .build_output()
        .expect("build output")
        .into_scene()
        .expect("scene");

    let label = scene
        .layer(SceneLayerKind::Regions)
        .iter()
        .find_map(|item| match item {
            Drawable::Group(group) => group.children.iter().find_map(|child| match child {
                Drawable::Text(text) => Some(text.text.clone()),
                _ => None,
            }),
            _ => None,
        });
    assert_eq!(label.as_deref(), Some("band"));
}
