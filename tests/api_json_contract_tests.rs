use line_chart_rs::api::{
    AreaGate, CHART_CONFIG_JSON_SCHEMA_V1, ChartConfig, ColorOption, LineChartOptions, PointGate,
};

const LEGACY_CONFIG: &str = r##"{
    "width": 400,
    "height": 300,
    "data": [
        { "x": 0, "y": 1, "series": "a" },
        { "x": 1, "y": 3, "series": "a" }
    ],
    "pallete": ["#112233", "#445566"],
    "options": {
        "color": { "color": "#ff8800" },
        "show_areas": false,
        "show_points": true,
        "min": -2
    },
    "regions": [
        { "from": 1, "to": 2, "fill": "#00ff00", "label": "band" }
    ],
    "animatable": true
}"##;

#[test]
fn bare_config_accepts_legacy_palette_spelling() {
    let config = ChartConfig::from_json_compat_str(LEGACY_CONFIG).expect("parse");

    assert_eq!(
        config.palette,
        Some(vec!["#112233".to_owned(), "#445566".to_owned()])
    );
    assert_eq!(
        config.options.color,
        Some(ColorOption::Object {
            color: "#ff8800".to_owned()
        })
    );
    assert_eq!(config.options.show_areas, AreaGate::Never);
    assert_eq!(config.options.show_points, PointGate::Always);
    assert_eq!(config.options.min, Some(-2.0));
    assert_eq!(config.regions.len(), 1);
    assert_eq!(config.regions[0].label.as_deref(), Some("band"));
    assert_eq!(config.x_key, "x");
    assert!(config.animatable);
    assert_eq!(config.data.as_ref().map(Vec::len), Some(2));
}

#[test]
fn missing_options_take_defaults() {
    let config = ChartConfig::from_json_compat_str(r#"{ "width": 10, "height": 20 }"#)
        .expect("parse");
    assert_eq!(config.options, LineChartOptions::default());
    assert!(config.data.is_none());
    assert!(config.regions.is_empty());
}

#[test]
fn v1_contract_round_trips() {
    let config = ChartConfig::from_json_compat_str(LEGACY_CONFIG).expect("parse");
    let json = config.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(&format!("\"schema_version\": {CHART_CONFIG_JSON_SCHEMA_V1}")));

    let restored = ChartConfig::from_json_compat_str(&json).expect("reparse");
    assert_eq!(restored, config);
}

#[test]
fn unknown_schema_version_is_rejected() {
    let json = r#"{ "schema_version": 99, "config": { "width": 10, "height": 20 } }"#;
    assert!(ChartConfig::from_json_compat_str(json).is_err());
}

#[test]
fn predicate_gates_cannot_be_serialized() {
    let options =
        LineChartOptions::default().with_show_points(PointGate::predicate(|_, point| point > 2));
    let config = ChartConfig::new(100.0, 100.0).with_options(options);
    assert!(config.to_json_pretty().is_err());

    let plain = ChartConfig::new(100.0, 100.0);
    assert!(plain.to_json_pretty().is_ok());
}
