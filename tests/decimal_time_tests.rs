use chrono::TimeZone;
use chrono::Utc;
use rust_decimal::Decimal;

use line_chart_rs::core::{CurveRequest, DataPoint, StockLine, build_curves};

#[test]
fn time_fields_are_stored_as_unix_seconds() {
    let time = Utc
        .timestamp_opt(1_700_000_000, 500_000_000)
        .single()
        .expect("valid ts");
    let point = DataPoint::new()
        .with_time("x", time)
        .with_number("y", 1.0);

    assert!((point.number("x").expect("x") - 1_700_000_000.5).abs() <= 1e-6);
}

#[test]
fn decimal_fields_convert_to_f64() {
    let point = DataPoint::new()
        .with_number("x", 0.0)
        .with_decimal("y", Decimal::new(12345, 2))
        .expect("decimal");

    assert!((point.number("y").expect("y") - 123.45).abs() <= 1e-9);
}

#[test]
fn time_and_decimal_records_feed_the_curve_builder() {
    let data: Vec<DataPoint> = (0..3)
        .map(|day| {
            let time = Utc
                .timestamp_opt(1_700_000_000 + day * 86_400, 0)
                .single()
                .expect("valid ts");
            DataPoint::new()
                .with_time("when", time)
                .with_decimal("price", Decimal::new(1000 + day, 1))
                .expect("decimal")
        })
        .collect();

    let set = build_curves(
        &StockLine::default(),
        &data,
        CurveRequest {
            x_key: "when",
            y_key: "price",
            width: 200.0,
            height: 100.0,
            min: None,
            max: None,
        },
    )
    .expect("curves");

    assert_eq!(set.curves[0].line.points().len(), 3);
    assert_eq!(set.curves[0].line.points()[0], [0.0, 100.0]);
    assert_eq!(set.curves[0].line.points()[2], [200.0, 0.0]);
}
