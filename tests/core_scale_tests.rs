use approx::assert_relative_eq;
use line_chart_rs::core::{LinearScale, Scale};

#[test]
fn affine_scale_hits_pixel_endpoints_exactly() {
    let scale = LinearScale::new((-3.7, 12.9), (480.0, 0.0)).expect("valid scale");

    assert_eq!(scale.apply(-3.7), 480.0);
    assert_eq!(scale.apply(12.9), 0.0);
    assert_eq!(scale.domain(), (-3.7, 12.9));
    assert_eq!(scale.range(), (480.0, 0.0));
}

#[test]
fn scale_round_trip_within_tolerance() {
    let scale = LinearScale::new((10.0, 110.0), (0.0, 1000.0)).expect("valid scale");

    let original = 42.5;
    let px = scale.apply(original);
    assert_relative_eq!(px, 325.0, epsilon = 1e-9);
    assert_relative_eq!(scale.invert(px), original, epsilon = 1e-9);
}

#[test]
fn values_outside_domain_extrapolate() {
    let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0)).expect("valid scale");
    assert_relative_eq!(scale.apply(-5.0), -50.0, epsilon = 1e-9);
    assert_relative_eq!(scale.apply(15.0), 150.0, epsilon = 1e-9);
}
