use std::f64::consts::PI;

use ordered_float::OrderedFloat;

use crate::core::line_series::Curve;
use crate::core::path::{PathCommand, parse_path};
use crate::error::ChartResult;

/// Five-point Gauss-Legendre nodes on `[-1, 1]`.
const GAUSS_NODES: [f64; 5] = [
    0.0,
    -0.538_469_310_105_683_1,
    0.538_469_310_105_683_1,
    -0.906_179_845_938_664,
    0.906_179_845_938_664,
];
const GAUSS_WEIGHTS: [f64; 5] = [
    0.568_888_888_888_888_9,
    0.478_628_670_499_366_5,
    0.478_628_670_499_366_5,
    0.236_926_885_056_189_1,
    0.236_926_885_056_189_1,
];
/// Sub-intervals used by the composite quadrature for curved segments.
const QUADRATURE_PANELS: usize = 16;

/// Total traversal length of SVG path data.
pub fn measure_length(path: &str) -> ChartResult<f64> {
    let commands = parse_path(path)?;
    Ok(commands_length(&commands))
}

/// Total traversal length of already-parsed absolute commands.
#[must_use]
pub fn commands_length(commands: &[PathCommand]) -> f64 {
    let mut total = 0.0;
    let mut current = [0.0, 0.0];
    let mut subpath_start = [0.0, 0.0];

    for command in commands {
        let segment = match *command {
            PathCommand::MoveTo(to) => {
                subpath_start = to;
                current = to;
                continue;
            }
            PathCommand::LineTo(to) => distance(current, to),
            PathCommand::QuadTo { control, to } => integrate(
                |t| {
                    let mt = 1.0 - t;
                    let dx = 2.0 * mt * (control[0] - current[0]) + 2.0 * t * (to[0] - control[0]);
                    let dy = 2.0 * mt * (control[1] - current[1]) + 2.0 * t * (to[1] - control[1]);
                    dx.hypot(dy)
                },
                0.0,
                1.0,
            ),
            PathCommand::CubicTo {
                control1,
                control2,
                to,
            } => integrate(
                |t| {
                    let mt = 1.0 - t;
                    let a = 3.0 * mt * mt;
                    let b = 6.0 * mt * t;
                    let c = 3.0 * t * t;
                    let dx = a * (control1[0] - current[0])
                        + b * (control2[0] - control1[0])
                        + c * (to[0] - control2[0]);
                    let dy = a * (control1[1] - current[1])
                        + b * (control2[1] - control1[1])
                        + c * (to[1] - control2[1]);
                    dx.hypot(dy)
                },
                0.0,
                1.0,
            ),
            PathCommand::ArcTo {
                radii,
                x_axis_rotation_deg,
                large_arc,
                sweep,
                to,
            } => arc_length(current, radii, x_axis_rotation_deg, large_arc, sweep, to),
            PathCommand::Close => {
                total += distance(current, subpath_start);
                current = subpath_start;
                continue;
            }
        };

        total += segment;
        if let Some(to) = command.end_point() {
            current = to;
        }
    }

    total
}

/// Longest printed line path across all curves; `0.0` when there are none.
pub fn max_line_length(curves: &[Curve]) -> ChartResult<f64> {
    let mut longest = OrderedFloat(0.0);
    for curve in curves {
        longest = longest.max(OrderedFloat(measure_length(&curve.line.print())?));
    }
    Ok(longest.into_inner())
}

fn distance(from: [f64; 2], to: [f64; 2]) -> f64 {
    (to[0] - from[0]).hypot(to[1] - from[1])
}

fn integrate(speed: impl Fn(f64) -> f64, start: f64, end: f64) -> f64 {
    let panel = (end - start) / QUADRATURE_PANELS as f64;
    let half = 0.5 * panel;
    let mut sum = 0.0;
    for index in 0..QUADRATURE_PANELS {
        let mid = start + (index as f64 + 0.5) * panel;
        for (node, weight) in GAUSS_NODES.iter().zip(GAUSS_WEIGHTS) {
            sum += weight * speed(mid + half * node);
        }
    }
    sum * half
}

/// Elliptical arc length using the endpoint-to-center conversion of SVG 1.1 (F.6.5).
fn arc_length(
    from: [f64; 2],
    radii: [f64; 2],
    x_axis_rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
    to: [f64; 2],
) -> f64 {
    if from == to {
        return 0.0;
    }
    let mut rx = radii[0].abs();
    let mut ry = radii[1].abs();
    if rx == 0.0 || ry == 0.0 {
        return distance(from, to);
    }

    let phi = x_axis_rotation_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let half_dx = 0.5 * (from[0] - to[0]);
    let half_dy = 0.5 * (from[1] - to[1]);
    let x1 = cos_phi * half_dx + sin_phi * half_dy;
    let y1 = -sin_phi * half_dx + cos_phi * half_dy;

    let lambda = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
    if lambda > 1.0 {
        let grow = lambda.sqrt();
        rx *= grow;
        ry *= grow;
    }

    let numerator = rx * rx * ry * ry - rx * rx * y1 * y1 - ry * ry * x1 * x1;
    let denominator = rx * rx * y1 * y1 + ry * ry * x1 * x1;
    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let coefficient = sign * (numerator / denominator).max(0.0).sqrt();
    let cx = coefficient * rx * y1 / ry;
    let cy = -coefficient * ry * x1 / rx;

    let start_vec = [(x1 - cx) / rx, (y1 - cy) / ry];
    let end_vec = [(-x1 - cx) / rx, (-y1 - cy) / ry];
    let theta_start = vector_angle([1.0, 0.0], start_vec);
    let mut delta = vector_angle(start_vec, end_vec);
    if !sweep && delta > 0.0 {
        delta -= 2.0 * PI;
    } else if sweep && delta < 0.0 {
        delta += 2.0 * PI;
    }

    let (lo, hi) = if delta >= 0.0 {
        (theta_start, theta_start + delta)
    } else {
        (theta_start + delta, theta_start)
    };
    integrate(
        |theta| {
            let (sin_t, cos_t) = f64::sin_cos(theta);
            (rx * sin_t).hypot(ry * cos_t)
        },
        lo,
        hi,
    )
}

fn vector_angle(u: [f64; 2], v: [f64; 2]) -> f64 {
    let cross = u[0] * v[1] - u[1] * v[0];
    let dot = u[0] * v[0] + u[1] * v[1];
    cross.atan2(dot)
}
