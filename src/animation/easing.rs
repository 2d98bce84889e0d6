use serde::{Deserialize, Serialize};

/// Progress curve applied to the reveal interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    ///
    /// Out-of-range and non-finite input is clamped first.
    #[must_use]
    pub fn apply(self, progress: f64) -> f64 {
        let t = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            1.0
        };
        match self {
            Self::Linear => t,
            Self::EaseInOut => CubicBezier::EASE_IN_OUT.solve(t),
        }
    }
}

/// Unit cubic Bézier timing curve with fixed end points `(0,0)` and `(1,1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    const EASE_IN_OUT: Self = Self {
        x1: 0.42,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };

    const EPSILON: f64 = 1e-7;

    fn sample(p1: f64, p2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    }

    fn sample_derivative(p1: f64, p2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
    }

    /// Finds the curve parameter whose x equals `x`, then returns its y.
    fn solve(self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        // Newton, then bisection if the slope flattens. x(s) is monotonic here.
        let mut s = x;
        for _ in 0..8 {
            let error = Self::sample(self.x1, self.x2, s) - x;
            if error.abs() < Self::EPSILON {
                return Self::sample(self.y1, self.y2, s);
            }
            let slope = Self::sample_derivative(self.x1, self.x2, s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= error / slope;
        }

        let (mut low, mut high) = (0.0_f64, 1.0_f64);
        s = x;
        for _ in 0..64 {
            let value = Self::sample(self.x1, self.x2, s);
            if (value - x).abs() < Self::EPSILON {
                break;
            }
            if value < x {
                low = s;
            } else {
                high = s;
            }
            s = 0.5 * (low + high);
        }
        Self::sample(self.y1, self.y2, s)
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;
    use approx::assert_relative_eq;

    #[test]
    fn ease_in_out_is_symmetric_and_pinned_at_ends() {
        let easing = Easing::EaseInOut;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
        assert_relative_eq!(easing.apply(0.5), 0.5, epsilon = 1e-6);
        assert_relative_eq!(
            easing.apply(0.25) + easing.apply(0.75),
            1.0,
            epsilon = 1e-6
        );
        assert!(easing.apply(0.1) < 0.1);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(Easing::Linear.apply(-3.0), 0.0);
        assert_eq!(Easing::Linear.apply(7.0), 1.0);
        assert_eq!(Easing::EaseInOut.apply(f64::NAN), 1.0);
    }
}
