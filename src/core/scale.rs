use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Monotonic mapping from a numeric domain to pixel space.
///
/// Chart-type strategies hand one scale per axis back to the pipeline; every
/// later stage (area derivation, regions, axes) only talks to this trait.
pub trait Scale: fmt::Debug + Send + Sync {
    /// Maps a domain value to a pixel coordinate.
    fn apply(&self, value: f64) -> f64;

    /// Maps a pixel coordinate back to the domain.
    fn invert(&self, pixel: f64) -> f64;

    /// Declared domain bounds as `(start, end)`.
    fn domain(&self) -> (f64, f64);

    /// Pixel range as `(start, end)`.
    fn range(&self) -> (f64, f64);
}

/// Affine scale `[d0, d1] -> [r0, r1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        for value in [domain.0, domain.1, range.0, range.1] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(
                    "scale domain and range must be finite".to_owned(),
                ));
            }
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    fn span(self) -> f64 {
        self.domain_end - self.domain_start
    }
}

impl Scale for LinearScale {
    fn apply(&self, value: f64) -> f64 {
        let span = self.span();
        if span == 0.0 {
            return 0.5 * (self.range_start + self.range_end);
        }
        let t = (value - self.domain_start) / span;
        // Interpolating from both ends keeps `apply(d0) == r0` and `apply(d1) == r1` exact.
        self.range_start * (1.0 - t) + self.range_end * t
    }

    fn invert(&self, pixel: f64) -> f64 {
        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return 0.5 * (self.domain_start + self.domain_end);
        }
        let t = (pixel - self.range_start) / range_span;
        self.domain_start * (1.0 - t) + self.domain_end * t
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }
}
