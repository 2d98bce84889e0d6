use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::line_series::{Curve, CurveSet};
use crate::core::scale::Scale;
use crate::core::types::Margin;

/// Domain and pixel bounds of one axis.
///
/// Every field is `None` when no series carried a numeric value for the
/// axis key; consumers render nothing for such an axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisArea {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    /// `scale(min_value)`.
    pub min: Option<f64>,
    /// `scale(max_value)`.
    pub max: Option<f64>,
}

impl AxisArea {
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.min_value.is_some() && self.max_value.is_some()
    }

    /// Domain bounds as `(min_value, max_value)` when both exist.
    #[must_use]
    pub fn domain(&self) -> Option<(f64, f64)> {
        Some((self.min_value?, self.max_value?))
    }

    /// Pixel bounds as `(min, max)` when both exist.
    #[must_use]
    pub fn pixels(&self) -> Option<(f64, f64)> {
        Some((self.min?, self.max?))
    }
}

/// Bounding box of the plotted data on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartArea {
    pub x: AxisArea,
    pub y: AxisArea,
    pub margin: Margin,
}

impl ChartArea {
    /// Derives both axes from a fitted curve set. Configured bounds only apply to y.
    #[must_use]
    pub fn derive(
        curve_set: &CurveSet,
        x_key: &str,
        y_key: &str,
        configured_min: Option<f64>,
        configured_max: Option<f64>,
        margin: Margin,
    ) -> Self {
        Self {
            x: derive_axis_area(
                &curve_set.curves,
                x_key,
                curve_set.xscale.as_ref(),
                None,
                None,
            ),
            y: derive_axis_area(
                &curve_set.curves,
                y_key,
                curve_set.yscale.as_ref(),
                configured_min,
                configured_max,
            ),
            margin,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.x.is_defined() || !self.y.is_defined()
    }
}

/// Extremes of `key` across every point of every series, mapped through `scale`.
///
/// `configured_min` can only lower the minimum and `configured_max` can only
/// raise the maximum; neither applies when the data has no value at `key`.
pub fn derive_axis_area(
    curves: &[Curve],
    key: &str,
    scale: &dyn Scale,
    configured_min: Option<f64>,
    configured_max: Option<f64>,
) -> AxisArea {
    let values = curves
        .iter()
        .flat_map(|curve| curve.item.iter())
        .filter_map(|point| point.number(key))
        .map(OrderedFloat);

    let mut extent: Option<(OrderedFloat<f64>, OrderedFloat<f64>)> = None;
    for value in values {
        extent = Some(match extent {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }

    let Some((min, max)) = extent else {
        debug!(key, series = curves.len(), "no numeric values; axis area left undefined");
        return AxisArea::default();
    };

    let mut min_value = min.into_inner();
    let mut max_value = max.into_inner();
    if let Some(configured) = configured_max.filter(|value| value.is_finite()) {
        max_value = max_value.max(configured);
    }
    if let Some(configured) = configured_min.filter(|value| value.is_finite()) {
        min_value = min_value.min(configured);
    }

    AxisArea {
        min_value: Some(min_value),
        max_value: Some(max_value),
        min: Some(scale.apply(min_value)),
        max: Some(scale.apply(max_value)),
    }
}
