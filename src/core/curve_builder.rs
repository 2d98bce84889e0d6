use tracing::trace;

use crate::core::line_series::{ChartType, ChartTypeInput, CurveSet};
use crate::core::types::DataPoint;
use crate::error::ChartResult;

/// Geometry handed to a chart-type strategy alongside the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveRequest<'a> {
    pub x_key: &'a str,
    pub y_key: &'a str,
    pub width: f64,
    pub height: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Runs `chart_type` over `data` with key-based accessors.
///
/// This is the only call site of [`ChartType::build`]; swapping the strategy
/// never touches scale derivation, overlays or composition.
pub fn build_curves(
    chart_type: &dyn ChartType,
    data: &[DataPoint],
    request: CurveRequest<'_>,
) -> ChartResult<CurveSet> {
    let x_accessor = |point: &DataPoint| point.number(request.x_key);
    let y_accessor = |point: &DataPoint| point.number(request.y_key);

    let input = ChartTypeInput {
        data,
        x_accessor: &x_accessor,
        y_accessor: &y_accessor,
        width: request.width,
        height: request.height,
        closed: false,
        min: request.min,
        max: request.max,
    };
    let curve_set = chart_type.build(&input)?;
    trace!(
        chart_type = ?chart_type,
        records = data.len(),
        curves = curve_set.curves.len(),
        "curves built"
    );
    Ok(curve_set)
}
