pub mod chart_area;
pub mod curve_builder;
pub mod line_series;
pub mod path;
pub mod path_length;
pub mod scale;
pub mod types;

pub use chart_area::{AxisArea, ChartArea, derive_axis_area};
pub use curve_builder::{CurveRequest, build_curves};
pub use line_series::{
    Accessor, ChartType, ChartTypeInput, Curve, CurveSet, SeriesGrouping, SmoothLine, StepLine,
    StockLine,
};
pub use path::{CurvePath, PathCommand, parse_path};
pub use path_length::{commands_length, max_line_length, measure_length};
pub use scale::{LinearScale, Scale};
pub use types::{DataPoint, Margin, Viewport};
