mod axis_config;
mod axis_scene_builder;
mod axis_ticks;
mod gate;
mod json_contract;
mod line_chart;
mod options;
mod overlay_builder;
mod palette;
mod resolve;
mod scene_composer;
mod series_scene_builder;

pub use axis_config::{AxisOptions, AxisOrient};
pub use gate::{AreaGate, Gate, PointGate};
pub use json_contract::{CHART_CONFIG_JSON_SCHEMA_V1, ChartConfigJsonContractV1};
pub use line_chart::LineChart;
pub use options::{
    ChartConfig, ColorOption, DEFAULT_NO_DATA_MESSAGE, FontSpec, LabelOffset, LineChartOptions,
    PointRenderer, Region, RegionStyling, RevealEligibility,
};
pub use overlay_builder::{
    AREA_FILL_OPACITY, DEFAULT_REGION_FILL_OPACITY, DEFAULT_REGION_LABEL_LEFT,
    DEFAULT_REGION_LABEL_TOP,
};
pub use palette::{DEFAULT_BASE_COLOR, Palette};
pub use resolve::resolve;
pub use scene_composer::{SceneParts, compose_scene};
pub use series_scene_builder::EXCLUDED_SERIES_DASH;
