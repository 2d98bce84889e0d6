//! line-chart-rs: multi-series line chart geometry.
//!
//! The crate turns a data table plus layout options into backend-agnostic
//! scene primitives (grid, regions, areas, lines, points, axes) and drives a
//! stroke "draw-in" reveal over the lines. Rasterization is left to a
//! [`render::Renderer`] implementation.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use animation::{Easing, RevealController, RevealHandle, RevealPhase, RevealTick};
pub use api::{ChartConfig, LineChart, LineChartOptions};
pub use error::{ChartError, ChartResult};
