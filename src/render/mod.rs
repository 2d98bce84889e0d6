mod layer_stack;
mod null_renderer;
mod primitives;
mod scene;
mod svg_backend;

pub use layer_stack::{LayerStack, SceneLayerKind};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, Drawable, GroupPrimitive, LineCap, LineJoin, LinePrimitive,
    PathPrimitive, RectPrimitive, StrokeDash, TextHAlign, TextPrimitive,
};
pub use scene::{ChartOutput, Scene, SceneLayer};
pub use svg_backend::{SvgRenderStats, SvgRenderer};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully composed `ChartOutput` so drawing code stays
/// isolated from data fitting, overlay resolution and animation timing.
pub trait Renderer {
    fn render(&mut self, output: &ChartOutput) -> ChartResult<()>;
}
