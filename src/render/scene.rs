use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

use super::{Drawable, LayerStack, SceneLayerKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayer {
    pub kind: SceneLayerKind,
    pub items: Vec<Drawable>,
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Layers are kept in stack order; `origin` is the plot-area translation
/// (left/top margin) applied to every layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub viewport: Viewport,
    pub origin: [f64; 2],
    pub layers: Vec<SceneLayer>,
}

impl Scene {
    #[must_use]
    pub fn from_stack(viewport: Viewport, origin: [f64; 2], stack: LayerStack) -> Self {
        let layers = stack
            .layers
            .into_iter()
            .map(|kind| SceneLayer {
                kind,
                items: Vec::new(),
            })
            .collect();
        Self {
            viewport,
            origin,
            layers,
        }
    }

    pub fn push(&mut self, kind: SceneLayerKind, item: Drawable) {
        if let Some(layer) = self.layers.iter_mut().find(|layer| layer.kind == kind) {
            layer.items.push(item);
        }
    }

    pub fn extend(&mut self, kind: SceneLayerKind, items: impl IntoIterator<Item = Drawable>) {
        if let Some(layer) = self.layers.iter_mut().find(|layer| layer.kind == kind) {
            layer.items.extend(items);
        }
    }

    #[must_use]
    pub fn layer(&self, kind: SceneLayerKind) -> &[Drawable] {
        self.layers
            .iter()
            .find(|layer| layer.kind == kind)
            .map(|layer| layer.items.as_slice())
            .unwrap_or_default()
    }

    /// All drawables, bottom to top.
    pub fn drawables(&self) -> impl Iterator<Item = &Drawable> {
        self.layers.iter().flat_map(|layer| layer.items.iter())
    }

    /// Rebinds every reveal-bound dash offset to `remaining`.
    ///
    /// Lets hosts advance the reveal animation per frame without recomputing
    /// geometry.
    pub fn apply_reveal(&mut self, remaining: f64) {
        for layer in &mut self.layers {
            if layer.kind != SceneLayerKind::Lines {
                continue;
            }
            for item in &mut layer.items {
                let Drawable::Path(path) = item else {
                    continue;
                };
                if let Some(dash) = path.dash.as_mut().filter(|dash| dash.reveal_bound) {
                    dash.offset = Some(remaining);
                }
            }
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.drawables().try_for_each(Drawable::validate)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.items.is_empty())
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.drawables().map(Drawable::leaf_count).sum()
    }
}

/// What a render pass produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartOutput {
    /// No data was supplied; the host shows this message instead of a chart.
    Placeholder(String),
    Scene(Scene),
}

impl ChartOutput {
    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        match self {
            Self::Scene(scene) => Some(scene),
            Self::Placeholder(_) => None,
        }
    }

    #[must_use]
    pub fn into_scene(self) -> Option<Scene> {
        match self {
            Self::Scene(scene) => Some(scene),
            Self::Placeholder(_) => None,
        }
    }
}
