use serde::{Deserialize, Serialize};

/// Layers of a line chart scene, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneLayerKind {
    Grid,
    Regions,
    Areas,
    Lines,
    Points,
    Axes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStack {
    pub layers: Vec<SceneLayerKind>,
}

impl LayerStack {
    /// Regions never cover lines and axis decoration always stays on top.
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            layers: vec![
                SceneLayerKind::Grid,
                SceneLayerKind::Regions,
                SceneLayerKind::Areas,
                SceneLayerKind::Lines,
                SceneLayerKind::Points,
                SceneLayerKind::Axes,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LayerStack, SceneLayerKind};

    #[test]
    fn canonical_stack_orders_grid_first_and_axes_last() {
        let stack = LayerStack::canonical();
        assert_eq!(
            stack.layers,
            vec![
                SceneLayerKind::Grid,
                SceneLayerKind::Regions,
                SceneLayerKind::Areas,
                SceneLayerKind::Lines,
                SceneLayerKind::Points,
                SceneLayerKind::Axes,
            ]
        );
    }
}
