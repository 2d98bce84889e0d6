use crate::core::Viewport;
use crate::render::{Drawable, LayerStack, Scene, SceneLayerKind};

/// Geometry of every layer, ready for assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneParts {
    pub grid: Vec<Drawable>,
    pub regions: Vec<Drawable>,
    pub areas: Vec<Drawable>,
    pub lines: Vec<Drawable>,
    pub points: Vec<Drawable>,
    pub axes: Vec<Drawable>,
}

/// Places each part in its canonical layer. No geometry is computed here.
#[must_use]
pub fn compose_scene(viewport: Viewport, origin: [f64; 2], parts: SceneParts) -> Scene {
    let mut scene = Scene::from_stack(viewport, origin, LayerStack::canonical());
    let SceneParts {
        grid,
        regions,
        areas,
        lines,
        points,
        axes,
    } = parts;
    scene.extend(SceneLayerKind::Grid, grid);
    scene.extend(SceneLayerKind::Regions, regions);
    scene.extend(SceneLayerKind::Areas, areas);
    scene.extend(SceneLayerKind::Lines, lines);
    scene.extend(SceneLayerKind::Points, points);
    scene.extend(SceneLayerKind::Axes, axes);
    scene
}
