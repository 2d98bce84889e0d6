use crate::error::ChartResult;
use crate::render::{ChartOutput, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates scene content so tests catch invalid geometry without
/// a real drawing surface.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_drawable_count: usize,
    pub last_placeholder: Option<String>,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, output: &ChartOutput) -> ChartResult<()> {
        match output {
            ChartOutput::Placeholder(message) => {
                self.last_drawable_count = 0;
                self.last_placeholder = Some(message.clone());
            }
            ChartOutput::Scene(scene) => {
                scene.validate()?;
                self.last_drawable_count = scene.leaf_count();
                self.last_placeholder = None;
            }
        }
        self.frames_rendered += 1;
        Ok(())
    }
}
