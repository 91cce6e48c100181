use crate::error::VizResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless runs.
///
/// It still validates frame content so tests catch invalid geometry without a
/// drawing backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_line_count: usize,
    pub last_polyline_count: usize,
    pub last_text_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> VizResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_line_count = frame.lines.len();
        self.last_polyline_count = frame.polylines.len();
        self.last_text_count = frame.texts.len();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
