use crate::core::Viewport;
use crate::error::{VizError, VizResult};
use crate::render::{LinePrimitive, PolylinePrimitive, TextPrimitive};

/// Pixel-space scene for one chart draw pass.
///
/// Draw order is fixed: lines (grid, ticks, axes, legend swatches), then
/// series polylines, then texts on top.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub lines: Vec<LinePrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: Vec::new(),
            polylines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_polyline(mut self, polyline: PolylinePrimitive) -> Self {
        self.polylines.push(polyline);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.lines.len() + self.polylines.len() + self.texts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }

    /// Checks every primitive; the error names the first offending one.
    pub fn validate(&self) -> VizResult<()> {
        if !self.viewport.is_valid() {
            return Err(VizError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let located = |kind: &str, index: usize, err: VizError| match err {
            VizError::InvalidData(message) => {
                VizError::InvalidData(format!("{kind} #{index}: {message}"))
            }
            other => other,
        };
        for (index, line) in self.lines.iter().enumerate() {
            line.validate().map_err(|err| located("line", index, err))?;
        }
        for (index, polyline) in self.polylines.iter().enumerate() {
            polyline
                .validate()
                .map_err(|err| located("polyline", index, err))?;
        }
        for (index, text) in self.texts.iter().enumerate() {
            text.validate().map_err(|err| located("text", index, err))?;
        }
        Ok(())
    }
}
