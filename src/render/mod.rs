mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, LineStrokeStyle, PolylinePrimitive, TextHAlign, TextPrimitive,
};

use crate::error::VizResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` in pixel space and only
/// draw it; chart and controller logic never reach into the backend.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> VizResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
