use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{DataPoint, Viewport};
use crate::error::{VizError, VizResult};
use crate::render::Renderer;

use super::{ChartConfig, SeriesId};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Rendering surface the visualization controller pushes curves into.
///
/// Implementations own only the point buffers they are handed; they never
/// read back into controller state.
pub trait ChartSurface {
    /// Replaces the whole point array of a configured series.
    fn replace_series(&mut self, id: SeriesId, points: Vec<DataPoint>) -> VizResult<()>;

    /// Applies pending series changes immediately, without tweening.
    fn redraw(&mut self) -> VizResult<()>;
}

/// Line chart with a fixed declarative configuration and named series buffers.
pub struct LineChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartConfig,
    pub(super) viewport: Viewport,
    pub(super) series: IndexMap<SeriesId, Vec<DataPoint>>,
    redraw_count: u64,
}

impl<R: Renderer> LineChart<R> {
    pub fn new(renderer: R, config: ChartConfig, viewport: Viewport) -> VizResult<Self> {
        if !viewport.is_valid() {
            return Err(VizError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        config.validate()?;

        let series = config
            .series
            .iter()
            .map(|series| (series.id, Vec::new()))
            .collect();
        debug!(
            series_count = config.series.len(),
            width = viewport.width,
            height = viewport.height,
            "line chart created"
        );

        Ok(Self {
            renderer,
            config,
            viewport,
            series,
            redraw_count: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Follows host resizes; the next redraw lays out for the new size.
    pub fn set_viewport(&mut self, viewport: Viewport) -> VizResult<()> {
        if !viewport.is_valid() {
            return Err(VizError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if viewport != self.viewport {
            trace!(
                width = viewport.width,
                height = viewport.height,
                "chart viewport changed"
            );
            self.viewport = viewport;
        }
        Ok(())
    }

    #[must_use]
    pub fn series_points(&self, id: SeriesId) -> Option<&[DataPoint]> {
        self.series.get(&id).map(Vec::as_slice)
    }

    #[must_use]
    pub fn redraw_count(&self) -> u64 {
        self.redraw_count
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Renders the current buffers into an external cairo context.
    ///
    /// Used by GTK draw callbacks; the renderer stays decoupled from GTK.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> VizResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }
}

impl<R: Renderer> ChartSurface for LineChart<R> {
    fn replace_series(&mut self, id: SeriesId, points: Vec<DataPoint>) -> VizResult<()> {
        if points.iter().any(|point| !point.is_finite()) {
            return Err(VizError::InvalidData(format!(
                "series `{id}` contains non-finite points"
            )));
        }
        let buffer = self
            .series
            .get_mut(&id)
            .ok_or(VizError::UnknownSeries(id))?;
        trace!(series = %id, count = points.len(), "replace series");
        *buffer = points;
        Ok(())
    }

    fn redraw(&mut self) -> VizResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)?;
        self.redraw_count += 1;
        trace!(
            redraw_count = self.redraw_count,
            primitives = frame.primitive_count(),
            "chart redrawn"
        );
        Ok(())
    }
}
