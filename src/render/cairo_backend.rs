use cairo::{Context, Format, ImageSurface, LineCap, LineJoin};
use pango::FontDescription;

use crate::error::{VizError, VizResult};
use crate::render::{Color, LineStrokeStyle, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub polylines_drawn: usize,
    pub texts_drawn: usize,
}

/// Extension trait for renderers that can draw into an external Cairo context
/// (for example a GTK `DrawingArea` draw callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, frame: &RenderFrame)
    -> VizResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Supports offscreen image-surface rendering through `Renderer::render` and
/// in-place rendering on an external context through `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> VizResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(VizError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> VizResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Encodes the offscreen surface as PNG into `writer`.
    pub fn write_png<W: std::io::Write>(&self, writer: &mut W) -> VizResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| VizError::Backend(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> VizResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for line in &frame.lines {
            apply_color(context, line.color);
            apply_stroke_style(context, line.stroke_style);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for polyline in &frame.polylines {
            let Some((&(first_x, first_y), rest)) = polyline.points.split_first() else {
                continue;
            };
            apply_color(context, polyline.color);
            apply_stroke_style(context, polyline.stroke_style);
            context.set_line_width(polyline.stroke_width);
            // Sampled curves bend at every vertex; mitred joins spike at the kink of |x|.
            context.set_line_join(LineJoin::Round);
            context.set_line_cap(LineCap::Round);
            context.move_to(first_x, first_y);
            for &(x, y) in rest {
                context.line_to(x, y);
            }
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
            stats.polylines_drawn += 1;
        }
        apply_stroke_style(context, LineStrokeStyle::Solid);
        context.set_line_join(LineJoin::Miter);
        context.set_line_cap(LineCap::Butt);

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> VizResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> VizResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn apply_stroke_style(context: &Context, style: LineStrokeStyle) {
    match style {
        LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
        LineStrokeStyle::Dashed { on_px, off_px } => context.set_dash(&[on_px, off_px], 0.0),
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> VizError {
    VizError::Backend(format!("{prefix}: {err}"))
}
