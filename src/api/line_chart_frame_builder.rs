use crate::core::{DataPoint, LinearScale, PixelSpan, PlotArea};
use crate::error::{VizError, VizResult};
use crate::render::{
    Color, LinePrimitive, PolylinePrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::axis_ticks::{
    AXIS_X_TARGET_SPACING_PX, AXIS_Y_TARGET_SPACING_PX, axis_tick_target_count, axis_ticks,
    nice_tick_step, tick_label_precision,
};
use super::{AxisPosition, LegendPosition, LineChart, SeriesConfig};

const TITLE_FONT_PX: f64 = 16.0;
const LEGEND_FONT_PX: f64 = 12.0;
const TICK_FONT_PX: f64 = 11.0;
const OUTER_PADDING_PX: f64 = 12.0;
const TITLE_BAND_PX: f64 = 28.0;
const LEGEND_BAND_PX: f64 = 24.0;
const LEFT_MARGIN_PX: f64 = 48.0;
const RIGHT_MARGIN_PX: f64 = 24.0;
const BOTTOM_MARGIN_PX: f64 = 28.0;
const TICK_LENGTH_PX: f64 = 4.0;
const LEGEND_SWATCH_PX: f64 = 28.0;
const LEGEND_GAP_PX: f64 = 16.0;
const AUTOSCALE_PADDING_RATIO: f64 = 0.05;

const AXIS_COLOR: Color = Color::rgb(0.2, 0.2, 0.2);
const GRID_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.08);
const TEXT_COLOR: Color = Color::rgb(0.2, 0.2, 0.2);

impl<R: Renderer> LineChart<R> {
    /// Rectangle the series are drawn into for the current viewport.
    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        let mut top = OUTER_PADDING_PX;
        if self.config.title.is_some() {
            top += TITLE_BAND_PX;
        }
        let mut bottom = BOTTOM_MARGIN_PX;
        if self.config.legend.display {
            match self.config.legend.position {
                LegendPosition::Top => top += LEGEND_BAND_PX,
                LegendPosition::Bottom => bottom += LEGEND_BAND_PX,
            }
        }

        PlotArea {
            left: LEFT_MARGIN_PX,
            top,
            width: f64::from(self.viewport.width) - LEFT_MARGIN_PX - RIGHT_MARGIN_PX,
            height: f64::from(self.viewport.height) - top - bottom,
        }
    }

    /// Y range: the configured one, or the data extent padded on both sides.
    pub fn y_domain(&self) -> VizResult<(f64, f64)> {
        if let Some(range) = self.config.y_axis.range {
            return Ok(range);
        }

        let (min, max) = self
            .series
            .values()
            .flatten()
            .map(|point| point.y)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), y| {
                (min.min(y), max.max(y))
            });
        if !min.is_finite() || !max.is_finite() {
            return Ok((-1.0, 1.0));
        }
        let span = max - min;
        if span <= 0.0 {
            return Ok((min - 1.0, max + 1.0));
        }
        let padding = span * AUTOSCALE_PADDING_RATIO;
        Ok((min - padding, max + padding))
    }

    /// Materializes the pixel-space scene for the current buffers.
    pub fn build_frame(&self) -> VizResult<RenderFrame> {
        let plot = self.plot_area();
        if !plot.is_valid() {
            return Err(VizError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let (x_min, x_max) = self.config.x_axis.range.ok_or_else(|| {
            VizError::InvalidConfig("x axis range must be fixed".to_owned())
        })?;
        let (y_min, y_max) = self.y_domain()?;
        let x_scale = LinearScale::new(x_min, x_max)?;
        let y_scale = LinearScale::new(y_min, y_max)?;
        let x_span = PixelSpan::new(plot.left, plot.right());
        let y_span = PixelSpan::new(plot.bottom(), plot.top);

        let mut frame = RenderFrame::new(self.viewport);

        let x_axis_px = match self.config.x_axis.position {
            AxisPosition::Center if y_scale.contains(0.0) => {
                y_scale.domain_to_pixel(0.0, y_span)?
            }
            _ => plot.bottom(),
        };
        let y_axis_px = match self.config.y_axis.position {
            AxisPosition::Center if x_scale.contains(0.0) => {
                x_scale.domain_to_pixel(0.0, x_span)?
            }
            _ => plot.left,
        };

        let x_tick_count = axis_tick_target_count(plot.width, AXIS_X_TARGET_SPACING_PX, 2, 9);
        let x_step = nice_tick_step(x_max - x_min, x_tick_count);
        let x_precision = tick_label_precision(x_step);
        for value in axis_ticks((x_min, x_max), x_step) {
            let px = x_scale.domain_to_pixel(value, x_span)?;
            frame.lines.push(LinePrimitive::new(
                px,
                plot.top,
                px,
                plot.bottom(),
                1.0,
                GRID_COLOR,
            ));
            frame.lines.push(LinePrimitive::new(
                px,
                x_axis_px - TICK_LENGTH_PX,
                px,
                x_axis_px + TICK_LENGTH_PX,
                1.0,
                AXIS_COLOR,
            ));
            frame.texts.push(TextPrimitive::new(
                format!("{value:.x_precision$}"),
                px,
                x_axis_px + TICK_LENGTH_PX + 2.0,
                TICK_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Center,
            ));
        }

        let y_tick_count = axis_tick_target_count(plot.height, AXIS_Y_TARGET_SPACING_PX, 2, 9);
        let y_step = nice_tick_step(y_max - y_min, y_tick_count);
        let y_precision = tick_label_precision(y_step);
        for value in axis_ticks((y_min, y_max), y_step) {
            let py = y_scale.domain_to_pixel(value, y_span)?;
            frame.lines.push(LinePrimitive::new(
                plot.left,
                py,
                plot.right(),
                py,
                1.0,
                GRID_COLOR,
            ));
            frame.lines.push(LinePrimitive::new(
                y_axis_px - TICK_LENGTH_PX,
                py,
                y_axis_px + TICK_LENGTH_PX,
                py,
                1.0,
                AXIS_COLOR,
            ));
            frame.texts.push(TextPrimitive::new(
                format!("{value:.y_precision$}"),
                y_axis_px - TICK_LENGTH_PX - 2.0,
                py - TICK_FONT_PX * 0.7,
                TICK_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Right,
            ));
        }

        frame.lines.push(LinePrimitive::new(
            plot.left,
            x_axis_px,
            plot.right(),
            x_axis_px,
            1.5,
            AXIS_COLOR,
        ));
        frame.lines.push(LinePrimitive::new(
            y_axis_px,
            plot.top,
            y_axis_px,
            plot.bottom(),
            1.5,
            AXIS_COLOR,
        ));
        if let Some(title) = non_empty(self.config.x_axis.title.as_deref()) {
            frame.texts.push(TextPrimitive::new(
                title,
                plot.right(),
                x_axis_px - TICK_FONT_PX * 2.0,
                TICK_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Right,
            ));
        }
        if let Some(title) = non_empty(self.config.y_axis.title.as_deref()) {
            frame.texts.push(TextPrimitive::new(
                title,
                y_axis_px + TICK_LENGTH_PX + 4.0,
                plot.top,
                TICK_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Left,
            ));
        }

        for series in &self.config.series {
            let Some(points) = self.series.get(&series.id) else {
                continue;
            };
            append_series(&mut frame, series, points, x_scale, y_scale, x_span, y_span)?;
        }

        let mut top = OUTER_PADDING_PX;
        if let Some(title) = non_empty(self.config.title.as_deref()) {
            frame.texts.push(TextPrimitive::new(
                title,
                f64::from(self.viewport.width) / 2.0,
                top,
                TITLE_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Center,
            ));
            top += TITLE_BAND_PX;
        }
        if self.config.legend.display {
            let legend_y = match self.config.legend.position {
                LegendPosition::Top => top,
                LegendPosition::Bottom => f64::from(self.viewport.height) - LEGEND_BAND_PX,
            };
            self.append_legend(&mut frame, legend_y);
        }

        Ok(frame)
    }

    fn append_legend(&self, frame: &mut RenderFrame, top: f64) {
        let entry_widths: Vec<f64> = self
            .config
            .series
            .iter()
            .map(|series| LEGEND_SWATCH_PX + 6.0 + estimate_text_width(&series.label))
            .collect();
        let total_width = entry_widths.iter().sum::<f64>()
            + LEGEND_GAP_PX * entry_widths.len().saturating_sub(1) as f64;

        let mut x = ((f64::from(self.viewport.width) - total_width) / 2.0).max(OUTER_PADDING_PX);
        let swatch_y = top + LEGEND_FONT_PX * 0.6;
        for (series, width) in self.config.series.iter().zip(entry_widths) {
            frame.lines.push(
                LinePrimitive::new(
                    x,
                    swatch_y,
                    x + LEGEND_SWATCH_PX,
                    swatch_y,
                    series.stroke_width.min(4.0),
                    series.color,
                )
                .with_stroke_style(series.stroke_style),
            );
            frame.texts.push(TextPrimitive::new(
                series.label.clone(),
                x + LEGEND_SWATCH_PX + 6.0,
                top,
                LEGEND_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Left,
            ));
            x += width + LEGEND_GAP_PX;
        }
    }
}

fn append_series(
    frame: &mut RenderFrame,
    series: &SeriesConfig,
    points: &[DataPoint],
    x_scale: LinearScale,
    y_scale: LinearScale,
    x_span: PixelSpan,
    y_span: PixelSpan,
) -> VizResult<()> {
    if points.len() < 2 {
        return Ok(());
    }

    let bounds = ClipBounds::new(x_scale.domain(), y_scale.domain());
    let project = |x: f64, y: f64| -> VizResult<(f64, f64)> {
        Ok((
            x_scale.domain_to_pixel(x, x_span)?,
            y_scale.domain_to_pixel(y, y_span)?,
        ))
    };

    if series.show_points {
        let marker = series.stroke_width + 1.0;
        for point in points.iter().filter(|point| bounds.contains(point.x, point.y)) {
            let (x, y) = project(point.x, point.y)?;
            frame.lines.push(LinePrimitive::new(
                x - marker,
                y,
                x + marker,
                y,
                1.0,
                series.color,
            ));
            frame.lines.push(LinePrimitive::new(
                x,
                y - marker,
                x,
                y + marker,
                1.0,
                series.color,
            ));
        }
    }

    // Segments are clipped to the axis ranges; a curve leaving the plot and
    // coming back becomes several polylines.
    let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for pair in points.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let Some(segment) = bounds.clip_segment(from, to) else {
            if current.len() >= 2 {
                runs.push(std::mem::take(&mut current));
            }
            current.clear();
            continue;
        };
        if segment.enters || current.is_empty() {
            if current.len() >= 2 {
                runs.push(std::mem::take(&mut current));
            }
            current.clear();
            current.push(project(segment.start.0, segment.start.1)?);
        }
        current.push(project(segment.end.0, segment.end.1)?);
        if segment.leaves {
            runs.push(std::mem::take(&mut current));
        }
    }
    if current.len() >= 2 {
        runs.push(current);
    }

    for run in runs {
        frame.polylines.push(PolylinePrimitive::new(
            run,
            series.stroke_width,
            series.color,
            series.stroke_style,
        ));
    }
    Ok(())
}

/// Visible part of one segment; `enters` / `leaves` mark a cut start / end.
#[derive(Debug, Clone, Copy)]
struct ClippedSegment {
    start: (f64, f64),
    end: (f64, f64),
    enters: bool,
    leaves: bool,
}

/// Axis-aligned domain rectangle series are clipped against.
#[derive(Debug, Clone, Copy)]
struct ClipBounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl ClipBounds {
    fn new(x_domain: (f64, f64), y_domain: (f64, f64)) -> Self {
        Self {
            x_min: x_domain.0.min(x_domain.1),
            x_max: x_domain.0.max(x_domain.1),
            y_min: y_domain.0.min(y_domain.1),
            y_max: y_domain.0.max(y_domain.1),
        }
    }

    fn contains(self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }

    /// Liang-Barsky clip of `from -> to`; `None` when nothing is visible.
    fn clip_segment(self, from: DataPoint, to: DataPoint) -> Option<ClippedSegment> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let mut t_start = 0.0_f64;
        let mut t_end = 1.0_f64;
        for (p, q) in [
            (-dx, from.x - self.x_min),
            (dx, self.x_max - from.x),
            (-dy, from.y - self.y_min),
            (dy, self.y_max - from.y),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let ratio = q / p;
            if p < 0.0 {
                if ratio > t_end {
                    return None;
                }
                t_start = t_start.max(ratio);
            } else {
                if ratio < t_start {
                    return None;
                }
                t_end = t_end.min(ratio);
            }
        }

        let at = |t: f64| (from.x + t * dx, from.y + t * dy);
        let enters = t_start > 0.0;
        let leaves = t_end < 1.0;
        Some(ClippedSegment {
            start: if enters { at(t_start) } else { (from.x, from.y) },
            end: if leaves { at(t_end) } else { (to.x, to.y) },
            enters,
            leaves,
        })
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.trim().is_empty())
}

fn estimate_text_width(text: &str) -> f64 {
    text.chars().count() as f64 * LEGEND_FONT_PX * 0.6
}

#[cfg(test)]
mod tests {
    use super::ClipBounds;
    use crate::core::DataPoint;

    #[test]
    fn segment_crossing_the_top_is_cut_at_the_boundary() {
        let bounds = ClipBounds::new((-2.0, 2.0), (-1.0, 1.0));
        let segment = bounds
            .clip_segment(DataPoint::new(0.0, 0.0), DataPoint::new(1.0, 2.0))
            .expect("partly visible");
        assert!(!segment.enters);
        assert!(segment.leaves);
        assert_eq!(segment.start, (0.0, 0.0));
        assert_eq!(segment.end, (0.5, 1.0));
    }

    #[test]
    fn segment_outside_is_dropped() {
        let bounds = ClipBounds::new((-2.0, 2.0), (-1.0, 1.0));
        assert!(
            bounds
                .clip_segment(DataPoint::new(-2.0, 3.0), DataPoint::new(2.0, 3.0))
                .is_none()
        );
        assert!(!bounds.contains(0.0, 1.5));
    }
}
