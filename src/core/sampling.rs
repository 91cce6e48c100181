use serde::{Deserialize, Serialize};

use crate::core::dc;

pub const SAMPLE_X_MIN: f64 = -2.0;
pub const SAMPLE_X_MAX: f64 = 2.0;
pub const SAMPLE_STEP: f64 = 0.05;

/// One column of the chart: every curve evaluated at the same `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleCurvePoint {
    pub x: f64,
    pub original: f64,
    pub concave_component: f64,
    pub linear_approx: f64,
    pub convex_surrogate: f64,
}

impl SampleCurvePoint {
    /// Evaluates all four curves at `x`, linearizing `h` at `x0`.
    #[must_use]
    pub fn evaluate(x: f64, x0: f64) -> Self {
        Self {
            x,
            original: dc::f(x),
            concave_component: dc::h(x),
            linear_approx: dc::linear_majorant(x, x0),
            convex_surrogate: dc::convex_surrogate(x, x0),
        }
    }
}

/// Closed, evenly spaced grid over `[start, end]`.
///
/// Positions are computed as `start + index * step`, so the grid does not
/// accumulate floating-point drift and always ends exactly on `end` when the
/// span is a whole number of steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    start: f64,
    end: f64,
    step: f64,
    len: usize,
    index: usize,
}

impl SampleGrid {
    #[must_use]
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        let len = if start.is_finite() && end.is_finite() && step.is_finite() && step > 0.0 {
            if end < start {
                0
            } else {
                // Tolerates the representation error of steps like 0.05.
                ((end - start) / step + 1e-9).floor() as usize + 1
            }
        } else {
            0
        };
        Self {
            start,
            end,
            step,
            len,
            index: 0,
        }
    }

    /// The chart grid: `[-2, 2]` at `0.05`, 81 positions.
    #[must_use]
    pub fn chart_default() -> Self {
        Self::new(SAMPLE_X_MIN, SAMPLE_X_MAX, SAMPLE_STEP)
    }

    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    fn position_at(&self, index: usize) -> f64 {
        let x = self.start + self.step * index as f64;
        x.min(self.end)
    }
}

impl Iterator for SampleGrid {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }
        let x = self.position_at(self.index);
        self.index += 1;
        Some(x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SampleGrid {}

/// Lazily samples all four curves over `grid`, linearized at `x0`.
pub fn sample_curves(grid: SampleGrid, x0: f64) -> impl ExactSizeIterator<Item = SampleCurvePoint> {
    grid.map(move |x| SampleCurvePoint::evaluate(x, x0))
}
