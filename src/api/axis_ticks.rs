pub(super) const AXIS_X_TARGET_SPACING_PX: f64 = 72.0;
pub(super) const AXIS_Y_TARGET_SPACING_PX: f64 = 48.0;

pub(super) fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

/// Smallest "nice" step (1, 2 or 5 times a power of ten) that splits `span`
/// into at most `tick_count - 1` intervals.
pub(super) fn nice_tick_step(span: f64, tick_count: usize) -> f64 {
    if !span.is_finite() || span <= 0.0 || tick_count < 2 {
        return 0.0;
    }

    let raw = span / (tick_count - 1) as f64;
    let exponent = raw.log10().floor() as i32;
    // Divide for negative exponents so steps like 0.5 stay exact.
    let scaled = |factor: f64| {
        if exponent >= 0 {
            factor * 10f64.powi(exponent)
        } else {
            factor / 10f64.powi(-exponent)
        }
    };
    for factor in [1.0, 2.0, 5.0] {
        let step = scaled(factor);
        if step >= raw * (1.0 - 1e-9) {
            return step;
        }
    }
    scaled(10.0)
}

/// Multiples of `step` inside `range`, inclusive.
pub(super) fn axis_ticks(range: (f64, f64), step: f64) -> Vec<f64> {
    if !step.is_finite() || step <= 0.0 || !range.0.is_finite() || !range.1.is_finite() {
        return Vec::new();
    }

    let first = (range.0 / step - 1e-9).ceil() as i64;
    let last = (range.1 / step + 1e-9).floor() as i64;
    (first..=last)
        .map(|index| {
            let value = index as f64 * step;
            // Avoid printing `-0`.
            if value == 0.0 { 0.0 } else { value }
        })
        .collect()
}

/// Decimal places needed to print ticks spaced by `step` without noise.
pub(super) fn tick_label_precision(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()) as usize
}

#[cfg(test)]
mod tests {
    use super::{axis_tick_target_count, axis_ticks, nice_tick_step, tick_label_precision};

    #[test]
    fn target_count_is_clamped() {
        assert_eq!(axis_tick_target_count(0.0, 72.0, 2, 9), 2);
        assert_eq!(axis_tick_target_count(10_000.0, 72.0, 2, 9), 9);
        assert_eq!(axis_tick_target_count(300.0, 72.0, 2, 9), 5);
    }

    #[test]
    fn nice_step_rounds_up_to_one_two_five() {
        assert_eq!(nice_tick_step(4.0, 9), 0.5);
        assert_eq!(nice_tick_step(8.0, 5), 2.0);
        assert_eq!(nice_tick_step(3.0, 4), 1.0);
        assert_eq!(nice_tick_step(0.0, 4), 0.0);
    }

    #[test]
    fn ticks_cover_range_and_include_origin() {
        let ticks = axis_ticks((-2.0, 2.0), 0.5);
        assert_eq!(ticks.len(), 9);
        assert_eq!(ticks.first(), Some(&-2.0));
        assert_eq!(ticks.last(), Some(&2.0));
        assert!(ticks.contains(&0.0));
    }

    #[test]
    fn precision_follows_step_magnitude() {
        assert_eq!(tick_label_precision(2.0), 0);
        assert_eq!(tick_label_precision(0.5), 1);
        assert_eq!(tick_label_precision(0.05), 2);
    }
}
