/// One precomputed DC iterate shown by the visualization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub point: f64,
    pub description: &'static str,
}

impl Step {
    #[must_use]
    pub const fn new(point: f64, description: &'static str) -> Self {
        Self { point, description }
    }
}

/// Fixed iterate table for `f(x) = x² - |x|` starting at `x₀ = 1`.
///
/// This is baked data, not a solver trajectory; values must stay as listed.
pub const DCA_STEPS: [Step; 6] = [
    Step::new(1.0, "Start at x₀ = 1.0"),
    Step::new(0.5, "Minimum of convex approx → x₁ = 0.5"),
    Step::new(0.25, "New minimum → x₂ = 0.25"),
    Step::new(0.125, "Converging → x₃ = 0.125"),
    Step::new(0.0625, "Near optimal → x₄ ≈ 0.06"),
    Step::new(0.0, "Converged to x* = 0 (global minimum!)"),
];

pub const LAST_STEP_INDEX: usize = DCA_STEPS.len() - 1;
