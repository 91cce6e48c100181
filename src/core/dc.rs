//! Difference-of-convex split of `f(x) = x² - |x|`.
//!
//! `f = g - h` with `g(x) = x²` and `h(x) = |x|`, both convex. Every function
//! here is total over `f64` and free of shared state.

/// Non-convex objective `x² - |x|`.
#[must_use]
pub fn f(x: f64) -> f64 {
    x * x - x.abs()
}

/// Convex component `x²`.
#[must_use]
pub fn g(x: f64) -> f64 {
    x * x
}

/// Convex component `|x|`, subtracted from `g`.
#[must_use]
pub fn h(x: f64) -> f64 {
    x.abs()
}

/// Subgradient of `|x|` at `x0`.
///
/// At `x0 = 0` any value in `[-1, 1]` is a valid subgradient; this returns `0`.
#[must_use]
pub fn subgradient(x0: f64) -> f64 {
    if x0 > 0.0 {
        1.0
    } else if x0 < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// First-order majorant of `h` taken at `x0`, evaluated at `x`.
#[must_use]
pub fn linear_majorant(x: f64, x0: f64) -> f64 {
    x0.abs() + subgradient(x0) * (x - x0)
}

/// Convex surrogate minimized by one DC iteration linearized at `x0`.
#[must_use]
pub fn convex_surrogate(x: f64, x0: f64) -> f64 {
    g(x) - linear_majorant(x, x0)
}
