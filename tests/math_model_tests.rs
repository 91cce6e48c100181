use approx::assert_relative_eq;
use dca_viz::core::{convex_surrogate, f, g, h, linear_majorant, subgradient};

#[test]
fn components_at_reference_points() {
    assert_eq!(g(1.5), 2.25);
    assert_eq!(h(-1.5), 1.5);
    assert_eq!(f(1.0), 0.0);
    assert_eq!(f(-2.0), 2.0);
    assert_relative_eq!(f(0.0625), -0.058_593_75, epsilon = 1e-15);
}

#[test]
fn subgradient_follows_sign_with_zero_at_origin() {
    assert_eq!(subgradient(0.0), 0.0);
    assert_eq!(subgradient(1e-300), 1.0);
    assert_eq!(subgradient(-1e-300), -1.0);
    assert_eq!(subgradient(42.0), 1.0);
    assert_eq!(subgradient(-42.0), -1.0);
}

#[test]
fn majorant_at_first_iterate_is_identity_line() {
    // At x0 = 1 the majorant of |x| is x itself.
    for x in [-2.0, -0.5, 0.0, 0.75, 2.0] {
        assert_relative_eq!(linear_majorant(x, 1.0), x, epsilon = 1e-15);
    }
}

#[test]
fn surrogate_minimum_matches_next_iterate() {
    // x² - x is minimized at 0.5, the second step of the walkthrough.
    let at_min = convex_surrogate(0.5, 1.0);
    assert_relative_eq!(at_min, -0.25, epsilon = 1e-15);
    assert!(convex_surrogate(0.45, 1.0) > at_min);
    assert!(convex_surrogate(0.55, 1.0) > at_min);
}

#[test]
fn negative_linearization_point_mirrors_positive_one() {
    assert_relative_eq!(
        linear_majorant(-0.3, -1.0),
        linear_majorant(0.3, 1.0),
        epsilon = 1e-15
    );
    assert_relative_eq!(
        convex_surrogate(-0.3, -1.0),
        convex_surrogate(0.3, 1.0),
        epsilon = 1e-15
    );
}
