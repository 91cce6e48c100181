use approx::assert_relative_eq;
use dca_viz::core::{LinearScale, PixelSpan};

#[test]
fn linear_scale_round_trip() {
    let scale = LinearScale::new(-2.0, 2.0).expect("valid scale");
    let span = PixelSpan::new(48.0, 936.0);

    let px = scale.domain_to_pixel(0.0, span).expect("to pixel");
    assert_relative_eq!(px, 492.0);
    let back = scale.pixel_to_domain(px, span).expect("from pixel");
    assert_relative_eq!(back, 0.0, epsilon = 1e-12);
    assert_eq!(scale.domain(), (-2.0, 2.0));
}

#[test]
fn inverted_span_puts_larger_values_higher() {
    let scale = LinearScale::new(-2.4, 6.4).expect("valid scale");
    let span = PixelSpan::new(572.0, 64.0);

    let low = scale.domain_to_pixel(-2.0, span).expect("low");
    let high = scale.domain_to_pixel(6.0, span).expect("high");
    assert!(high < low);
    assert_relative_eq!(
        scale.domain_to_pixel(-2.4, span).expect("bottom"),
        572.0,
        epsilon = 1e-9
    );
}

#[test]
fn contains_is_inclusive_and_order_independent() {
    let scale = LinearScale::new(2.0, -2.0).expect("reversed domain");
    assert!(scale.contains(-2.0));
    assert!(scale.contains(0.0));
    assert!(scale.contains(2.0));
    assert!(!scale.contains(2.01));
}

#[test]
fn invalid_inputs_are_rejected() {
    assert!(LinearScale::new(1.0, 1.0).is_err());
    assert!(LinearScale::new(f64::NAN, 1.0).is_err());

    let scale = LinearScale::new(0.0, 1.0).expect("valid scale");
    assert!(scale.domain_to_pixel(0.5, PixelSpan::new(10.0, 10.0)).is_err());
    assert!(
        scale
            .domain_to_pixel(f64::INFINITY, PixelSpan::new(0.0, 10.0))
            .is_err()
    );
    assert!(
        scale
            .pixel_to_domain(f64::NAN, PixelSpan::new(0.0, 10.0))
            .is_err()
    );
}
