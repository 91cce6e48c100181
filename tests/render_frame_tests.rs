use dca_viz::VizError;
use dca_viz::core::Viewport;
use dca_viz::render::{
    Color, LinePrimitive, LineStrokeStyle, NullRenderer, PolylinePrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

fn black() -> Color {
    Color::rgb(0.0, 0.0, 0.0)
}

#[test]
fn null_renderer_records_frame_counts() {
    let frame = RenderFrame::new(Viewport::new(200, 100))
        .with_line(LinePrimitive::new(0.0, 0.0, 10.0, 10.0, 1.0, black()))
        .with_polyline(PolylinePrimitive::new(
            vec![(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)],
            2.0,
            black(),
            LineStrokeStyle::Dashed {
                on_px: 8.0,
                off_px: 4.0,
            },
        ))
        .with_text(TextPrimitive::new(
            "x",
            20.0,
            20.0,
            11.0,
            black(),
            TextHAlign::Left,
        ));
    assert!(!frame.is_empty());

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.render_count, 1);
    assert_eq!(renderer.last_line_count, 1);
    assert_eq!(renderer.last_polyline_count, 1);
    assert_eq!(renderer.last_text_count, 1);
    assert_eq!(renderer.last_frame.as_ref(), Some(&frame));
}

#[test]
fn empty_frame_is_valid() {
    let frame = RenderFrame::new(Viewport::new(10, 10));
    assert!(frame.is_empty());
    frame.validate().expect("empty frame");
}

#[test]
fn invalid_geometry_is_rejected_before_drawing() {
    let mut renderer = NullRenderer::default();

    let bad_line = RenderFrame::new(Viewport::new(100, 100)).with_line(LinePrimitive::new(
        f64::NAN,
        0.0,
        1.0,
        1.0,
        1.0,
        black(),
    ));
    assert!(matches!(
        renderer.render(&bad_line),
        Err(VizError::InvalidData(_))
    ));

    let short_polyline = RenderFrame::new(Viewport::new(100, 100)).with_polyline(
        PolylinePrimitive::new(vec![(1.0, 1.0)], 1.0, black(), LineStrokeStyle::Solid),
    );
    assert!(renderer.render(&short_polyline).is_err());

    let bad_dash = RenderFrame::new(Viewport::new(100, 100)).with_line(
        LinePrimitive::new(0.0, 0.0, 1.0, 1.0, 1.0, black()).with_stroke_style(
            LineStrokeStyle::Dashed {
                on_px: 0.0,
                off_px: 4.0,
            },
        ),
    );
    assert!(renderer.render(&bad_dash).is_err());

    let empty_text = RenderFrame::new(Viewport::new(100, 100)).with_text(TextPrimitive::new(
        "",
        0.0,
        0.0,
        11.0,
        black(),
        TextHAlign::Center,
    ));
    assert!(renderer.render(&empty_text).is_err());

    let zero_viewport = RenderFrame::new(Viewport::new(0, 100));
    assert!(matches!(
        renderer.render(&zero_viewport),
        Err(VizError::InvalidViewport { .. })
    ));

    assert_eq!(renderer.render_count, 0);
}

#[test]
fn colors_outside_unit_range_are_rejected() {
    let frame = RenderFrame::new(Viewport::new(100, 100)).with_line(LinePrimitive::new(
        0.0,
        0.0,
        1.0,
        1.0,
        1.0,
        Color::rgba(0.0, 0.0, 0.0, 1.5),
    ));
    assert!(frame.validate().is_err());
}
