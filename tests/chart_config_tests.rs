use approx::assert_relative_eq;
use dca_viz::VizError;
use dca_viz::api::{
    AxisPosition, ChartConfig, ChartKind, LegendPosition, SeriesConfig, SeriesId,
};
use dca_viz::core::{SAMPLE_X_MAX, SAMPLE_X_MIN};
use dca_viz::render::{Color, LineStrokeStyle};

#[test]
fn default_config_describes_four_styled_curves() {
    let config = ChartConfig::dca_default();
    config.validate().expect("default config is valid");

    assert_eq!(config.kind, ChartKind::Line);
    assert_eq!(
        config.title.as_deref(),
        Some("DCA Visualization: f(x) = x² - |x|")
    );
    let ids: Vec<SeriesId> = config.series.iter().map(|series| series.id).collect();
    assert_eq!(ids, SeriesId::ALL.to_vec());

    let original = config.series_config(SeriesId::Original).expect("original");
    assert_eq!(original.label, "f(x) = x² - |x| [NON-CONVEX]");
    assert_eq!(original.stroke_width, 4.0);
    assert_eq!(original.stroke_style, LineStrokeStyle::Solid);
    assert_eq!(original.color, Color::from_hex("#e74c3c").expect("hex"));

    let concave = config
        .series_config(SeriesId::ConcaveComponent)
        .expect("concave");
    assert_eq!(
        concave.stroke_style,
        LineStrokeStyle::Dashed {
            on_px: 8.0,
            off_px: 4.0
        }
    );
    let linear = config
        .series_config(SeriesId::LinearApprox)
        .expect("linear");
    assert_eq!(
        linear.stroke_style,
        LineStrokeStyle::Dashed {
            on_px: 10.0,
            off_px: 5.0
        }
    );
    assert!(config.series.iter().all(|series| !series.show_points));
    assert!(config.series.iter().all(|series| series.tension == 0.0));

    assert_eq!(config.x_axis.range, Some((SAMPLE_X_MIN, SAMPLE_X_MAX)));
    assert_eq!(config.x_axis.position, AxisPosition::Center);
    assert_eq!(config.y_axis.range, None);
    assert_eq!(config.y_axis.title.as_deref(), Some("f(x)"));
    assert!(config.legend.display);
    assert_eq!(config.legend.position, LegendPosition::Top);
}

#[test]
fn rejects_more_than_four_series() {
    let mut config = ChartConfig::dca_default();
    let extra = config.series[0].clone();
    config.series.push(extra);
    assert!(matches!(config.validate(), Err(VizError::InvalidConfig(_))));
}

#[test]
fn rejects_duplicate_series_ids() {
    let mut config = ChartConfig::dca_default();
    config.series[1].id = SeriesId::Original;
    let err = config.validate().expect_err("duplicate ids");
    assert!(err.to_string().contains("configured twice"));
}

#[test]
fn rejects_smoothing_and_bad_strokes() {
    let mut config = ChartConfig::dca_default();
    config.series[0].tension = 0.4;
    assert!(config.validate().is_err());

    let mut config = ChartConfig::dca_default();
    config.series[2].stroke_width = 0.0;
    assert!(config.validate().is_err());

    let mut config = ChartConfig::dca_default();
    config.series[3] = SeriesConfig::new(
        SeriesId::ConvexSurrogate,
        "Convex Approximation",
        Color::rgb(0.1, 0.6, 0.3),
        3.0,
    )
    .with_dash(0.0, 2.0);
    assert!(config.validate().is_err());
}

#[test]
fn rejects_unbounded_or_inverted_axes() {
    let mut config = ChartConfig::dca_default();
    config.x_axis.range = None;
    assert!(config.validate().is_err());

    let mut config = ChartConfig::dca_default();
    config.y_axis.range = Some((3.0, -1.0));
    assert!(config.validate().is_err());
}

#[test]
fn json_contract_round_trips() {
    let config = ChartConfig::dca_default();
    let json = config.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains("\"schema_version\": 1"));
    assert!(json.contains("\"concave_component\""));

    let parsed = ChartConfig::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed.series.len(), 4);
    for (left, right) in config.series.iter().zip(&parsed.series) {
        assert_eq!(left.id, right.id);
        assert_eq!(left.label, right.label);
        assert_eq!(left.stroke_style, right.stroke_style);
        assert_relative_eq!(left.color.red, right.color.red, epsilon = 1e-12);
        assert_relative_eq!(left.color.green, right.color.green, epsilon = 1e-12);
        assert_relative_eq!(left.color.blue, right.color.blue, epsilon = 1e-12);
    }
    assert_eq!(parsed.x_axis.range, config.x_axis.range);
}

#[test]
fn json_compat_accepts_bare_config_and_rejects_unknown_schema() {
    let bare = serde_json::to_string(&ChartConfig::dca_default()).expect("bare json");
    ChartConfig::from_json_compat_str(&bare).expect("bare config parses");

    let future = ChartConfig::dca_default()
        .to_json_contract_v1_pretty()
        .expect("serialize")
        .replace("\"schema_version\": 1", "\"schema_version\": 2");
    let err = ChartConfig::from_json_compat_str(&future).expect_err("future schema");
    assert!(err.to_string().contains("schema version"));

    assert!(ChartConfig::from_json_compat_str("not json").is_err());
}

#[test]
fn json_load_validates_content() {
    let mut config = ChartConfig::dca_default();
    config.series.clear();
    let json = serde_json::to_string(&config).expect("json");
    assert!(matches!(
        ChartConfig::from_json_compat_str(&json),
        Err(VizError::InvalidConfig(_))
    ));
}

#[test]
fn hex_colors_parse_strictly() {
    assert_eq!(
        Color::from_hex("27ae60").expect("no hash"),
        Color::rgb8(0x27, 0xae, 0x60)
    );
    assert!(Color::from_hex("#fff").is_err());
    assert!(Color::from_hex("#zzzzzz").is_err());
}
