use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{SAMPLE_X_MAX, SAMPLE_X_MIN};
use crate::error::{VizError, VizResult};
use crate::render::{Color, LineStrokeStyle};

pub const CHART_CONFIG_JSON_SCHEMA_V1: u32 = 1;
pub const MAX_SERIES: usize = 4;

/// Names of the curves a chart can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesId {
    Original,
    ConcaveComponent,
    LinearApprox,
    ConvexSurrogate,
}

impl SeriesId {
    pub const ALL: [Self; 4] = [
        Self::Original,
        Self::ConcaveComponent,
        Self::LinearApprox,
        Self::ConvexSurrogate,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::ConcaveComponent => "concave_component",
            Self::LinearApprox => "linear_approx",
            Self::ConvexSurrogate => "convex_surrogate",
        }
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Line,
}

/// Styling of one named series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub id: SeriesId,
    pub label: String,
    pub color: Color,
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_style: LineStrokeStyle,
    #[serde(default)]
    pub show_points: bool,
    /// Curve smoothing; only straight segments (`0.0`) are supported.
    #[serde(default)]
    pub tension: f64,
}

impl SeriesConfig {
    #[must_use]
    pub fn new(id: SeriesId, label: impl Into<String>, color: Color, stroke_width: f64) -> Self {
        Self {
            id,
            label: label.into(),
            color,
            stroke_width,
            stroke_style: LineStrokeStyle::Solid,
            show_points: false,
            tension: 0.0,
        }
    }

    #[must_use]
    pub fn with_dash(mut self, on_px: f64, off_px: f64) -> Self {
        self.stroke_style = LineStrokeStyle::Dashed { on_px, off_px };
        self
    }

    fn validate(&self) -> VizResult<()> {
        if self.label.trim().is_empty() {
            return Err(VizError::InvalidConfig(format!(
                "series `{}` needs a label",
                self.id
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(VizError::InvalidConfig(format!(
                "series `{}` stroke width must be finite and > 0",
                self.id
            )));
        }
        if self.tension != 0.0 {
            return Err(VizError::InvalidConfig(format!(
                "series `{}` must not use curve smoothing",
                self.id
            )));
        }
        self.color.validate()?;
        self.stroke_style.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AxisPosition {
    /// Axis line crosses the plot at the origin of the other axis.
    #[default]
    Center,
    /// Axis line sits on the plot edge.
    Edge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    #[serde(default)]
    pub position: AxisPosition,
    /// Fixed range; `None` autoscales from the series data.
    #[serde(default)]
    pub range: Option<(f64, f64)>,
    #[serde(default)]
    pub title: Option<String>,
}

impl AxisConfig {
    #[must_use]
    pub fn centered(range: Option<(f64, f64)>, title: impl Into<String>) -> Self {
        Self {
            position: AxisPosition::Center,
            range,
            title: Some(title.into()),
        }
    }

    fn validate(&self, axis: &str) -> VizResult<()> {
        if let Some((min, max)) = self.range {
            if !min.is_finite() || !max.is_finite() || min >= max {
                return Err(VizError::InvalidConfig(format!(
                    "{axis} axis range must be finite with min < max"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendConfig {
    pub display: bool,
    #[serde(default)]
    pub position: LegendPosition,
}

/// Declarative chart setup, fixed at chart creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub kind: ChartKind,
    pub title: Option<String>,
    pub series: Vec<SeriesConfig>,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub legend: LegendConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ChartConfig,
}

impl ChartConfig {
    /// Styling of the DC visualization: four curves, origin-centered axes,
    /// `x` fixed to the sampling interval, legend on top.
    #[must_use]
    pub fn dca_default() -> Self {
        Self {
            kind: ChartKind::Line,
            title: Some("DCA Visualization: f(x) = x² - |x|".to_owned()),
            series: vec![
                SeriesConfig::new(
                    SeriesId::Original,
                    "f(x) = x² - |x| [NON-CONVEX]",
                    Color::rgb8(0xe7, 0x4c, 0x3c),
                    4.0,
                ),
                SeriesConfig::new(
                    SeriesId::ConcaveComponent,
                    "h(x) = |x| [CONVEX]",
                    Color::rgb8(0x34, 0x98, 0xdb),
                    2.0,
                )
                .with_dash(8.0, 4.0),
                SeriesConfig::new(
                    SeriesId::LinearApprox,
                    "Linear Approximation",
                    Color::rgb8(0x9b, 0x59, 0xb6),
                    3.0,
                )
                .with_dash(10.0, 5.0),
                SeriesConfig::new(
                    SeriesId::ConvexSurrogate,
                    "Convex Approximation",
                    Color::rgb8(0x27, 0xae, 0x60),
                    3.0,
                ),
            ],
            x_axis: AxisConfig::centered(Some((SAMPLE_X_MIN, SAMPLE_X_MAX)), "x"),
            y_axis: AxisConfig::centered(None, "f(x)"),
            legend: LegendConfig {
                display: true,
                position: LegendPosition::Top,
            },
        }
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.series.is_empty() || self.series.len() > MAX_SERIES {
            return Err(VizError::InvalidConfig(format!(
                "chart needs between 1 and {MAX_SERIES} series, got {}",
                self.series.len()
            )));
        }
        for (index, series) in self.series.iter().enumerate() {
            series.validate()?;
            if self.series[..index].iter().any(|other| other.id == series.id) {
                return Err(VizError::InvalidConfig(format!(
                    "series `{}` is configured twice",
                    series.id
                )));
            }
        }
        if self.x_axis.range.is_none() {
            return Err(VizError::InvalidConfig(
                "x axis range must be fixed".to_owned(),
            ));
        }
        self.x_axis.validate("x")?;
        self.y_axis.validate("y")
    }

    #[must_use]
    pub fn series_config(&self, id: SeriesId) -> Option<&SeriesConfig> {
        self.series.iter().find(|series| series.id == id)
    }

    pub fn to_json_contract_v1_pretty(&self) -> VizResult<String> {
        let payload = ChartConfigJsonContractV1 {
            schema_version: CHART_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            VizError::InvalidConfig(format!("failed to serialize chart config contract v1: {e}"))
        })
    }

    /// Parses either a bare config or a versioned contract, then validates it.
    pub fn from_json_compat_str(input: &str) -> VizResult<Self> {
        let config = match serde_json::from_str::<ChartConfig>(input) {
            Ok(config) => config,
            Err(_) => {
                let payload: ChartConfigJsonContractV1 =
                    serde_json::from_str(input).map_err(|e| {
                        VizError::InvalidConfig(format!("failed to parse chart config json: {e}"))
                    })?;
                if payload.schema_version != CHART_CONFIG_JSON_SCHEMA_V1 {
                    return Err(VizError::InvalidConfig(format!(
                        "unsupported chart config schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.config
            }
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::dca_default()
    }
}
