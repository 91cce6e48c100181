use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds an opaque color from 8-bit channels.
    #[must_use]
    pub const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(input: &str) -> VizResult<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(VizError::InvalidData(format!(
                "color `{input}` must have the form #rrggbb"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| {
                VizError::InvalidData(format!("color `{input}` contains non-hex digits"))
            })
        };
        Ok(Self::rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn validate(self) -> VizResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(VizError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Stroke pattern for lines and polylines, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    Dashed {
        on_px: f64,
        off_px: f64,
    },
}

impl LineStrokeStyle {
    pub fn validate(self) -> VizResult<()> {
        match self {
            Self::Solid => Ok(()),
            Self::Dashed { on_px, off_px } => {
                if !on_px.is_finite() || !off_px.is_finite() || on_px <= 0.0 || off_px < 0.0 {
                    return Err(VizError::InvalidData(
                        "dash pattern must be finite with on > 0 and off >= 0".to_owned(),
                    ));
                }
                Ok(())
            }
        }
    }
}

fn validate_stroke_width(stroke_width: f64) -> VizResult<()> {
    if !stroke_width.is_finite() || stroke_width <= 0.0 {
        return Err(VizError::InvalidData(
            "line stroke width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            stroke_style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub const fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn validate(self) -> VizResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(VizError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        validate_stroke_width(self.stroke_width)?;
        self.stroke_style.validate()?;
        self.color.validate()
    }
}

/// Draw command for one connected path, stroked as a whole so dash patterns
/// run continuously across vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylinePrimitive {
    pub points: Vec<(f64, f64)>,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
}

impl PolylinePrimitive {
    #[must_use]
    pub fn new(
        points: Vec<(f64, f64)>,
        stroke_width: f64,
        color: Color,
        stroke_style: LineStrokeStyle,
    ) -> Self {
        Self {
            points,
            stroke_width,
            color,
            stroke_style,
        }
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.points.len() < 2 {
            return Err(VizError::InvalidData(
                "polyline needs at least two points".to_owned(),
            ));
        }
        if self
            .points
            .iter()
            .any(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(VizError::InvalidData(
                "polyline coordinates must be finite".to_owned(),
            ));
        }
        validate_stroke_width(self.stroke_width)?;
        self.stroke_style.validate()?;
        self.color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space; `y` is the top of the text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.text.is_empty() {
            return Err(VizError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(VizError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(VizError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
