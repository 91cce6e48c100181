//! dca-viz: step-by-step visualization of the DC algorithm on `f(x) = x² - |x|`.
//!
//! The crate splits into a pure math model (`core`), a pure state machine
//! (`interaction`), the controller and chart contracts (`api`), and rendering
//! backends (`render`), with an optional GTK4 front-end.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartConfig, LineChart, VisualizationController};
pub use error::{VizError, VizResult};
