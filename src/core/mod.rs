pub mod dc;
pub mod sampling;
pub mod scale;
pub mod steps;
pub mod types;

pub use dc::{convex_surrogate, f, g, h, linear_majorant, subgradient};
pub use sampling::{
    SAMPLE_STEP, SAMPLE_X_MAX, SAMPLE_X_MIN, SampleCurvePoint, SampleGrid, sample_curves,
};
pub use scale::{LinearScale, PixelSpan};
pub use steps::{DCA_STEPS, LAST_STEP_INDEX, Step};
pub use types::{DataPoint, PlotArea, Viewport};
