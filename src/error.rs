use thiserror::Error;

use crate::api::SeriesId;

pub type VizResult<T> = Result<T, VizError>;

#[derive(Debug, Error)]
pub enum VizError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid chart config: {0}")]
    InvalidConfig(String),

    #[error("series `{0}` is not configured on this chart")]
    UnknownSeries(SeriesId),

    #[error("render backend failure: {0}")]
    Backend(String),
}
