use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid path data at byte {offset}: {reason}")]
    InvalidPath { offset: usize, reason: String },

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("reveal animation already in flight; call reset() before animating again")]
    RevealInFlight,
}
