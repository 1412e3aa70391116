use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid behavior configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid viewport settings: scale_factor={scale_factor}, translate_px={translate_px}")]
    InvalidViewport {
        scale_factor: f64,
        translate_px: f64,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
