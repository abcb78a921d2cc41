use thiserror::Error;

/// Error types for the forecast module
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Coefficient bundle failed to parse
    #[error("Model load error: {0}")]
    ModelLoad(#[from] serde_json::Error),

    /// Feature vector length does not match the fitted weights
    #[error("Model shape error: expected {expected} features, got {got}")]
    ModelShape { expected: usize, got: usize },

    /// Inference produced a non-finite value
    #[error("Non-finite prediction from inputs")]
    NonFinite,
}

/// Type alias for Result with ForecastError
pub type Result<T> = std::result::Result<T, ForecastError>;
