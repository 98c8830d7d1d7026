/// Result alias used across the library.
pub type SynthResult<T> = Result<T, SynthError>;

/// Error type for every stage of image synthesis.
#[derive(thiserror::Error, Debug)]
pub enum SynthError {
    /// Invalid input dimensions, parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A raster or font could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Filesystem access failed.
    #[error("io error: {0}")]
    Io(String),

    /// Text selection, shaping or rasterization failed.
    #[error("text error: {0}")]
    Text(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SynthError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
