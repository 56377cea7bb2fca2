/// Convenience result type used across spiralcam.
pub type SpiralResult<T> = Result<T, SpiralError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum SpiralError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while writing frames to an output sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpiralError {
    /// Build a [`SpiralError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SpiralError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SpiralError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SpiralError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
