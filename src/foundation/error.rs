/// Convenience result type used across wavecurtain.
pub type CurtainResult<T> = Result<T, CurtainError>;

/// Top-level error taxonomy used by curtain APIs.
///
/// Phase misuse (opening an open curtain, closing a closed one) is never an error: those calls
/// are ignored. Errors are reserved for configuration and output problems.
#[derive(thiserror::Error, Debug)]
pub enum CurtainError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing or writing rendered frames.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CurtainError {
    /// Build a [`CurtainError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CurtainError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CurtainError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
