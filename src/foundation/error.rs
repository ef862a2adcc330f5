/// Convenience result type used across flipbook.
pub type FlipbookResult<T> = Result<T, FlipbookError>;

/// Top-level error taxonomy used by player APIs.
#[derive(thiserror::Error, Debug)]
pub enum FlipbookError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// None of the candidate base paths served the probe frame.
    #[error("path detection error: could not load frames from any of {tried:?}")]
    PathDetection {
        /// Bases probed, in probe order.
        tried: Vec<String>,
    },

    /// A single asset could not be fetched or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Drawing onto a display surface failed.
    #[error("render error: {0}")]
    Render(String),

    /// The player was driven out of its lifecycle order.
    #[error("playback error: {0}")]
    Playback(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlipbookError {
    /// Build a [`FlipbookError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FlipbookError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`FlipbookError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FlipbookError::Playback`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
