use std::path::PathBuf;

/// Convenience result type used across the player.
pub type PlayerResult<T> = Result<T, PlayerError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PlayerError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame with zero width or height reached the compositor.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// Two frames that must share a shape did not.
    #[error("frame dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        /// Width of the first frame.
        left_width: u32,
        /// Height of the first frame.
        left_height: u32,
        /// Width of the second frame.
        right_width: u32,
        /// Height of the second frame.
        right_height: u32,
    },

    /// A video source could not be opened.
    #[error("open error for '{}': {reason}", .path.display())]
    Open {
        /// Path of the source that failed.
        path: PathBuf,
        /// Human-readable cause.
        reason: String,
    },

    /// Decoding failed mid-stream.
    #[error("decode error: {0}")]
    Decode(String),

    /// A category yielded no playable videos.
    #[error("empty category: '{0}' has no playable videos")]
    EmptyCategory(String),

    /// No category yielded any playable video at startup.
    #[error("empty library: no playable videos in any category under '{}'", .0.display())]
    EmptyLibrary(PathBuf),

    /// The destination of a navigation transition could not be prepared.
    #[error("transition aborted: {0}")]
    TransitionAbort(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The presentation surface failed.
    #[error("presentation error: {0}")]
    Present(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlayerError {
    /// Build a [`PlayerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlayerError::InvalidFrame`] value.
    pub fn invalid_frame(msg: impl Into<String>) -> Self {
        Self::InvalidFrame(msg.into())
    }

    /// Build a [`PlayerError::Open`] value.
    pub fn open(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Open {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`PlayerError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PlayerError::TransitionAbort`] value.
    pub fn transition_abort(msg: impl Into<String>) -> Self {
        Self::TransitionAbort(msg.into())
    }

    /// Build a [`PlayerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`PlayerError::Present`] value.
    pub fn present(msg: impl Into<String>) -> Self {
        Self::Present(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
