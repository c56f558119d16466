//! Error types for scene operations
//!
//! Provides unified error handling for pose resolution, input subscription,
//! asset probing and settings persistence.

use thiserror::Error;

/// Errors that can occur in scene operations
#[derive(Error, Debug)]
pub enum SceneError {
    /// A pose or component input was rejected (non-positive size, degenerate direction, ...)
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Subscription requested for an event kind the mediator does not deliver
    #[error("Unsupported event: {0}")]
    UnsupportedEvent(String),

    /// A component with this ID already exists in the scene
    #[error("Duplicate component ID: {0}")]
    DuplicateId(String),

    /// No component with this ID exists in the scene
    #[error("Unknown component ID: {0}")]
    UnknownId(String),

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image header or decode error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// File watcher error
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}

/// Result type alias for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

impl SceneError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SceneError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns true for the `InvalidParameter` kind
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, SceneError::InvalidParameter { .. })
    }

    /// Returns true for the `UnsupportedEvent` kind
    pub fn is_unsupported_event(&self) -> bool {
        matches!(self, SceneError::UnsupportedEvent(_))
    }
}
