//! Recoverable texture faults

use std::fmt;

use easel_graphics::ContextId;

/// Why a texture could not be bound for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureError {
    /// The texture holds no GPU content (never prepared, or recycled).
    NotReady,
    /// The texture was prepared against a context that no longer exists.
    ContentLost { prepared_against: ContextId },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::NotReady => write!(f, "texture has no GPU content"),
            TextureError::ContentLost { prepared_against } => write!(
                f,
                "texture content lost: prepared against stale context {prepared_against:?}"
            ),
        }
    }
}

impl std::error::Error for TextureError {}
