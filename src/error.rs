//! Error type shared by configuration, validation and rendering.

use thiserror::Error;

/// Everything that can make a render (or applying a configuration) fail.
///
/// Misuse of internal accessors (for example asking a castling token for
/// its coordinates) is not represented here; it panics instead.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid fen '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("invalid square '{token}': {reason}")]
    InvalidSquare { token: String, reason: String },

    #[error("invalid color '{0}': valid formats are #RRGGBBAA, #RRGGBB, RRGGBBAA or RRGGBB")]
    InvalidColor(String),

    #[error("invalid render order: {0}")]
    InvalidOrder(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to load '{path}': {reason}")]
    Resource { path: String, reason: String },

    #[error("drawing failed: {0}")]
    Surface(String),

    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RenderError {
    pub(crate) fn resource(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        RenderError::Resource {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
