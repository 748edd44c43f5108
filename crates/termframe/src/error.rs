use std::path::PathBuf;

use thiserror::Error;

use crate::font::FaceKind;

/// Errors raised while building an [`Engine`](crate::Engine).
///
/// These are fatal for construction. The type is `Clone` so a failed shared
/// engine can hand the same error to every caller.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FontError {
    #[error("cannot read {face} font {path}: {reason}")]
    Read {
        face: FaceKind,
        path: PathBuf,
        reason: String,
    },
    #[error("cannot parse {face} font: {reason}")]
    Parse { face: FaceKind, reason: String },
    #[error("{face} font has no glyph for {ch:?}")]
    MissingGlyph { face: FaceKind, ch: char },
    #[error("invalid font metrics: {0}")]
    InvalidMetrics(String),
    #[error("invalid font size {0}")]
    InvalidSize(f32),
}

/// Errors raised by a single render call.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("png encoding failed: {0}")]
    Encode(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
