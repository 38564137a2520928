use thiserror::Error;

/// Rejected slide edits. The document is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("slide index {index} is out of range (deck has {len} slides)")]
    SlideOutOfRange { index: usize, len: usize },

    #[error("item index {index} is out of range (slide has {len} items)")]
    ItemOutOfRange { index: usize, len: usize },

    #[error("Cannot delete the last slide.")]
    LastSlide,

    #[error("slide {index} is not a content slide")]
    NotAContentSlide { index: usize },

    #[error("slide {index} is not an infographic slide")]
    NotAnInfographicSlide { index: usize },

    #[error("no slide with id {id}")]
    UnknownSlide { id: String },

    #[error("style token {token:?} is not offered by this field")]
    UnknownStyleToken { token: String },
}

/// Messages are shown to the user verbatim.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("An account with this email already exists.")]
    DuplicateEmail,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("user store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("user store is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to render slide {slide_id}: {reason}")]
    Render { slide_id: String, reason: String },

    #[error("nothing to export")]
    Empty,

    #[error("I/O error writing export: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the whole-deck operations the front ends call directly.
#[derive(Error, Debug)]
pub enum SlidesmithError {
    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Model error: {0}")]
    Model(#[from] slidesmith_common::ModelError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SlidesmithError>;
