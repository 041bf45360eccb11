//! Error types for the mindmate pipeline.
//!
//! These errors are internal plumbing: every public pipeline operation
//! converts them into a safe default (neutral emotion, zero risk) at the
//! component boundary, so none of them ever reach the end user.

/// Top-level error type for the support pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SupportError {
    /// Configuration could not be loaded, saved, or failed validation.
    #[error("config error: {0}")]
    Config(String),

    /// A reference corpus could not be read or parsed.
    #[error("corpus error: {0}")]
    Corpus(String),

    /// The remote emotion model was unreachable or returned garbage.
    #[error("remote classifier error: {0}")]
    Remote(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SupportError>;
