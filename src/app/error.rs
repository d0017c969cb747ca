use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The structure being exported violates a platform constraint.
    /// The message is shown to the user verbatim.
    #[error("{0}")]
    Validation(String),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Transport error: {0}")]
    Transport(String),

    /// An invalid local action (e.g. dropping a node onto its own
    /// descendant). Absorbed as a non-blocking warning; never fatal.
    #[error("{0}")]
    UserAction(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;
