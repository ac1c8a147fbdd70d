use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Player unavailable: {0}")]
    PlayerUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Operation timed out")]
    Timeout,
}

pub type CoreResult<T> = Result<T, CoreError>;
