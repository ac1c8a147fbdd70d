use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("mapping error: {0}")]
    MappingError(String),
}

pub type DbResult<T> = Result<T, DbError>;

impl From<DbError> for domain::errors::CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(msg) => domain::errors::CoreError::NotFound(msg),
            DbError::Conflict(msg) => domain::errors::CoreError::Conflict(msg),
            DbError::DatabaseError(e) => domain::errors::CoreError::Storage(e.to_string()),
            DbError::MappingError(msg) => domain::errors::CoreError::Storage(msg),
        }
    }
}

/// Maps a unique-constraint violation to `DbError::Conflict`; any other
/// sqlx error passes through as `DatabaseError`.
pub fn map_write_error(err: sqlx::Error, conflict_message: &str) -> DbError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return DbError::Conflict(conflict_message.to_string());
        }
    }
    DbError::DatabaseError(err)
}
