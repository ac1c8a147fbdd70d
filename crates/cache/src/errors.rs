use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported cache envelope version: {0}")]
    UnsupportedVersion(u32),
}

pub type CacheResult<T> = Result<T, CacheError>;

impl From<CacheError> for domain::errors::CoreError {
    fn from(err: CacheError) -> Self {
        domain::errors::CoreError::Storage(err.to_string())
    }
}
