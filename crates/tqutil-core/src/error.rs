use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UtilError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("index {index} out of range for size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type UtilResult<T> = Result<T, UtilError>;

impl From<figment::Error> for UtilError {
    fn from(e: figment::Error) -> Self {
        UtilError::Config(e.to_string())
    }
}
