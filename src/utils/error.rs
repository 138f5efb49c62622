use thiserror::Error;

#[derive(Error, Debug)]
pub enum VenueError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("Storage conflict: {message}")]
    ConflictError { message: String },

    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },
}

pub type Result<T> = std::result::Result<T, VenueError>;
