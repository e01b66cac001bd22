use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TicketError {
    #[error("storage error during {operation}: {details}")]
    StorageError { operation: String, details: String },

    #[error("{format} serialization error: {details}")]
    SerializationError { format: String, details: String },

    #[error("publish failed on topic {topic}: {details}")]
    PublishError { topic: String, details: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, TicketError>;

impl From<io::Error> for TicketError {
    fn from(err: io::Error) -> Self {
        TicketError::StorageError { operation: "io".to_string(), details: err.to_string() }
    }
}

impl From<serde_json::Error> for TicketError {
    fn from(err: serde_json::Error) -> Self {
        TicketError::SerializationError { format: "json".to_string(), details: err.to_string() }
    }
}

impl From<toml::de::Error> for TicketError {
    fn from(err: toml::de::Error) -> Self {
        TicketError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

// NOTE: Avoid adding generic "stringly" error conversions here.
// Use structured `TicketError` variants at the call site to preserve context.
