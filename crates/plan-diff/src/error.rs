//! Error types for plan-diff

/// Result type for plan-diff operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in plan-diff operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown action tag: {0}")]
    InvalidAction(String),

    #[error("Invalid redaction keys: {message}")]
    InvalidRedactionKeys { message: String },

    #[error("Resource {address} has a change but no '{key}' field in either before or after")]
    MissingGroupKey { address: String, key: String },
}

impl Error {
    pub fn redaction_keys(message: impl Into<String>) -> Self {
        Self::InvalidRedactionKeys {
            message: message.into(),
        }
    }

    pub fn missing_group_key(address: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingGroupKey {
            address: address.into(),
            key: key.into(),
        }
    }
}
