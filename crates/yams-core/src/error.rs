use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to decode field '{field}': {message}")]
    Decode { field: String, message: String },

    #[error("Field '{field}' has {actual} columns, expected {expected}")]
    ShapeMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported history version: {0}")]
    UnsupportedVersion(u32),

    #[error("Notation not found: {0}")]
    NotationNotFound(String),

    #[error("Game not found: {0}")]
    GameNotFound(u32),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    pub(crate) fn decode(field: impl Into<String>, message: impl ToString) -> Self {
        Error::Decode {
            field: field.into(),
            message: message.to_string(),
        }
    }
}
