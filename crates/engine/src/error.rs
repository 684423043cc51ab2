use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while rewriting a photometric file
#[derive(Error, Debug)]
pub enum EngineError {
    /// Bytes are neither valid UTF-8 nor valid in the fallback encoding
    #[error("Decode error: input is neither valid UTF-8 nor valid {fallback}")]
    Decode { fallback: String },

    /// Fallback encoding label not recognized
    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),
}

impl EngineError {
    /// Create a decode error for the given fallback encoding name
    pub fn decode(fallback: impl Into<String>) -> Self {
        Self::Decode {
            fallback: fallback.into(),
        }
    }
}
