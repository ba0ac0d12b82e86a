use thiserror::Error;

/// Unified error type for the quoteboard-core library.
///
/// Deliberately small: missing or stale market data is never an error —
/// it degrades to the NaN sentinel inside the price machinery. Errors are
/// reserved for host-facing concerns like export serialization and
/// malformed preference values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid preference value for '{key}': {message}")]
    Preference { key: String, message: String },
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}
