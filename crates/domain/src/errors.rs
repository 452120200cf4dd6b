use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Storage engine unreachable, or locked beyond the bounded retry.
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed fingerprint inputs. Raised to the caller, never degraded.
    #[error("Invalid cache input: {0}")]
    InvalidInput(String),
}

impl CacheError {
    /// Whether callers should fall back to the uncached operation instead of
    /// failing.
    pub fn is_degradable(&self) -> bool {
        !matches!(self, CacheError::InvalidInput(_))
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::Serialization(e.to_string())
    }
}
