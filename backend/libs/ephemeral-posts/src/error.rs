/// Error types for ephemeral posts
///
/// The expiration policy itself is total; errors only arise when a post or the
/// configuration is constructed from untrusted input.
use thiserror::Error;

/// Result type for ephemeral-posts operations
pub type Result<T> = std::result::Result<T, ExpirationError>;

#[derive(Debug, Error)]
pub enum ExpirationError {
    /// Lifetime of a status post must be strictly positive
    #[error("Invalid lifetime: {millis}ms (must be greater than zero)")]
    InvalidLifetime { millis: i64 },

    /// Lifetime exceeds the configured maximum
    #[error("Lifetime {seconds}s exceeds maximum of {max_seconds}s")]
    LifetimeTooLong { seconds: i64, max_seconds: i64 },

    /// `created_at + lifetime` falls outside the representable date range
    #[error("Expiration out of range: {created_at} + {seconds}s")]
    ExpirationOutOfRange {
        created_at: chrono::DateTime<chrono::Utc>,
        seconds: i64,
    },

    #[error("Invalid post kind: {0}")]
    InvalidKind(String),

    #[error("Invalid coordinates: latitude={latitude}, longitude={longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// `is_ephemeral` and `expires_at` disagree on a stored record
    #[error("Expiration mismatch for post {post_id}: is_ephemeral={is_ephemeral}, expires_at present={has_expiration}")]
    ExpirationMismatch {
        post_id: uuid::Uuid,
        is_ephemeral: bool,
        has_expiration: bool,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<envy::Error> for ExpirationError {
    fn from(err: envy::Error) -> Self {
        ExpirationError::Config(err.to_string())
    }
}
