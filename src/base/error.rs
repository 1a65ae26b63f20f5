use thiserror::Error;

/// Errors that escape a cookie jar operation.
///
/// Policy decisions (a server trying to set a cookie it is not allowed to)
/// are not errors; they are reported through
/// [`SetCookieOutcome::Rejected`](crate::cookies::error::SetCookieOutcome).
/// Everything here is either a failing store or a bad snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CookieError {
    /// The backing store failed. The jar never retries.
    #[error("Cookie store '{store}' unavailable: {message}")]
    StoreUnavailable { store: String, message: String },

    /// A store that enforces uniqueness refused an insert.
    #[error("Duplicate cookie key ({domain}, {path}, {name})")]
    DuplicateKey {
        domain: String,
        path: String,
        name: String,
    },

    /// A serialized jar carries a version this build cannot read.
    #[error("Unsupported serialization version: {0}")]
    UnsupportedSerializationVersion(u32),

    /// A serialized jar could not be decoded.
    #[error("Invalid serialized jar: {0}")]
    InvalidSerializedJar(String),

    /// A blocking jar call was made against an async-only store.
    #[error("Cookie store is not synchronous; use the async API instead")]
    SyncUnsupported,
}

impl CookieError {
    /// Create a store unavailable error.
    pub fn store_unavailable(store: impl Into<String>, message: impl Into<String>) -> Self {
        CookieError::StoreUnavailable {
            store: store.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate key error.
    pub fn duplicate_key(
        domain: impl Into<String>,
        path: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        CookieError::DuplicateKey {
            domain: domain.into(),
            path: path.into(),
            name: name.into(),
        }
    }

    /// Create an invalid serialized jar error.
    pub fn invalid_serialized_jar(reason: impl Into<String>) -> Self {
        CookieError::InvalidSerializedJar(reason.into())
    }

    /// Whether the error came from the backing store rather than from the caller's input.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            CookieError::StoreUnavailable { .. } | CookieError::DuplicateKey { .. }
        )
    }
}
