//! Ergonomic error context helpers.
//!
//! Provides extension traits for adding context to `Result` types,
//! converting IO and serde errors into context-rich `CookieError` variants.

use crate::base::error::CookieError;
use std::io;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Add store context to an IO error.
    ///
    /// # Example
    /// ```ignore
    /// use cookiemonster::base::context::IoResultExt;
    ///
    /// let json = std::fs::read_to_string(&path).store_context("json")?;
    /// // Error: "Cookie store 'json' unavailable: No such file or directory"
    /// ```
    fn store_context(self, store: &str) -> Result<T, CookieError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn store_context(self, store: &str) -> Result<T, CookieError> {
        self.map_err(|e| CookieError::store_unavailable(store, e.to_string()))
    }
}

/// Extension trait for serde_json Results.
pub trait JsonResultExt<T> {
    /// Map a JSON failure onto a snapshot decoding error.
    fn snapshot_context(self) -> Result<T, CookieError>;
}

impl<T> JsonResultExt<T> for Result<T, serde_json::Error> {
    fn snapshot_context(self) -> Result<T, CookieError> {
        self.map_err(|e| CookieError::invalid_serialized_jar(e.to_string()))
    }
}
