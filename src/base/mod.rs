//! Base types and error handling.
//!
//! Provides foundational types shared by the cookie modules:
//! - [`CookieError`](error::CookieError): Failures that escape a jar operation
//! - [`context`]: Helpers that attach store context to IO and serde errors

pub mod context;
pub mod error;
