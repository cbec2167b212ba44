//! Error types for value traversal and rendering.
//!
//! Errors never escape [`serialize`](crate::serialize): the transformer turns
//! them into inline markers. They surface only through the lower-level entry
//! points ([`to_rendered`](crate::to_rendered), [`to_writer`](crate::to_writer),
//! [`to_value`](crate::to_value)) and from the [`HostObject`](crate::HostObject)
//! and accessor callbacks supplied by the embedding application.
//!
//! ## Display text
//!
//! Every variant displays as the bare failure reason, because markers embed
//! that text verbatim:
//!
//! ```rust
//! use safe_stringify::Error;
//!
//! let err = Error::message("getter exploded");
//! assert_eq!(
//!     format!("[Error extracting property: {}]", err),
//!     "[Error extracting property: getter exploded]"
//! );
//! ```

use std::fmt;
use thiserror::Error;

/// Represents every failure the serializer can observe while walking a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A host object or accessor reported a failure.
    #[error("{0}")]
    Message(String),

    /// A date holds no valid timestamp and cannot be rendered as ISO-8601.
    #[error("Invalid time value")]
    InvalidDate,

    /// Composites nest deeper than the transformer will recurse.
    #[error("Maximum call stack size exceeded")]
    RecursionLimit,

    /// A composite was already mutably borrowed while being read.
    #[error("{0} is already mutably borrowed")]
    BorrowConflict(&'static str),

    /// A Rust value could not be converted into a runtime value.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error while writing rendered text.
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an error carrying a failure reason, typically from a host callback.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_stringify::Error;
    ///
    /// let err = Error::message("permission denied");
    /// assert_eq!(err.to_string(), "permission denied");
    /// ```
    pub fn message<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Creates an unsupported type error for Rust values with no runtime counterpart.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_reason() {
        assert_eq!(Error::message("boom").to_string(), "boom");
        assert_eq!(Error::custom("oops").to_string(), "oops");
        assert_eq!(Error::InvalidDate.to_string(), "Invalid time value");
        assert_eq!(
            Error::RecursionLimit.to_string(),
            "Maximum call stack size exceeded"
        );
    }

    #[test]
    fn test_borrow_conflict_names_composite() {
        let err = Error::BorrowConflict("object");
        assert_eq!(err.to_string(), "object is already mutably borrowed");
    }

    #[test]
    fn test_serde_custom() {
        let err = <Error as serde::ser::Error>::custom("bad key");
        assert_eq!(err, Error::Custom("bad key".to_string()));
    }
}
