//! Error types for TTP deserialization and value access.
//!
//! Every failure in this crate is reported through the single [`Error`] enum.
//!
//! ## Error Categories
//!
//! - **Format Errors**: malformed wire text (missing `{`/`}` or `[`/`]`
//!   wrappers, a keyed item without a key, runaway nesting)
//! - **Key Not Found**: a control lookup for an absent key
//! - **Index Out Of Range**: an array lookup past its end
//! - **Type Mismatch**: a scalar interpreted as a shape it does not have
//!
//! Nothing here is retried or recovered. A fragment either deserializes
//! completely or the call fails; the caller decides whether to log and drop
//! the response.
//!
//! ## Examples
//!
//! ```rust
//! use tesira_ttp::{deserialize_value, Error};
//!
//! let result = deserialize_value("{\"value\":-10.5");
//! assert!(matches!(result, Err(Error::Format { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while decoding or inspecting TTP values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed wire text
    #[error("Invalid TTP format: {msg} in `{fragment}`")]
    Format { msg: String, fragment: String },

    /// Control lookup for a key that is not present
    #[error("Key not found: \"{0}\"")]
    KeyNotFound(String),

    /// Array lookup past the last element
    #[error("Index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A value could not be interpreted as the requested shape
    #[error("Type mismatch: expected {expected}, found `{found}`")]
    TypeMismatch { expected: String, found: String },

    /// Rust type with no wire representation
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a format error for the offending fragment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tesira_ttp::Error;
    ///
    /// let err = Error::format("expected `}`", "{\"a\":1");
    /// assert!(err.to_string().contains("expected `}`"));
    /// ```
    pub fn format(msg: &str, fragment: &str) -> Self {
        Error::Format {
            msg: msg.to_string(),
            fragment: fragment.to_string(),
        }
    }

    /// Creates a key-not-found error.
    pub fn key_not_found(key: &str) -> Self {
        Error::KeyNotFound(key.to_string())
    }

    /// Creates an index-out-of-range error.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange { index, len }
    }

    /// Creates a type mismatch error when a value cannot be read as `expected`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tesira_ttp::Error;
    ///
    /// let err = Error::type_mismatch("integer", "\"test\"");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error for Rust values with no TTP encoding.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` for errors caused by malformed wire text.
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. })
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
