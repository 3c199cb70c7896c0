//! Configuration options for TTP deserialization.
//!
//! ## Examples
//!
//! ```rust
//! use tesira_ttp::{deserialize_value_with_options, ParseOptions};
//!
//! let options = ParseOptions::new().with_max_depth(2);
//! assert!(deserialize_value_with_options("[[1]]", &options).is_ok());
//! assert!(deserialize_value_with_options("[[[1]]]", &options).is_err());
//! ```

/// Nesting limit applied when no explicit options are given.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration options for TTP deserialization.
///
/// # Examples
///
/// ```rust
/// use tesira_ttp::ParseOptions;
///
/// let options = ParseOptions::new()
///     .with_max_depth(16)
///     .with_duplicate_keys_allowed();
/// assert_eq!(options.max_depth, 16);
/// assert!(!options.reject_duplicate_keys);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest `{`/`[` nesting accepted before the fragment is rejected.
    pub max_depth: usize,
    /// Reject a control that repeats a key instead of keeping the last one.
    pub reject_duplicate_keys: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            reject_duplicate_keys: true,
        }
    }
}

impl ParseOptions {
    /// Creates default options (depth limit 64, duplicate keys rejected).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the nesting limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Keeps the last value when a control repeats a key.
    #[must_use]
    pub fn with_duplicate_keys_allowed(mut self) -> Self {
        self.reject_duplicate_keys = false;
        self
    }
}
