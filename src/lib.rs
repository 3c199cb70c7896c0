//! # tesira_ttp
//!
//! Value model, tokenizer and serializer for the Tesira Text Protocol (TTP),
//! the line-oriented text protocol spoken by Biamp Tesira audio DSPs.
//!
//! ## What is TTP?
//!
//! TTP commands get, set and subscribe to attributes of DSP blocks. Their
//! arguments and responses use a semi-JSON syntax: keyed objects (called
//! *controls*) in `{}`, arrays in `[]`, whitespace instead of commas, and
//! scalars that may or may not be quoted.
//!
//! ```text
//! {"deviceId":0 "classCode":0 "instanceNum":0}
//! [-100.000000 -12.5]
//! ```
//!
//! ## Key Features
//!
//! - **Lossless**: scalars keep their raw text, so a decoded value encodes
//!   back to the same wire text
//! - **Lazy typing**: scalars are read as int, float, bool, string or
//!   date-time only when asked
//! - **Serde Compatible**: decode straight into `#[derive(Deserialize)]`
//!   types, or build command arguments from `#[derive(Serialize)]` types
//! - **Bounded**: nesting depth is limited, so hostile input cannot exhaust
//!   the stack
//!
//! ## Quick Start
//!
//! ```rust
//! use tesira_ttp::{deserialize_value, ttp};
//!
//! // Decode a response payload
//! let response = deserialize_value("{\"value\":[-100.000000 -12.5]}").unwrap();
//! let level = response.get("value").unwrap().at(1).unwrap().as_f64().unwrap();
//! assert_eq!(level, -12.5);
//!
//! // Encode a command argument
//! let argument = ttp!({"instanceTag": "Level1", "channel": 1});
//! assert_eq!(argument.to_wire(), "{\"instanceTag\":\"Level1\" \"channel\":1}");
//! ```
//!
//! ### Typed Responses
//!
//! ```rust
//! use serde::Deserialize;
//! use tesira_ttp::from_str;
//!
//! #[derive(Deserialize)]
//! struct Meter { value: Vec<f64> }
//!
//! let meter: Meter = from_str("{\"value\":[-100.000000 -12.5]}").unwrap();
//! assert_eq!(meter.value, vec![-100.0, -12.5]);
//! ```
//!
//! ## Logging
//!
//! Decoding emits `trace` records for dispatch decisions and `debug` records
//! for rejected fragments through the [`log`] facade. Install any logger to
//! see them.
//!
//! ## Format
//!
//! See the [`grammar`] module for the accepted syntax.

pub mod de;
pub mod error;
pub mod grammar;
pub mod macros;
pub mod map;
pub mod options;
pub mod scan;
pub mod ser;
pub mod split;
pub mod value;

pub use de::{from_value, Deserializer};
pub use error::{Error, Result};
pub use map::TtpMap;
pub use options::ParseOptions;
pub use scan::split_array_values;
pub use ser::{to_value, ValueSerializer};
pub use split::{remove_key, remove_quotes, split_values};
pub use value::{Scalar, TtpValue};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Decode a wire fragment into a [`TtpValue`] with default options.
///
/// A leading `"key":` is dropped; the first remaining character picks a
/// control (`{`), an array (`[`) or a scalar.
///
/// # Examples
///
/// ```rust
/// use tesira_ttp::deserialize_value;
///
/// let value = deserialize_value("\"value\":{\"A\":1}").unwrap();
/// assert_eq!(value.get("A").unwrap().as_i64().unwrap(), 1);
/// ```
///
/// # Errors
///
/// Returns [`Error::Format`] if the fragment is empty, malformed, or nested
/// deeper than [`options::DEFAULT_MAX_DEPTH`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn deserialize_value(fragment: &str) -> Result<TtpValue> {
    Deserializer::default().deserialize_value(fragment)
}

/// Decode a wire fragment into a [`TtpValue`] with custom options.
///
/// # Errors
///
/// Returns [`Error::Format`] if the fragment is empty, malformed, or violates
/// the given options.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn deserialize_value_with_options(fragment: &str, options: &ParseOptions) -> Result<TtpValue> {
    Deserializer::new(options.clone()).deserialize_value(fragment)
}

/// Encode any `T: Serialize` as wire text.
///
/// # Examples
///
/// ```rust
/// use tesira_ttp::to_string;
///
/// assert_eq!(to_string(&vec![1, 2]).unwrap(), "[1 2]");
/// assert_eq!(to_string("Level1").unwrap(), "\"Level1\"");
/// ```
///
/// # Errors
///
/// Returns an error if the value has no TTP encoding (see [`to_value`]).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_value(value)?.to_wire())
}

/// Decode wire text into any `T: Deserialize`.
///
/// # Examples
///
/// ```rust
/// use tesira_ttp::from_str;
///
/// let levels: Vec<f64> = from_str("[-100.000000 -12.5]").unwrap();
/// assert_eq!(levels, vec![-100.0, -12.5]);
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid TTP or does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(deserialize_value(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Subscription {
        publish_token: String,
        value: Vec<f64>,
    }

    #[test]
    fn test_serialize_deserialize_struct() {
        let subscription = Subscription {
            publish_token: "MyLevel".to_string(),
            value: vec![-100.5, 0.25],
        };
        let wire = to_string(&subscription).unwrap();
        assert_eq!(wire, "{\"publishToken\":\"MyLevel\" \"value\":[-100.5 0.25]}");

        let back: Subscription = from_str(&wire).unwrap();
        assert_eq!(back, subscription);
    }

    #[test]
    fn test_value_roundtrip() {
        let wire = "[10 {\"A\":1 \"B\":\"two words\"} [] {}]";
        let value = deserialize_value(wire).unwrap();
        assert_eq!(value.to_wire(), wire);
        assert_eq!(deserialize_value(&value.to_wire()).unwrap(), value);
    }

    #[test]
    fn test_custom_options() {
        let options = ParseOptions::new().with_max_depth(1);
        assert!(deserialize_value_with_options("[1 2]", &options).is_ok());
        assert!(deserialize_value_with_options("[[1]]", &options).is_err());
    }

    #[test]
    fn test_from_str_reports_format_errors() {
        let result: Result<Vec<i64>> = from_str("[1 2");
        assert!(result.unwrap_err().is_format());
    }
}
