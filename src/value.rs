//! The TTP value tree.
//!
//! A decoded response is a [`TtpValue`]: either a [`Scalar`] leaf holding raw
//! wire text, a `Control` (the protocol's keyed object, `{...}`) or an
//! `Array` (`[...]`).
//!
//! Scalars are not typed at parse time. The text is kept verbatim and read on
//! demand through the `as_*` accessors, so a value re-serializes exactly as it
//! arrived.
//!
//! ## Creating Values
//!
//! ```rust
//! use tesira_ttp::{Scalar, TtpValue};
//!
//! let level = TtpValue::from(-10.5);        // bare: -10.5
//! let tag = TtpValue::from("Level1");       // quoted: "Level1"
//! let mode = TtpValue::raw("LOGIC_ON");     // bare: LOGIC_ON
//!
//! assert_eq!(level.to_wire(), "-10.5");
//! assert_eq!(tag.to_wire(), "\"Level1\"");
//! assert_eq!(mode, TtpValue::Scalar(Scalar::new("LOGIC_ON")));
//! ```
//!
//! ## Reading Values
//!
//! ```rust
//! use tesira_ttp::deserialize_value;
//!
//! let response = deserialize_value("{\"value\":[-100.000000 -12.5]}").unwrap();
//! let second = response.get("value").unwrap().at(1).unwrap();
//! assert_eq!(second.as_f64().unwrap(), -12.5);
//! ```

use crate::{Error, Result, TtpMap};
use chrono::NaiveDateTime;
use regex::Regex;
use std::fmt::{self, Write};
use std::sync::OnceLock;

/// `chrono` layout of the wire date-time, `HH:mm:ss:MM:dd:yyyy`.
pub const DATETIME_FORMAT: &str = "%H:%M:%S:%m:%d:%Y";

fn escaped_string_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"\\"(.*?)\\""#).expect("escaped string pattern is valid"))
}

/// Appends `text` to `out`, escaping `"` and `\`.
fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
}

/// Resolves backslash escapes: `\x` becomes `x`.
pub(crate) fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            result.push(chars.next().unwrap_or('\\'));
        } else {
            result.push(ch);
        }
    }
    result
}

/// A leaf value holding the raw wire text.
///
/// A quoted scalar (`"Level1"`) and a bare one (`Level1`) are different
/// values with different encodings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scalar(String);

impl Scalar {
    /// Wraps raw wire text verbatim.
    ///
    /// Text starting with `{` or `[`, containing top-level whitespace, or
    /// empty does not survive a round trip as a scalar.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Scalar(raw.into())
    }

    /// Builds a quoted scalar, escaping `"` and `\` in `text`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tesira_ttp::Scalar;
    ///
    /// let scalar = Scalar::string("say \"hi\"");
    /// assert_eq!(scalar.raw(), "\"say \\\"hi\\\"\"");
    /// assert_eq!(scalar.as_string().unwrap(), "say \"hi\"");
    /// ```
    #[must_use]
    pub fn string(text: &str) -> Self {
        let mut raw = String::with_capacity(text.len() + 2);
        raw.push('"');
        escape_into(&mut raw, text);
        raw.push('"');
        Scalar(raw)
    }

    /// Raw wire text.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_raw(self) -> String {
        self.0
    }

    /// Returns `true` if the raw text is quote-delimited.
    ///
    /// The closing quote must not be escaped, so `"\"` is not a string.
    #[must_use]
    pub fn is_string(&self) -> bool {
        let raw = self.0.as_str();
        if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
            return false;
        }
        let body = &raw[1..raw.len() - 1];
        body.chars().rev().take_while(|&ch| ch == '\\').count() % 2 == 0
    }

    /// Text between the quotes, with backslash escapes resolved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for a bare scalar.
    pub fn as_string(&self) -> Result<String> {
        if self.is_string() {
            Ok(unescape(&self.0[1..self.0.len() - 1]))
        } else {
            Err(Error::type_mismatch("string", &self.0))
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] unless the raw text is an integer.
    pub fn as_i64(&self) -> Result<i64> {
        self.0
            .trim()
            .parse()
            .map_err(|_| Error::type_mismatch("integer", &self.0))
    }

    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] unless the raw text is a number.
    pub fn as_f64(&self) -> Result<f64> {
        self.0
            .trim()
            .parse()
            .map_err(|_| Error::type_mismatch("float", &self.0))
    }

    /// Reads `true` or `false`, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for any other text.
    pub fn as_bool(&self) -> Result<bool> {
        let text = self.0.trim();
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(Error::type_mismatch("bool", &self.0))
        }
    }

    /// Reads the wire date-time layout `HH:mm:ss:MM:dd:yyyy`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the raw text does not match the layout.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::{NaiveDate, Timelike};
    /// use tesira_ttp::Scalar;
    ///
    /// let time = Scalar::new("13:45:07:03:21:2024").as_datetime().unwrap();
    /// assert_eq!(time.date(), NaiveDate::from_ymd_opt(2024, 3, 21).unwrap());
    /// assert_eq!(time.hour(), 13);
    /// ```
    pub fn as_datetime(&self) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.0.trim(), DATETIME_FORMAT)
            .map_err(|_| Error::type_mismatch("date-time", &self.0))
    }

    /// Extracts every `\"...\"` group of the raw text, left to right.
    ///
    /// Used for values that pack several escaped strings into one scalar.
    /// Empty groups are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tesira_ttp::Scalar;
    ///
    /// let scalar = Scalar::string("\"01131947\"\"test\"\"\"");
    /// assert_eq!(scalar.string_values(), vec!["01131947", "test", ""]);
    /// ```
    #[must_use]
    pub fn string_values(&self) -> Vec<String> {
        escaped_string_pattern()
            .captures_iter(&self.0)
            .filter_map(|captures| captures.get(1))
            .map(|group| unescape(group.as_str()))
            .collect()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A decoded TTP value.
///
/// Equality is structural. Controls compare as maps, so key order does not
/// matter; arrays compare element by element.
#[derive(Clone, Debug, PartialEq)]
pub enum TtpValue {
    Scalar(Scalar),
    /// Keyed object, `{"key":value ...}`.
    Control(TtpMap),
    Array(Vec<TtpValue>),
}

impl TtpValue {
    /// Bare scalar holding `text` verbatim.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        TtpValue::Scalar(Scalar::new(text))
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, TtpValue::Scalar(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_control(&self) -> bool {
        matches!(self, TtpValue::Control(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, TtpValue::Array(_))
    }

    /// Name of the variant, as used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            TtpValue::Scalar(_) => "scalar",
            TtpValue::Control(_) => "control",
            TtpValue::Array(_) => "array",
        }
    }

    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            TtpValue::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_control(&self) -> Option<&TtpMap> {
        match self {
            TtpValue::Control(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&[TtpValue]> {
        match self {
            TtpValue::Array(items) => Some(items),
            _ => None,
        }
    }

    fn scalar(&self) -> Result<&Scalar> {
        self.as_scalar()
            .ok_or_else(|| Error::type_mismatch("scalar", self.kind()))
    }

    /// Child of a control.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent, [`Error::TypeMismatch`]
    /// if `self` is not a control.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tesira_ttp::{deserialize_value, Error};
    ///
    /// let value = deserialize_value("{\"mute\":true}").unwrap();
    /// assert!(value.get("mute").unwrap().as_bool().unwrap());
    /// assert_eq!(value.get("level"), Err(Error::key_not_found("level")));
    /// ```
    pub fn get(&self, key: &str) -> Result<&TtpValue> {
        match self {
            TtpValue::Control(map) => map.require(key),
            other => Err(Error::type_mismatch("control", other.kind())),
        }
    }

    /// Element of an array.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] past the end, [`Error::TypeMismatch`] if
    /// `self` is not an array.
    pub fn at(&self, index: usize) -> Result<&TtpValue> {
        match self {
            TtpValue::Array(items) => items
                .get(index)
                .ok_or_else(|| Error::index_out_of_range(index, items.len())),
            other => Err(Error::type_mismatch("array", other.kind())),
        }
    }

    /// Number of children of a control or array; `None` for scalars.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            TtpValue::Scalar(_) => None,
            TtpValue::Control(map) => Some(map.len()),
            TtpValue::Array(items) => Some(items.len()),
        }
    }

    /// Returns `true` for a scalar and for an empty control or array.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len().map_or(true, |len| len == 0)
    }

    /// See [`Scalar::is_string`]; `false` for non-scalars.
    #[must_use]
    pub fn is_string(&self) -> bool {
        self.as_scalar().is_some_and(Scalar::is_string)
    }

    /// See [`Scalar::as_string`].
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-scalars and bare scalars.
    pub fn as_string(&self) -> Result<String> {
        self.scalar()?.as_string()
    }

    /// See [`Scalar::as_i64`].
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-scalars and non-integer text.
    pub fn as_i64(&self) -> Result<i64> {
        self.scalar()?.as_i64()
    }

    /// See [`Scalar::as_f64`].
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-scalars and non-numeric text.
    pub fn as_f64(&self) -> Result<f64> {
        self.scalar()?.as_f64()
    }

    /// See [`Scalar::as_bool`].
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-scalars and other text.
    pub fn as_bool(&self) -> Result<bool> {
        self.scalar()?.as_bool()
    }

    /// See [`Scalar::as_datetime`].
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-scalars and text not in the wire layout.
    pub fn as_datetime(&self) -> Result<NaiveDateTime> {
        self.scalar()?.as_datetime()
    }

    /// See [`Scalar::string_values`].
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-scalars.
    pub fn string_values(&self) -> Result<Vec<String>> {
        Ok(self.scalar()?.string_values())
    }

    /// Encodes the value as wire text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tesira_ttp::ttp;
    ///
    /// let value = ttp!({"A": 1, "B": [1, 2]});
    /// assert_eq!(value.to_wire(), "{\"A\":1 \"B\":[1 2]}");
    /// ```
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TtpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TtpValue::Scalar(scalar) => f.write_str(scalar.raw()),
            TtpValue::Control(map) => {
                f.write_char('{')?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    let mut quoted = String::with_capacity(key.len() + 2);
                    quoted.push('"');
                    escape_into(&mut quoted, key);
                    quoted.push('"');
                    write!(f, "{quoted}:{value}")?;
                }
                f.write_char('}')
            }
            TtpValue::Array(items) => {
                f.write_char('[')?;
                for (i, value) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_char(']')
            }
        }
    }
}

impl TryFrom<&TtpValue> for i64 {
    type Error = Error;

    fn try_from(value: &TtpValue) -> Result<Self> {
        value.as_i64()
    }
}

impl TryFrom<&TtpValue> for f64 {
    type Error = Error;

    fn try_from(value: &TtpValue) -> Result<Self> {
        value.as_f64()
    }
}

impl TryFrom<&TtpValue> for bool {
    type Error = Error;

    fn try_from(value: &TtpValue) -> Result<Self> {
        value.as_bool()
    }
}

impl TryFrom<&TtpValue> for String {
    type Error = Error;

    fn try_from(value: &TtpValue) -> Result<Self> {
        value.as_string()
    }
}

impl TryFrom<&TtpValue> for NaiveDateTime {
    type Error = Error;

    fn try_from(value: &TtpValue) -> Result<Self> {
        value.as_datetime()
    }
}

// Numbers and booleans are sent bare, strings quoted.
macro_rules! impl_from_bare {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar(value.to_string())
                }
            }

            impl From<$ty> for TtpValue {
                fn from(value: $ty) -> Self {
                    TtpValue::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

impl_from_bare!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::string(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::string(&value)
    }
}

impl From<NaiveDateTime> for Scalar {
    fn from(value: NaiveDateTime) -> Self {
        Scalar(value.format(DATETIME_FORMAT).to_string())
    }
}

impl From<&str> for TtpValue {
    fn from(value: &str) -> Self {
        TtpValue::Scalar(Scalar::from(value))
    }
}

impl From<String> for TtpValue {
    fn from(value: String) -> Self {
        TtpValue::Scalar(Scalar::from(value))
    }
}

impl From<NaiveDateTime> for TtpValue {
    fn from(value: NaiveDateTime) -> Self {
        TtpValue::Scalar(Scalar::from(value))
    }
}

impl From<Scalar> for TtpValue {
    fn from(value: Scalar) -> Self {
        TtpValue::Scalar(value)
    }
}

impl From<Vec<TtpValue>> for TtpValue {
    fn from(value: Vec<TtpValue>) -> Self {
        TtpValue::Array(value)
    }
}

impl From<TtpMap> for TtpValue {
    fn from(value: TtpMap) -> Self {
        TtpValue::Control(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_string_scalar() {
        let value = TtpValue::from("test");
        assert_eq!(value.to_wire(), "\"test\"");
        assert_eq!(value.as_string().unwrap(), "test");
        assert!(matches!(value.as_i64(), Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_numeric_scalar() {
        assert_eq!(TtpValue::from(0).as_i64().unwrap(), 0);
        assert!(matches!(
            TtpValue::from(10).as_string(),
            Err(Error::TypeMismatch { .. })
        ));
        assert_eq!(TtpValue::from(-10.5).as_f64().unwrap(), -10.5);
        assert_eq!(TtpValue::from(3).as_f64().unwrap(), 3.0);
        assert!(TtpValue::from(2.5).as_i64().is_err());
    }

    #[test]
    fn test_quoted_number_is_not_a_number() {
        let value = TtpValue::from("10");
        assert!(value.as_i64().is_err());
        assert!(value.as_f64().is_err());
        assert_eq!(value.as_string().unwrap(), "10");
    }

    #[test]
    fn test_bool_scalar() {
        assert!(TtpValue::from(true).as_bool().unwrap());
        assert!(!TtpValue::raw("False").as_bool().unwrap());
        assert!(TtpValue::raw("1").as_bool().is_err());
        assert!(TtpValue::from("true").as_bool().is_err());
    }

    #[test]
    fn test_quoted_and_bare_are_distinct() {
        assert_ne!(TtpValue::from("test"), TtpValue::raw("test"));
        assert_eq!(TtpValue::raw("\"test\""), TtpValue::from("test"));
    }

    #[test]
    fn test_escaping() {
        let scalar = Scalar::string("a\\b\"c");
        assert_eq!(scalar.raw(), "\"a\\\\b\\\"c\"");
        assert_eq!(scalar.as_string().unwrap(), "a\\b\"c");
    }

    #[test]
    fn test_lone_quote_is_not_a_string() {
        assert!(!Scalar::new("\"").is_string());
        assert!(Scalar::new("\"\"").is_string());
        assert_eq!(Scalar::new("\"\"").as_string().unwrap(), "");
    }

    #[test]
    fn test_escaped_closing_quote_is_not_a_string() {
        assert!(!Scalar::new("\"\\\"").is_string());
        assert!(Scalar::new("\"a\\\\\"").is_string());
        assert_eq!(Scalar::new("\"a\\\\\"").as_string().unwrap(), "a\\");
        assert!(!Scalar::new("\"a\\\\\\\"").is_string());
        assert!(TtpValue::raw("\"\\\"").as_string().is_err());
    }

    #[test]
    fn test_control_keys_are_escaped() {
        let mut map = TtpMap::new();
        map.insert("a\"b".to_string(), TtpValue::from(1));
        map.insert("dir\\".to_string(), TtpValue::from(2));
        assert_eq!(
            TtpValue::Control(map).to_wire(),
            "{\"a\\\"b\":1 \"dir\\\\\":2}"
        );
    }

    #[test]
    fn test_datetime_roundtrip() {
        let time = NaiveDate::from_ymd_opt(2023, 11, 5)
            .unwrap()
            .and_hms_opt(8, 3, 9)
            .unwrap();
        let value = TtpValue::from(time);
        assert_eq!(value.to_wire(), "08:03:09:11:05:2023");
        assert_eq!(value.as_datetime().unwrap(), time);
        assert!(TtpValue::raw("2023-11-05").as_datetime().is_err());
    }

    #[test]
    fn test_string_values() {
        let value = TtpValue::from("\"01131947\"\"test\"\"\"");
        assert_eq!(
            value.string_values().unwrap(),
            vec!["01131947".to_string(), "test".to_string(), String::new()]
        );
        assert!(TtpValue::raw("plain").string_values().unwrap().is_empty());
    }

    #[test]
    fn test_get_and_at() {
        let mut map = TtpMap::new();
        map.insert("value".to_string(), TtpValue::Array(vec![TtpValue::from(1)]));
        let value = TtpValue::Control(map);

        let inner = value.get("value").unwrap();
        assert_eq!(inner.at(0).unwrap(), &TtpValue::from(1));
        assert_eq!(inner.at(1), Err(Error::index_out_of_range(1, 1)));
        assert_eq!(value.get("missing"), Err(Error::key_not_found("missing")));
        assert!(matches!(inner.get("value"), Err(Error::TypeMismatch { .. })));
        assert!(matches!(value.at(0), Err(Error::TypeMismatch { .. })));
        assert!(matches!(value.as_f64(), Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_serialize_nested() {
        let mut map = TtpMap::new();
        map.insert("A".to_string(), TtpValue::from(1));
        map.insert("B".to_string(), TtpValue::from(2));
        let value = TtpValue::Array(vec![
            TtpValue::from(10),
            TtpValue::Control(map),
            TtpValue::Array(vec![TtpValue::from(1), TtpValue::from(2)]),
        ]);
        assert_eq!(value.to_wire(), "[10 {\"A\":1 \"B\":2} [1 2]]");
        assert_eq!(value.to_string(), value.to_wire());
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(TtpValue::Array(vec![]).to_wire(), "[]");
        assert_eq!(TtpValue::Control(TtpMap::new()).to_wire(), "{}");
        assert!(TtpValue::Array(vec![]).is_empty());
        assert_eq!(TtpValue::from(1).len(), None);
    }

    #[test]
    fn test_try_from() {
        let value = TtpValue::from(42);
        assert_eq!(i64::try_from(&value).unwrap(), 42);
        assert!(String::try_from(&value).is_err());
        assert!(bool::try_from(&TtpValue::from(false)).is_ok());
    }
}
