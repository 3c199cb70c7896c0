//! TTP deserialization.
//!
//! Two layers live here:
//!
//! - [`Deserializer`] turns wire text into a [`TtpValue`] tree. It looks at
//!   the first significant character of a fragment and builds a control
//!   (`{`), an array (`[`) or a scalar (anything else), recursing through
//!   [`split_values`] and [`split_array_values`].
//! - [`from_value`] feeds a tree into any `T: Deserialize`, so a device class
//!   can read a response straight into a typed struct.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Deserialize;
//! use tesira_ttp::{deserialize_value, from_str};
//!
//! let tree = deserialize_value("\"value\":{\"deviceId\":0 \"classCode\":0}").unwrap();
//! assert_eq!(tree.get("classCode").unwrap().as_i64().unwrap(), 0);
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! #[serde(rename_all = "camelCase")]
//! struct Address { device_id: u32, class_code: u32 }
//!
//! let address: Address = from_str("{\"deviceId\":0 \"classCode\":7}").unwrap();
//! assert_eq!(address, Address { device_id: 0, class_code: 7 });
//! ```

use crate::scan::split_array_values;
use crate::split::{remove_key, split_values};
use crate::value::unescape;
use crate::{Error, ParseOptions, Result, Scalar, TtpMap, TtpValue};
use log::{debug, trace};
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;

fn reject(msg: &str, fragment: &str) -> Error {
    debug!("rejecting TTP fragment: {msg} in `{fragment}`");
    Error::format(msg, fragment)
}

/// Recursive-descent decoder from wire text to [`TtpValue`].
///
/// Holds only its options; each call works on local state, so one
/// deserializer can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Deserializer {
    options: ParseOptions,
}

impl Deserializer {
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Deserializer { options }
    }

    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Decodes one fragment, discarding a leading `"key":` if present.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] for empty or malformed text, or nesting deeper than
    /// [`ParseOptions::max_depth`].
    pub fn deserialize_value(&self, fragment: &str) -> Result<TtpValue> {
        self.parse(fragment, 0)
    }

    /// Decodes a `{...}` fragment.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] if the braces are missing, an item has no key, or a
    /// key repeats while [`ParseOptions::reject_duplicate_keys`] is set.
    pub fn deserialize_control(&self, fragment: &str) -> Result<TtpValue> {
        self.parse_control(fragment, 0)
    }

    /// Decodes a `[...]` fragment.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] if the brackets are missing or an element is malformed.
    pub fn deserialize_array(&self, fragment: &str) -> Result<TtpValue> {
        self.parse_array(fragment, 0)
    }

    fn parse(&self, fragment: &str, depth: usize) -> Result<TtpValue> {
        let (_, rest) = remove_key(fragment);

        match rest.chars().next() {
            None => Err(reject("empty fragment", fragment)),
            Some('{') => self.parse_control(rest, depth),
            Some('[') => self.parse_array(rest, depth),
            Some(_) => {
                trace!("scalar `{rest}` at depth {depth}");
                Ok(TtpValue::Scalar(Scalar::new(rest)))
            }
        }
    }

    fn enter(&self, fragment: &str, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            return Err(reject(
                &format!("nesting deeper than {}", self.options.max_depth),
                fragment,
            ));
        }
        Ok(depth)
    }

    fn parse_control(&self, fragment: &str, depth: usize) -> Result<TtpValue> {
        let trimmed = fragment.trim();
        let inner = trimmed
            .strip_prefix('{')
            .ok_or_else(|| reject("expected `{`", fragment))?
            .strip_suffix('}')
            .ok_or_else(|| reject("expected `}`", fragment))?;
        let depth = self.enter(fragment, depth)?;
        trace!("control at depth {depth}");

        let mut map = TtpMap::new();
        for item in split_values(inner) {
            let (key, rest) = remove_key(&item);
            let key = unescape(key.ok_or_else(|| reject("missing key", &item))?);
            if self.options.reject_duplicate_keys && map.contains_key(&key) {
                return Err(reject(&format!("duplicate key \"{key}\""), fragment));
            }
            let value = self.parse(rest, depth)?;
            map.insert(key, value);
        }
        Ok(TtpValue::Control(map))
    }

    fn parse_array(&self, fragment: &str, depth: usize) -> Result<TtpValue> {
        let trimmed = fragment.trim();
        let inner = trimmed
            .strip_prefix('[')
            .ok_or_else(|| reject("expected `[`", fragment))?
            .strip_suffix(']')
            .ok_or_else(|| reject("expected `]`", fragment))?;
        let depth = self.enter(fragment, depth)?;
        trace!("array at depth {depth}");

        split_array_values(inner)
            .map(|token| self.parse(&token, depth))
            .collect::<Result<Vec<_>>>()
            .map(TtpValue::Array)
    }
}

/// Deserialize an instance of `T` from a decoded value tree.
///
/// Quoted scalars are read as strings. Bare scalars are offered as a bool,
/// then an `i64`, then a `u64`, then a float, and otherwise as their raw text. Controls
/// read as maps or structs, arrays as sequences.
///
/// # Errors
///
/// Returns an error if the tree does not fit the shape of `T`.
pub fn from_value<T>(value: TtpValue) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<TtpValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<TtpValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, TtpValue>,
    value: Option<TtpValue>,
}

impl MapDeserializer {
    fn new(map: TtpMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: TtpValue,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(self.variant.into_deserializer())?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: TtpValue,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Err(Error::type_mismatch("unit variant", self.value.kind()))
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TtpValue::Array(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            other => Err(Error::type_mismatch("tuple variant", other.kind())),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TtpValue::Control(map) => visitor.visit_map(MapDeserializer::new(map)),
            other => Err(Error::type_mismatch("struct variant", other.kind())),
        }
    }
}

/// Text of a scalar as a plain string: unquoted if quoted, raw otherwise.
fn scalar_text(scalar: Scalar) -> Result<String> {
    if scalar.is_string() {
        scalar.as_string()
    } else {
        Ok(scalar.into_raw())
    }
}

struct ValueDeserializer {
    value: TtpValue,
}

impl ValueDeserializer {
    fn new(value: TtpValue) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TtpValue::Scalar(scalar) => {
                if scalar.is_string() {
                    visitor.visit_string(scalar.as_string()?)
                } else if let Ok(b) = scalar.as_bool() {
                    visitor.visit_bool(b)
                } else if let Ok(i) = scalar.as_i64() {
                    visitor.visit_i64(i)
                } else if let Ok(u) = scalar.raw().trim().parse::<u64>() {
                    visitor.visit_u64(u)
                } else if let Ok(f) = scalar.as_f64() {
                    visitor.visit_f64(f)
                } else {
                    visitor.visit_string(scalar.into_raw())
                }
            }
            TtpValue::Control(map) => visitor.visit_map(MapDeserializer::new(map)),
            TtpValue::Array(items) => visitor.visit_seq(SeqDeserializer::new(items)),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TtpValue::Scalar(scalar) => visitor.visit_string(scalar_text(scalar)?),
            other => Err(Error::type_mismatch("string", other.kind())),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TtpValue::Scalar(scalar) => visitor.visit_enum(scalar_text(scalar)?.into_deserializer()),
            TtpValue::Control(map) if map.len() == 1 => {
                let mut entries = map.into_iter();
                match entries.next() {
                    Some((variant, value)) => {
                        visitor.visit_enum(EnumDeserializer { variant, value })
                    }
                    None => Err(Error::custom("Expected enum variant")),
                }
            }
            other => Err(Error::type_mismatch("enum", other.kind())),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}
