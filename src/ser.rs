//! Building TTP values from Rust data.
//!
//! [`ValueSerializer`] turns any `T: Serialize` into a [`TtpValue`] tree,
//! which then encodes with [`TtpValue::to_wire`]:
//!
//! - structs and maps become controls
//! - sequences and tuples become arrays
//! - strings and chars become quoted scalars
//! - numbers and booleans become bare scalars
//! - unit enum variants become bare scalars holding the variant name
//! - other enum variants become a one-key control `{"Variant":...}`
//!
//! TTP has no null, so `None` and `()` are rejected. Skip optional fields
//! with `#[serde(skip_serializing_if = "Option::is_none")]`.
//!
//! ```rust
//! use serde::Serialize;
//! use tesira_ttp::to_string;
//!
//! #[derive(Serialize)]
//! struct Gain { channel: u32, level: f64, label: &'static str }
//!
//! let wire = to_string(&Gain { channel: 1, level: -6.5, label: "Mic 1" }).unwrap();
//! assert_eq!(wire, "{\"channel\":1 \"level\":-6.5 \"label\":\"Mic 1\"}");
//! ```

use crate::{Error, Result, Scalar, TtpMap, TtpValue};
use serde::{ser, Serialize};

/// Serializer producing a [`TtpValue`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueSerializer;

/// Collects elements of sequences, tuples and tuple variants.
pub struct SerializeVec {
    vec: Vec<TtpValue>,
    variant: Option<&'static str>,
}

/// Collects fields of maps, structs and struct variants.
pub struct SerializeMap {
    map: TtpMap,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

/// Wraps `value` as `{"variant":value}`.
fn tag_variant(variant: &'static str, value: TtpValue) -> TtpValue {
    let mut map = TtpMap::with_capacity(1);
    map.insert(variant.to_string(), value);
    TtpValue::Control(map)
}

impl ser::Serializer for ValueSerializer {
    type Ok = TtpValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<TtpValue> {
        Ok(TtpValue::from(v))
    }

    fn serialize_i8(self, v: i8) -> Result<TtpValue> {
        Ok(TtpValue::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<TtpValue> {
        Ok(TtpValue::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<TtpValue> {
        Ok(TtpValue::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<TtpValue> {
        Ok(TtpValue::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<TtpValue> {
        Ok(TtpValue::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<TtpValue> {
        Ok(TtpValue::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<TtpValue> {
        Ok(TtpValue::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<TtpValue> {
        Ok(TtpValue::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<TtpValue> {
        Ok(TtpValue::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<TtpValue> {
        Ok(TtpValue::from(v))
    }

    fn serialize_char(self, v: char) -> Result<TtpValue> {
        Ok(TtpValue::Scalar(Scalar::string(v.encode_utf8(&mut [0; 4]))))
    }

    fn serialize_str(self, v: &str) -> Result<TtpValue> {
        Ok(TtpValue::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<TtpValue> {
        Ok(TtpValue::Array(v.iter().map(|&b| TtpValue::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<TtpValue> {
        Err(Error::unsupported_type("none"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<TtpValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<TtpValue> {
        Err(Error::unsupported_type("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<TtpValue> {
        Err(Error::unsupported_type(name))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<TtpValue> {
        Ok(TtpValue::raw(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<TtpValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<TtpValue>
    where
        T: ?Sized + Serialize,
    {
        Ok(tag_variant(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn finish(self) -> TtpValue {
        let array = TtpValue::Array(self.vec);
        match self.variant {
            Some(variant) => tag_variant(variant, array),
            None => array,
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: TtpMap::with_capacity(capacity),
            current_key: None,
            variant,
        }
    }

    fn field<T: ?Sized + Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn finish(self) -> TtpValue {
        let control = TtpValue::Control(self.map);
        match self.variant {
            Some(variant) => tag_variant(variant, control),
            None => control,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = TtpValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<TtpValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = TtpValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<TtpValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = TtpValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<TtpValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = TtpValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<TtpValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = TtpValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            TtpValue::Scalar(scalar) if scalar.is_string() => {
                self.current_key = Some(scalar.as_string()?);
                Ok(())
            }
            TtpValue::Scalar(scalar) => {
                self.current_key = Some(scalar.into_raw());
                Ok(())
            }
            other => Err(Error::type_mismatch("scalar key", other.kind())),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.field(&key, value)
    }

    fn end(self) -> Result<TtpValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = TtpValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<TtpValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = TtpValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<TtpValue> {
        Ok(self.finish())
    }
}

/// Convert any `T: Serialize` into a [`TtpValue`].
///
/// # Errors
///
/// [`Error::UnsupportedType`] for values with no wire form (`None`, `()`),
/// [`Error::TypeMismatch`] for map keys that are not scalars.
pub fn to_value<T>(value: &T) -> Result<TtpValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    enum Command {
        Mute,
        Set(f64),
        Route(u32, u32),
        Label { text: String },
    }

    #[test]
    fn test_primitives() {
        assert_eq!(to_value(&true).unwrap(), TtpValue::raw("true"));
        assert_eq!(to_value(&-3i32).unwrap(), TtpValue::raw("-3"));
        assert_eq!(to_value(&0.25f32).unwrap(), TtpValue::raw("0.25"));
        assert_eq!(to_value("Level1").unwrap(), TtpValue::from("Level1"));
        assert_eq!(to_value(&'x').unwrap(), TtpValue::from("x"));
    }

    #[test]
    fn test_sequences() {
        let value = to_value(&vec![1, 2, 3]).unwrap();
        assert_eq!(value.to_wire(), "[1 2 3]");
        let value = to_value(&(1, "a")).unwrap();
        assert_eq!(value.to_wire(), "[1 \"a\"]");
    }

    #[test]
    fn test_map_keys() {
        let mut map = BTreeMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        assert_eq!(to_value(&map).unwrap().to_wire(), "{\"a\":1 \"b\":2}");

        let mut numbered = BTreeMap::new();
        numbered.insert(1u32, "one");
        assert_eq!(to_value(&numbered).unwrap().to_wire(), "{\"1\":\"one\"}");
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(to_value(&Command::Mute).unwrap().to_wire(), "Mute");
        assert_eq!(to_value(&Command::Set(-6.0)).unwrap().to_wire(), "{\"Set\":-6}");
        assert_eq!(
            to_value(&Command::Route(1, 4)).unwrap().to_wire(),
            "{\"Route\":[1 4]}"
        );
        assert_eq!(
            to_value(&Command::Label {
                text: "Main".to_string()
            })
            .unwrap()
            .to_wire(),
            "{\"Label\":{\"text\":\"Main\"}}"
        );
    }

    #[test]
    fn test_null_is_unsupported() {
        assert!(matches!(
            to_value(&Option::<i32>::None),
            Err(Error::UnsupportedType(_))
        ));
        assert!(matches!(to_value(&()), Err(Error::UnsupportedType(_))));
        assert_eq!(to_value(&Some(5)).unwrap(), TtpValue::raw("5"));
    }
}
