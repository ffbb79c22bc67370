//! Pre-encode check for floats JSON cannot carry.
//!
//! `serde_json` writes NaN and ±infinity as `null`, which either fails to decode later or
//! decodes as a different value (`Some(NaN)` comes back as `None`). The check walks the
//! value through a serializer that writes nothing and rejects non-finite floats, naming
//! the struct field path where it found them.

use serde::ser::{self, Serialize, Serializer};
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum FloatCheckError {
    #[error("non-finite float {value} at `{path}` cannot be stored in a snapshot")]
    NonFinite { path: String, value: f64 },

    #[error("{0}")]
    Custom(String),
}

impl ser::Error for FloatCheckError {
    fn custom<T: Display>(msg: T) -> Self {
        FloatCheckError::Custom(msg.to_string())
    }
}

/// Fails if `value` contains a NaN or infinite `f32`/`f64` anywhere in its graph.
pub(crate) fn ensure_finite<T: Serialize + ?Sized>(value: &T) -> Result<(), FloatCheckError> {
    value.serialize(&mut FiniteFloats::default())
}

#[derive(Default)]
struct FiniteFloats {
    path: Vec<&'static str>,
}

impl FiniteFloats {
    fn check(&self, value: f64) -> Result<(), FloatCheckError> {
        if value.is_finite() {
            return Ok(());
        }
        let path = if self.path.is_empty() {
            "<root>".to_string()
        } else {
            self.path.join(".")
        };
        Err(FloatCheckError::NonFinite { path, value })
    }

    fn field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), FloatCheckError> {
        self.path.push(key);
        let result = value.serialize(&mut *self);
        self.path.pop();
        result
    }
}

impl<'a> Serializer for &'a mut FiniteFloats {
    type Ok = ();
    type Error = FloatCheckError;

    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_f32(self, v: f32) -> Result<(), FloatCheckError> {
        self.check(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), FloatCheckError> {
        self.check(v)
    }

    fn serialize_bool(self, _v: bool) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_i8(self, _v: i8) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_i16(self, _v: i16) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_i32(self, _v: i32) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_i64(self, _v: i64) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_i128(self, _v: i128) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_u8(self, _v: u8) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_u16(self, _v: u16) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_u32(self, _v: u32) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_u64(self, _v: u64) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_u128(self, _v: u128) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_char(self, _v: char) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_str(self, _v: &str) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_none(self) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), FloatCheckError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<(), FloatCheckError> {
        Ok(())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), FloatCheckError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<(), FloatCheckError> {
        self.field(variant, value)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, FloatCheckError> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, FloatCheckError> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, FloatCheckError> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, FloatCheckError> {
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, FloatCheckError> {
        Ok(self)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, FloatCheckError> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, FloatCheckError> {
        Ok(self)
    }
}

impl<'a> ser::SerializeSeq for &'a mut FiniteFloats {
    type Ok = ();
    type Error = FloatCheckError;

    fn serialize_element<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<(), FloatCheckError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), FloatCheckError> {
        Ok(())
    }
}

impl<'a> ser::SerializeTuple for &'a mut FiniteFloats {
    type Ok = ();
    type Error = FloatCheckError;

    fn serialize_element<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<(), FloatCheckError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), FloatCheckError> {
        Ok(())
    }
}

impl<'a> ser::SerializeTupleStruct for &'a mut FiniteFloats {
    type Ok = ();
    type Error = FloatCheckError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<(), FloatCheckError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), FloatCheckError> {
        Ok(())
    }
}

impl<'a> ser::SerializeTupleVariant for &'a mut FiniteFloats {
    type Ok = ();
    type Error = FloatCheckError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<(), FloatCheckError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), FloatCheckError> {
        Ok(())
    }
}

impl<'a> ser::SerializeMap for &'a mut FiniteFloats {
    type Ok = ();
    type Error = FloatCheckError;

    fn serialize_key<T: Serialize + ?Sized>(
        &mut self,
        key: &T,
    ) -> Result<(), FloatCheckError> {
        key.serialize(&mut **self)
    }

    fn serialize_value<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<(), FloatCheckError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), FloatCheckError> {
        Ok(())
    }
}

impl<'a> ser::SerializeStruct for &'a mut FiniteFloats {
    type Ok = ();
    type Error = FloatCheckError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), FloatCheckError> {
        self.field(key, value)
    }

    fn end(self) -> Result<(), FloatCheckError> {
        Ok(())
    }
}

impl<'a> ser::SerializeStructVariant for &'a mut FiniteFloats {
    type Ok = ();
    type Error = FloatCheckError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), FloatCheckError> {
        self.field(key, value)
    }

    fn end(self) -> Result<(), FloatCheckError> {
        Ok(())
    }
}
