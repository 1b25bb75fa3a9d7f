//! Marshaled attribute values.
//!
//! Reading an attribute produces one of these variants depending on the
//! attribute's external type and length: a scalar when the stored length is
//! one, a typed `Vec` otherwise, and always a single `Text` for char/string
//! attributes. Writing accepts the same set, so every value that can be read
//! back out can also be written in, at full width.

use serde::{Deserialize, Serialize};

use crate::types::NcType;

/// A scalar or homogeneous array value of one netCDF atomic type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Scalar signed 8-bit integer
    Byte(i8),
    /// Array of signed 8-bit integers
    Bytes(Vec<i8>),
    /// Scalar unsigned 8-bit integer
    Ubyte(u8),
    /// Array of unsigned 8-bit integers
    Ubytes(Vec<u8>),
    /// Scalar signed 16-bit integer
    Short(i16),
    /// Array of signed 16-bit integers
    Shorts(Vec<i16>),
    /// Scalar unsigned 16-bit integer
    Ushort(u16),
    /// Array of unsigned 16-bit integers
    Ushorts(Vec<u16>),
    /// Scalar signed 32-bit integer
    Int(i32),
    /// Array of signed 32-bit integers
    Ints(Vec<i32>),
    /// Scalar unsigned 32-bit integer
    Uint(u32),
    /// Array of unsigned 32-bit integers
    Uints(Vec<u32>),
    /// Scalar signed 64-bit integer, kept at full width
    Int64(i64),
    /// Array of signed 64-bit integers
    Int64s(Vec<i64>),
    /// Scalar unsigned 64-bit integer, kept at full width
    Uint64(u64),
    /// Array of unsigned 64-bit integers
    Uint64s(Vec<u64>),
    /// Scalar IEEE 32-bit float
    Float(f32),
    /// Array of IEEE 32-bit floats
    Floats(Vec<f32>),
    /// Scalar IEEE 64-bit float
    Double(f64),
    /// Array of IEEE 64-bit floats
    Doubles(Vec<f64>),
    /// Text value
    Text(String),
}

impl AttrValue {
    /// The netCDF atomic type this value is stored as.
    pub fn nc_type(&self) -> NcType {
        match self {
            AttrValue::Byte(_) | AttrValue::Bytes(_) => NcType::Byte,
            AttrValue::Ubyte(_) | AttrValue::Ubytes(_) => NcType::Ubyte,
            AttrValue::Short(_) | AttrValue::Shorts(_) => NcType::Short,
            AttrValue::Ushort(_) | AttrValue::Ushorts(_) => NcType::Ushort,
            AttrValue::Int(_) | AttrValue::Ints(_) => NcType::Int,
            AttrValue::Uint(_) | AttrValue::Uints(_) => NcType::Uint,
            AttrValue::Int64(_) | AttrValue::Int64s(_) => NcType::Int64,
            AttrValue::Uint64(_) | AttrValue::Uint64s(_) => NcType::Uint64,
            AttrValue::Float(_) | AttrValue::Floats(_) => NcType::Float,
            AttrValue::Double(_) | AttrValue::Doubles(_) => NcType::Double,
            AttrValue::Text(_) => NcType::Char,
        }
    }

    /// Number of stored elements; text counts characters as stored bytes.
    pub fn len(&self) -> usize {
        match self {
            AttrValue::Bytes(v) => v.len(),
            AttrValue::Ubytes(v) => v.len(),
            AttrValue::Shorts(v) => v.len(),
            AttrValue::Ushorts(v) => v.len(),
            AttrValue::Ints(v) => v.len(),
            AttrValue::Uints(v) => v.len(),
            AttrValue::Int64s(v) => v.len(),
            AttrValue::Uint64s(v) => v.len(),
            AttrValue::Floats(v) => v.len(),
            AttrValue::Doubles(v) => v.len(),
            AttrValue::Text(s) => s.len(),
            _ => 1,
        }
    }

    /// True when the value is empty (possible for arrays and text).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True for the scalar variants.
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            AttrValue::Bytes(_)
                | AttrValue::Ubytes(_)
                | AttrValue::Shorts(_)
                | AttrValue::Ushorts(_)
                | AttrValue::Ints(_)
                | AttrValue::Uints(_)
                | AttrValue::Int64s(_)
                | AttrValue::Uint64s(_)
                | AttrValue::Floats(_)
                | AttrValue::Doubles(_)
        )
    }
}

macro_rules! impl_from {
    ($ty:ty, $scalar:ident, $array:ident) => {
        impl From<$ty> for AttrValue {
            fn from(v: $ty) -> Self {
                AttrValue::$scalar(v)
            }
        }
        impl From<Vec<$ty>> for AttrValue {
            fn from(v: Vec<$ty>) -> Self {
                AttrValue::$array(v)
            }
        }
        impl From<&[$ty]> for AttrValue {
            fn from(v: &[$ty]) -> Self {
                AttrValue::$array(v.to_vec())
            }
        }
    };
}

impl_from!(i8, Byte, Bytes);
impl_from!(u8, Ubyte, Ubytes);
impl_from!(i16, Short, Shorts);
impl_from!(u16, Ushort, Ushorts);
impl_from!(i32, Int, Ints);
impl_from!(u32, Uint, Uints);
impl_from!(i64, Int64, Int64s);
impl_from!(u64, Uint64, Uint64s);
impl_from!(f32, Float, Floats);
impl_from!(f64, Double, Doubles);

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mapping() {
        assert_eq!(AttrValue::from(1i8).nc_type(), NcType::Byte);
        assert_eq!(AttrValue::from(1u16).nc_type(), NcType::Ushort);
        assert_eq!(AttrValue::from(vec![1i64, 2]).nc_type(), NcType::Int64);
        assert_eq!(AttrValue::from(1.5f64).nc_type(), NcType::Double);
        assert_eq!(AttrValue::from("hi").nc_type(), NcType::Char);
    }

    #[test]
    fn scalar_vs_array_shape() {
        assert!(AttrValue::from(3u32).is_scalar());
        assert!(!AttrValue::from(vec![3u32]).is_scalar());
        assert_eq!(AttrValue::from(vec![1i16, 2, 3]).len(), 3);
        assert_eq!(AttrValue::from(7.0f32).len(), 1);
        // text is a single value whatever its stored length
        let text = AttrValue::from("abcdef");
        assert!(text.is_scalar());
        assert_eq!(text.len(), 6);
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&AttrValue::Ints(vec![1, 2, 3])).unwrap();
        assert_eq!(json, "[1,2,3]");
        let json = serde_json::to_string(&AttrValue::Text("K".into())).unwrap();
        assert_eq!(json, "\"K\"");
    }
}
