#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Fixed binary layouts
//!
//! Packs and unpacks flat buffers described by a pattern of field descriptors.
//!
//! # Encoding Rules
//!
//! - **Integers**: `u8`, `u16`, `u32`, `u64`, big-endian, no padding
//! - **Bytes**: raw bytes, no length prefix; at most one per decodable pattern
//! - **Fields**: written consecutively in pattern order
//!
//! Decoding is strict: every byte of the buffer must be consumed by the
//! pattern, otherwise the buffer is rejected as malformed.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Error, Result};

/// A field descriptor in a binary pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// 8-bit unsigned integer
    U8,
    /// 16-bit big-endian unsigned integer
    U16,
    /// 32-bit big-endian unsigned integer
    U32,
    /// 64-bit big-endian unsigned integer
    U64,
    /// Variable-length raw bytes
    Bytes,
}

impl FieldType {
    /// Encoded width of a fixed-size field, `None` for `Bytes`.
    #[must_use]
    pub const fn width(self) -> Option<usize> {
        match self {
            FieldType::U8 => Some(1),
            FieldType::U16 => Some(2),
            FieldType::U32 => Some(4),
            FieldType::U64 => Some(8),
            FieldType::Bytes => None,
        }
    }
}

/// A decoded (or to-be-encoded) field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// 8-bit unsigned integer
    U8(u8),
    /// 16-bit unsigned integer
    U16(u16),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit unsigned integer
    U64(u64),
    /// Raw bytes
    Bytes(Vec<u8>),
}

impl Value {
    fn field_type(&self) -> FieldType {
        match self {
            Value::U8(_) => FieldType::U8,
            Value::U16(_) => FieldType::U16,
            Value::U32(_) => FieldType::U32,
            Value::U64(_) => FieldType::U64,
            Value::Bytes(_) => FieldType::Bytes,
        }
    }

    fn encoded_len(&self) -> usize {
        match self {
            Value::Bytes(b) => b.len(),
            other => other.field_type().width().unwrap_or(0),
        }
    }

    /// The bytes of a `Bytes` value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Any integer value widened to `u64`.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U8(v) => Some(u64::from(*v)),
            Value::U16(v) => Some(u64::from(*v)),
            Value::U32(v) => Some(u64::from(*v)),
            Value::U64(v) => Some(*v),
            Value::Bytes(_) => None,
        }
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(bytes.to_vec())
    }
}

/// Pack `values` according to `pattern`.
///
/// The output is exactly the sum of the field widths, with each `Bytes`
/// field contributing its own length.
///
/// # Errors
/// Returns `MalformedInput` if the value count differs from the pattern
/// length or a value does not match its field descriptor.
pub fn dump(pattern: &[FieldType], values: &[Value]) -> Result<Vec<u8>> {
    if pattern.len() != values.len() {
        return Err(Error::MalformedInput(format!(
            "pattern has {} fields but {} values were given",
            pattern.len(),
            values.len()
        )));
    }

    let size = values.iter().map(Value::encoded_len).sum();
    let mut buf = BytesMut::with_capacity(size);

    for (i, (field, value)) in pattern.iter().zip(values.iter()).enumerate() {
        match (field, value) {
            (FieldType::U8, Value::U8(v)) => buf.put_u8(*v),
            (FieldType::U16, Value::U16(v)) => buf.put_u16(*v),
            (FieldType::U32, Value::U32(v)) => buf.put_u32(*v),
            (FieldType::U64, Value::U64(v)) => buf.put_u64(*v),
            (FieldType::Bytes, Value::Bytes(b)) => buf.put_slice(b),
            (expected, got) => {
                return Err(Error::MalformedInput(format!(
                    "field {} expects {:?}, got {:?}",
                    i,
                    expected,
                    got.field_type()
                )));
            }
        }
    }

    Ok(buf.to_vec())
}

/// Unpack `buffer` according to `pattern`.
///
/// A single `Bytes` field receives every byte not claimed by the fixed-width
/// fields, so it consumes the remainder of the buffer when it comes last.
///
/// # Errors
/// Returns `InvalidParameter` if the pattern holds more than one `Bytes`
/// field, and `MalformedInput` if the buffer is not consumed exactly.
pub fn load(pattern: &[FieldType], buffer: &[u8]) -> Result<Vec<Value>> {
    let variable_fields = pattern.iter().filter(|f| f.width().is_none()).count();
    if variable_fields > 1 {
        return Err(Error::InvalidParameter(format!(
            "pattern {:?} has {} variable-length fields, at most one is decodable",
            pattern, variable_fields
        )));
    }

    let fixed: usize = pattern.iter().filter_map(|f| f.width()).sum();
    let incomplete = || {
        Error::MalformedInput(format!(
            "incomplete buffer parse: {} bytes using {:?}",
            buffer.len(),
            pattern
        ))
    };

    let variable_len = match buffer.len().checked_sub(fixed) {
        Some(rest) if variable_fields == 1 => rest,
        Some(0) => 0,
        _ => return Err(incomplete()),
    };

    let mut buf = buffer;
    let mut values = Vec::with_capacity(pattern.len());

    for field in pattern {
        let value = match field {
            FieldType::U8 => Value::U8(buf.get_u8()),
            FieldType::U16 => Value::U16(buf.get_u16()),
            FieldType::U32 => Value::U32(buf.get_u32()),
            FieldType::U64 => Value::U64(buf.get_u64()),
            FieldType::Bytes => {
                let (head, tail) = buf.split_at(variable_len);
                buf = tail;
                Value::Bytes(head.to_vec())
            }
        };
        values.push(value);
    }

    if buf.has_remaining() {
        return Err(incomplete());
    }
    Ok(values)
}

/// A fixed-width unsigned integer with a big-endian wire form.
pub trait BigEndianInt: Copy + Sized {
    /// Encoded width in bytes
    const WIDTH: usize;

    /// Append the big-endian encoding to `buf`.
    fn put(self, buf: &mut BytesMut);

    /// Read one value from the front of `buf`.
    fn get(buf: &mut &[u8]) -> Self;
}

macro_rules! impl_big_endian_int {
    ($ty:ty, $width:expr, $put:ident, $get:ident) => {
        impl BigEndianInt for $ty {
            const WIDTH: usize = $width;

            fn put(self, buf: &mut BytesMut) {
                buf.$put(self);
            }

            fn get(buf: &mut &[u8]) -> Self {
                buf.$get()
            }
        }
    };
}

impl_big_endian_int!(u8, 1, put_u8, get_u8);
impl_big_endian_int!(u16, 2, put_u16, get_u16);
impl_big_endian_int!(u32, 4, put_u32, get_u32);
impl_big_endian_int!(u64, 8, put_u64, get_u64);

/// Pack a homogeneous run of integers.
#[must_use]
pub fn dump_array<T: BigEndianInt>(values: &[T]) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(values.len().saturating_mul(T::WIDTH));
    for &v in values {
        v.put(&mut buf);
    }
    buf.to_vec()
}

/// Unpack a homogeneous run of integers.
///
/// # Errors
/// Returns `MalformedInput` if the buffer length is not a multiple of the
/// element width.
pub fn load_array<T: BigEndianInt>(buffer: &[u8]) -> Result<Vec<T>> {
    if buffer.len() % T::WIDTH != 0 {
        return Err(Error::MalformedInput(format!(
            "buffer of {} bytes is not a multiple of {}",
            buffer.len(),
            T::WIDTH
        )));
    }

    let mut buf = buffer;
    let mut values = Vec::with_capacity(buffer.len() / T::WIDTH);
    while buf.has_remaining() {
        values.push(T::get(&mut buf));
    }
    Ok(values)
}
