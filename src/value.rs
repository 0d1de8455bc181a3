//! Numeric values and their packed byte representation.

use core::fmt;
use core::num::TryFromIntError;

use zerocopy::byteorder::{ByteOrder, BE, F32, F64, I16, I32, I64, LE, U16, U32, U64};
use zerocopy::IntoBytes;

use crate::error::{Error, Result};
use crate::format::{Endianness, PackingDescriptor, PrimitiveKind};

/// A number passed to a write call, before it is fitted to a primitive kind.
///
/// `Int` is wide enough to hold every `i64` and every `u64`, so range checks happen when
/// the value is packed, not when it is converted.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Value {
    /// An integer.
    Int(i128),
    /// A floating-point number.
    Float(f64),
}

macro_rules! int_value_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Self::Int(value.into())
                }
            }
        )*
    };
}

int_value_from!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Self::Int(value as i128)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Int(value as i128)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

impl Value {
    fn to_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Float(x) => x,
        }
    }

    /// Rounds to single precision. Returns `None` if a finite value overflows to infinity.
    fn to_f32(self) -> Option<f32> {
        let x = self.to_f64();
        let y = x as f32;
        if y.is_infinite() && x.is_finite() {
            None
        } else {
            Some(y)
        }
    }
}

/// Packs `value` according to `desc` and appends the bytes to `out`.
///
/// On error nothing is appended.
pub(crate) fn pack(desc: PackingDescriptor, value: Value, out: &mut Vec<u8>) -> Result<()> {
    match desc.byte_order {
        Endianness::Little => pack_ordered::<LE>(desc.kind, value, out),
        Endianness::Big => pack_ordered::<BE>(desc.kind, value, out),
    }
}

fn pack_ordered<O: ByteOrder>(
    kind: PrimitiveKind,
    value: Value,
    out: &mut Vec<u8>,
) -> Result<()> {
    use PrimitiveKind as K;

    let out_of_range = || Error::ValueOutOfRange { value, kind };
    let fit = |_: TryFromIntError| out_of_range();

    match (kind, value) {
        (K::F32, value) => {
            let x = value.to_f32().ok_or_else(out_of_range)?;
            out.extend_from_slice(F32::<O>::new(x).as_bytes());
        }
        (K::F64, value) => out.extend_from_slice(F64::<O>::new(value.to_f64()).as_bytes()),
        (_, Value::Float(_)) => return Err(out_of_range()),
        (K::I8, Value::Int(n)) => out.push(i8::try_from(n).map_err(fit)? as u8),
        (K::U8, Value::Int(n)) => out.push(u8::try_from(n).map_err(fit)?),
        (K::I16, Value::Int(n)) => {
            out.extend_from_slice(I16::<O>::new(i16::try_from(n).map_err(fit)?).as_bytes())
        }
        (K::U16, Value::Int(n)) => {
            out.extend_from_slice(U16::<O>::new(u16::try_from(n).map_err(fit)?).as_bytes())
        }
        (K::I32, Value::Int(n)) => {
            out.extend_from_slice(I32::<O>::new(i32::try_from(n).map_err(fit)?).as_bytes())
        }
        (K::U32, Value::Int(n)) => {
            out.extend_from_slice(U32::<O>::new(u32::try_from(n).map_err(fit)?).as_bytes())
        }
        (K::I64, Value::Int(n)) => {
            out.extend_from_slice(I64::<O>::new(i64::try_from(n).map_err(fit)?).as_bytes())
        }
        (K::U64, Value::Int(n)) => {
            out.extend_from_slice(U64::<O>::new(u64::try_from(n).map_err(fit)?).as_bytes())
        }
    }

    Ok(())
}
