//! The kinds of value which can be converted into a bit vector.
use std::borrow::Cow;

use super::BitVector;

/// Something which can be assigned to (or combined with) a
/// [`BitVector`].
///
/// Integers are held as a sign and a magnitude so that every native
/// integer type, including `u128` and `i128::MIN`, is representable.
#[derive(Clone, Debug)]
pub enum Value<'a> {
    Integer { negative: bool, magnitude: u128 },
    /// A decimal literal, or a binary, octal or hexadecimal literal
    /// carrying a `0b`, `0o` or `0x` marker.
    Text(Cow<'a, str>),
    Vector(&'a BitVector),
    /// Booleans are not integers here; converting one fails.
    Boolean(bool),
}

impl Value<'_> {
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Value::Integer { .. } => "int",
            Value::Text(_) => "str",
            Value::Vector(_) => "BitVector",
            Value::Boolean(_) => "bool",
        }
    }
}

/// A native integer type, split into a sign and a magnitude.
pub(crate) trait NativeInteger: Copy {
    fn sign_and_magnitude(self) -> (bool, u128);
}

/// This macro implements conversions from signed native types to
/// [`Value`].
macro_rules! from_signed_native_type {
    ($($from:ty)*) => {
        $(
            impl NativeInteger for $from {
                fn sign_and_magnitude(self) -> (bool, u128) {
                    (self < 0, self.unsigned_abs() as u128)
                }
            }

            impl From<$from> for Value<'_> {
                fn from(n: $from) -> Self {
                    let (negative, magnitude) = n.sign_and_magnitude();
                    Value::Integer {
                        negative,
                        magnitude,
                    }
                }
            }
        )*
    }
}

/// This macro implements conversions from unsigned native types to
/// [`Value`].
macro_rules! from_unsigned_native_type {
    ($($from:ty)*) => {
        $(
            impl NativeInteger for $from {
                fn sign_and_magnitude(self) -> (bool, u128) {
                    (false, self as u128)
                }
            }

            impl From<$from> for Value<'_> {
                fn from(n: $from) -> Self {
                    Value::Integer {
                        negative: false,
                        magnitude: n as u128,
                    }
                }
            }
        )*
    }
}

from_signed_native_type!(i8 i16 i32 i64 i128 isize);
from_unsigned_native_type!(u8 u16 u32 u64 u128 usize);

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Text(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::Text(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Text(Cow::Owned(s))
    }
}

impl<'a> From<&'a BitVector> for Value<'a> {
    fn from(v: &'a BitVector) -> Self {
        Value::Vector(v)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
