//! Fixed-width two's-complement binary values whose arithmetic is
//! carried out by simulated boolean logic.
//!
//! A [`BitVector`] has a width and a signedness which are fixed when
//! it is created.  Its bits are stored most significant first, but
//! (as in hardware documentation) they are *indexed* from the least
//! significant end; see [`BitVector::bit`] and [`BitVector::slice`].
//!
//! Values that do not fit are truncated to the width, so arithmetic
//! wraps around exactly as it would in a register of that size.
use std::fmt::{self, Debug, Formatter};

use serde::Serialize;

use crate::bit::Bit;

mod arith;
mod bitwise;
mod compare;
mod convert;
mod error;
mod format;
mod index;
mod ops;
mod value;

#[cfg(test)]
mod tests;

pub use convert::Radix;
pub use error::{BitValueError, ConversionFailed};
pub use index::{BitRange, BitSlice};
pub use value::Value;
use value::NativeInteger;

/// The sign of a number (mathematically, sgn(x)).  Unsigned vectors
/// are never negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signum {
    Negative = -1,
    Zero = 0,
    Positive = 1,
}

#[derive(Clone, Serialize)]
pub struct BitVector {
    width: usize,
    signed: bool,
    /// Exactly `width` bits, most significant first.
    bits: Vec<Bit>,
}

impl BitVector {
    /// Creates a vector of `width` bits holding `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use base::BitVector;
    /// let v = BitVector::new(-1, 4, true).expect("valid value");
    /// assert_eq!(v.bin(), "0b1111");
    /// assert_eq!(v.dec(), "-1");
    /// ```
    pub fn new<'a, V: Into<Value<'a>>>(
        value: V,
        width: usize,
        signed: bool,
    ) -> Result<BitVector, BitValueError> {
        if width == 0 {
            return Err(BitValueError::Width(width));
        }
        let bits = convert::convert(&value.into(), width, signed)?;
        Ok(BitVector {
            width,
            signed,
            bits,
        })
    }

    pub fn zero(width: usize, signed: bool) -> Result<BitVector, BitValueError> {
        BitVector::new(0, width, signed)
    }

    /// Creates a signed vector just wide enough to hold `value`: the
    /// bits of its magnitude plus a sign bit.  Binary, octal and
    /// hexadecimal literals are read as non-negative numbers.
    ///
    /// ```
    /// use base::BitVector;
    /// let v = BitVector::fitted("0xFF").expect("valid literal");
    /// assert_eq!(v.width(), 9);
    /// assert_eq!(v.dec(), "255");
    /// ```
    pub fn fitted<'a, V: Into<Value<'a>>>(value: V) -> Result<BitVector, BitValueError> {
        let (negative, magnitude) = convert::signed_magnitude(&value.into())?;
        let mut bits = Vec::with_capacity(magnitude.len() + 2);
        bits.push(Bit::Zero);
        if magnitude.is_empty() {
            bits.push(Bit::Zero);
        }
        bits.extend(magnitude);
        if negative {
            bits = arith::negate(&bits);
        }
        Ok(BitVector {
            width: bits.len(),
            signed: true,
            bits,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// The stored bits, most significant first.
    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    /// Replaces the stored value.  The width and signedness do not
    /// change; if `value` cannot be converted, `self` is unchanged.
    pub fn set<'a, V: Into<Value<'a>>>(&mut self, value: V) -> Result<(), BitValueError> {
        let bits = self.convert_operand(&value.into())?;
        self.bits = bits;
        Ok(())
    }

    /// Converts `value` to the width and signedness of `self`, for use
    /// as the right-hand side of an operation.
    pub fn operand<'a, V: Into<Value<'a>>>(&self, value: V) -> Result<BitVector, BitValueError> {
        let bits = self.convert_operand(&value.into())?;
        Ok(self.with_bits(bits))
    }

    pub fn sign_bit(&self) -> Bit {
        self.bits[0]
    }

    pub fn is_negative(&self) -> bool {
        self.signed && self.bits[0] == Bit::One
    }

    pub fn is_zero(&self) -> bool {
        arith::is_zero(&self.bits)
    }

    /// True if any bit is set.
    pub fn to_bool(&self) -> bool {
        !self.is_zero()
    }

    pub fn signum(&self) -> Signum {
        if self.is_zero() {
            Signum::Zero
        } else if self.is_negative() {
            Signum::Negative
        } else {
            Signum::Positive
        }
    }

    /// A copy of `self` with `plus` semantics: same value, same shape.
    pub fn plus(&self) -> BitVector {
        self.clone()
    }

    /// The integer value: signed if this is a signed vector whose
    /// sign bit is set, otherwise the unsigned magnitude.
    pub fn to_i128(&self) -> Result<i128, ConversionFailed> {
        let negative = self.is_negative();
        let magnitude_bits = if negative {
            arith::negate(&self.bits)
        } else {
            self.bits.clone()
        };
        let overflow = if negative {
            ConversionFailed::TooSmall
        } else {
            ConversionFailed::TooLarge
        };
        let mut magnitude: u128 = 0;
        for bit in magnitude_bits {
            magnitude = magnitude
                .checked_mul(2)
                .and_then(|m| m.checked_add(u128::from(bit.is_set())))
                .ok_or(overflow)?;
        }
        if negative {
            // The magnitude of i128::MIN is one more than i128::MAX.
            if magnitude > i128::MAX.unsigned_abs() + 1 {
                Err(overflow)
            } else {
                Ok(0_i128.wrapping_sub_unsigned(magnitude))
            }
        } else {
            i128::try_from(magnitude).map_err(|_| overflow)
        }
    }

    pub(crate) fn convert_operand(&self, value: &Value<'_>) -> Result<Vec<Bit>, BitValueError> {
        convert::convert(value, self.width, self.signed)
    }

    /// The bits of `other`, fitted to the width of `self`.
    pub(crate) fn normalized(&self, other: &BitVector) -> Vec<Bit> {
        other.resized(self.width)
    }

    /// The bits of `self` extended (sign-extended if `self` is signed)
    /// or truncated to `width`.
    pub(crate) fn resized(&self, width: usize) -> Vec<Bit> {
        let fill = if self.signed { self.bits[0] } else { Bit::Zero };
        convert::fit(&self.bits, fill, width)
    }

    pub(crate) fn integer_operand<N: NativeInteger>(&self, n: N) -> Vec<Bit> {
        let (negative, magnitude) = n.sign_and_magnitude();
        convert::from_integer(negative, magnitude, self.width)
    }

    /// A vector with the shape of `self` holding `bits`.
    pub(crate) fn with_bits(&self, bits: Vec<Bit>) -> BitVector {
        debug_assert_eq!(bits.len(), self.width);
        BitVector {
            width: self.width,
            signed: self.signed,
            bits,
        }
    }
}

impl Debug for BitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitVector")
            .field("width", &self.width)
            .field("signed", &self.signed)
            .field("bits", &format_args!("{}", self.bin()))
            .finish()
    }
}

impl From<&BitVector> for bool {
    fn from(v: &BitVector) -> bool {
        v.to_bool()
    }
}

/// This macro implements conversions from bit vectors to native
/// integer types.  These fail when the value does not fit.
macro_rules! try_from_self_to_native_type {
    ($($to:ty)*) => {
        $(
            impl TryFrom<&BitVector> for $to {
                type Error = ConversionFailed;
                fn try_from(v: &BitVector) -> Result<$to, ConversionFailed> {
                    let n = v.to_i128()?;
                    <$to>::try_from(n).map_err(|_| {
                        if n < 0 {
                            ConversionFailed::TooSmall
                        } else {
                            ConversionFailed::TooLarge
                        }
                    })
                }
            }

            impl TryFrom<BitVector> for $to {
                type Error = ConversionFailed;
                fn try_from(v: BitVector) -> Result<$to, ConversionFailed> {
                    <$to>::try_from(&v)
                }
            }
        )*
    }
}

try_from_self_to_native_type!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize);

impl TryFrom<&BitVector> for i128 {
    type Error = ConversionFailed;
    fn try_from(v: &BitVector) -> Result<i128, ConversionFailed> {
        v.to_i128()
    }
}
