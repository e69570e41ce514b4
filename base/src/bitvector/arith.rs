//! The arithmetic engine.  Everything here is built from the
//! ripple-carry adder and the bitwise primitives; no native integer
//! arithmetic is involved.  Every result has the width of its
//! operands and wraps on overflow.
use std::cmp::Ordering;

use super::bitwise::{invert, shift_left, zeros};
use super::compare::compare_bits;
use super::error::BitValueError;
use super::BitVector;
use crate::bit::{full_add, Bit};

pub(crate) fn one(width: usize) -> Vec<Bit> {
    let mut bits = zeros(width);
    if let Some(last) = bits.last_mut() {
        *last = Bit::One;
    }
    bits
}

pub(crate) fn is_zero(bits: &[Bit]) -> bool {
    bits.iter().all(|b| *b == Bit::Zero)
}

/// Ripple-carry addition from the least significant end.  The carry
/// out of the most significant position is discarded.
pub(crate) fn add(augend: &[Bit], addend: &[Bit]) -> Vec<Bit> {
    debug_assert_eq!(augend.len(), addend.len());
    let mut sum = zeros(augend.len());
    let mut carry = Bit::Zero;
    for (pos, (a, b)) in augend.iter().zip(addend.iter()).enumerate().rev() {
        let (s, c) = full_add(*a, *b, carry);
        sum[pos] = s;
        carry = c;
    }
    sum
}

/// Two's complement negation: invert, then add one.
pub(crate) fn negate(bits: &[Bit]) -> Vec<Bit> {
    add(&invert(bits), &one(bits.len()))
}

pub(crate) fn sub(minuend: &[Bit], subtrahend: &[Bit]) -> Vec<Bit> {
    add(minuend, &negate(subtrahend))
}

/// Shift-and-add multiplication.
pub(crate) fn mul(multiplicand: &[Bit], multiplier: &[Bit]) -> Vec<Bit> {
    let mut product = zeros(multiplicand.len());
    let mut shifted = multiplicand.to_vec();
    for bit in multiplier.iter().rev() {
        if bit.is_set() {
            product = add(&product, &shifted);
        }
        shifted = shift_left(&shifted, 1);
    }
    product
}

/// Exponentiation by squaring.  The exponent is scanned from its
/// least significant bit as a plain bit pattern.
pub(crate) fn pow(base: &[Bit], exponent: &[Bit]) -> Vec<Bit> {
    let mut result = one(base.len());
    let mut square = base.to_vec();
    for bit in exponent.iter().rev() {
        if bit.is_set() {
            result = mul(&result, &square);
        }
        square = mul(&square, &square);
    }
    result
}

/// Restoring division of two unsigned bit patterns of equal width,
/// giving `(quotient, remainder)`, or `None` if the divisor is zero.
///
/// The partial remainder is kept one bit wider than the operands, so
/// shifting it left cannot lose its top bit.
pub(crate) fn divide_unsigned(dividend: &[Bit], divisor: &[Bit]) -> Option<(Vec<Bit>, Vec<Bit>)> {
    if is_zero(divisor) {
        return None;
    }
    let width = dividend.len();
    let wide_divisor: Vec<Bit> = std::iter::once(Bit::Zero)
        .chain(divisor.iter().copied())
        .collect();
    let mut remainder = zeros(width + 1);
    let mut quotient = Vec::with_capacity(width);
    for bit in dividend {
        remainder = shift_left(&remainder, 1);
        remainder[width] = *bit;
        if compare_bits(&remainder, &wide_divisor, false) == Ordering::Less {
            quotient.push(Bit::Zero);
        } else {
            remainder = sub(&remainder, &wide_divisor);
            quotient.push(Bit::One);
        }
    }
    remainder.remove(0);
    Some((quotient, remainder))
}

impl BitVector {
    pub fn wrapping_add(&self, rhs: &BitVector) -> BitVector {
        self.with_bits(add(&self.bits, &self.normalized(rhs)))
    }

    pub fn wrapping_sub(&self, rhs: &BitVector) -> BitVector {
        self.with_bits(sub(&self.bits, &self.normalized(rhs)))
    }

    pub fn wrapping_mul(&self, rhs: &BitVector) -> BitVector {
        self.with_bits(mul(&self.bits, &self.normalized(rhs)))
    }

    pub fn wrapping_pow(&self, exponent: &BitVector) -> BitVector {
        self.with_bits(pow(&self.bits, &self.normalized(exponent)))
    }

    /// Two's complement negation.  Negating the most negative value
    /// of a signed width gives that same value back.
    pub fn negate(&self) -> BitVector {
        self.with_bits(negate(&self.bits))
    }

    pub fn abs(&self) -> BitVector {
        if self.is_negative() {
            self.negate()
        } else {
            self.clone()
        }
    }

    pub fn increment(&self) -> BitVector {
        self.with_bits(add(&self.bits, &one(self.width)))
    }

    /// Computes the quotient and remainder together.
    ///
    /// Unsigned operands use restoring division directly.  Signed
    /// operands are divided by magnitude; the quotient is negated when
    /// the operand signs differ and the remainder takes the sign of
    /// the dividend, so `quotient * rhs + remainder == self`.
    pub fn div_mod(&self, rhs: &BitVector) -> Result<(BitVector, BitVector), BitValueError> {
        let divisor = self.normalized(rhs);
        let negative_dividend = self.is_negative();
        let negative_divisor = self.signed && divisor[0] == Bit::One;
        let dividend_magnitude = if negative_dividend {
            negate(&self.bits)
        } else {
            self.bits.clone()
        };
        let divisor_magnitude = if negative_divisor {
            negate(&divisor)
        } else {
            divisor
        };
        let (quotient, remainder) = divide_unsigned(&dividend_magnitude, &divisor_magnitude)
            .ok_or(BitValueError::DivideByZero)?;
        let quotient = if negative_dividend != negative_divisor {
            negate(&quotient)
        } else {
            quotient
        };
        let remainder = if negative_dividend {
            negate(&remainder)
        } else {
            remainder
        };
        Ok((self.with_bits(quotient), self.with_bits(remainder)))
    }

    pub fn checked_div(&self, rhs: &BitVector) -> Result<BitVector, BitValueError> {
        self.div_mod(rhs).map(|(quotient, _)| quotient)
    }

    pub fn checked_rem(&self, rhs: &BitVector) -> Result<BitVector, BitValueError> {
        self.div_mod(rhs).map(|(_, remainder)| remainder)
    }

    /// In-place division.  On failure `self` is left unchanged.
    pub fn checked_div_assign(&mut self, rhs: &BitVector) -> Result<(), BitValueError> {
        let quotient = self.checked_div(rhs)?;
        self.bits = quotient.bits;
        Ok(())
    }

    /// In-place remainder.  On failure `self` is left unchanged.
    pub fn checked_rem_assign(&mut self, rhs: &BitVector) -> Result<(), BitValueError> {
        let remainder = self.checked_rem(rhs)?;
        self.bits = remainder.bits;
        Ok(())
    }

    pub fn pow_assign(&mut self, exponent: &BitVector) {
        self.bits = pow(&self.bits, &self.normalized(exponent));
    }
}
