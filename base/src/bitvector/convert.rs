//! The base converter turns integers, literals and other vectors into
//! a bit sequence of a fixed width.
//!
//! Integers and decimal literals are treated as numbers: the
//! magnitude is converted, padded with zeros, and negated (two's
//! complement) if the value was negative.  Binary, octal and
//! hexadecimal literals are treated as bit patterns: when the target
//! is signed, a short pattern is extended with its own leading bit.
//! In every case only the lowest `width` bits are kept.
use std::fmt::{self, Display, Formatter};
use std::iter::repeat;

use super::arith::{add, negate};
use super::bitwise::{shift_left, zeros};
use super::error::BitValueError;
use super::value::Value;
use crate::bit::Bit;

/// Upper-case digits; a digit's position is its value.
pub(crate) const DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub const fn base(self) -> u8 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    /// The literal marker for this base (empty for decimal).
    pub const fn prefix(self) -> &'static str {
        match self {
            Radix::Binary => "0b",
            Radix::Octal => "0o",
            Radix::Decimal => "",
            Radix::Hexadecimal => "0x",
        }
    }

    /// The number of bits each digit stands for.  Decimal digits do
    /// not correspond to a whole number of bits.
    pub const fn bits_per_digit(self) -> Option<usize> {
        match self {
            Radix::Binary => Some(1),
            Radix::Octal => Some(3),
            Radix::Decimal => None,
            Radix::Hexadecimal => Some(4),
        }
    }

    pub fn digit_value(self, ch: char) -> Option<u8> {
        let upper = ch.to_ascii_uppercase();
        DIGITS[..usize::from(self.base())]
            .iter()
            .position(|d| *d == upper)
            .and_then(|pos| u8::try_from(pos).ok())
    }

    /// Identifies the base of a literal from its marker, returning
    /// the base and the remaining text.  Text without a marker is
    /// decimal.
    pub fn scan(literal: &str) -> (Radix, &str) {
        for radix in [Radix::Binary, Radix::Octal, Radix::Hexadecimal] {
            if let Some(rest) = literal.strip_prefix(radix.prefix()) {
                return (radix, rest);
            }
        }
        (Radix::Decimal, literal)
    }
}

impl Display for Radix {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            Radix::Binary => "binary",
            Radix::Octal => "octal",
            Radix::Decimal => "decimal",
            Radix::Hexadecimal => "hexadecimal",
        })
    }
}

/// The `count` low bits of `value`, most significant first.
fn digit_bits(value: u8, count: usize) -> impl Iterator<Item = Bit> {
    (0..count)
        .rev()
        .map(move |shift| Bit::from_bool((value >> shift) & 1 == 1))
}

/// Keeps the lowest `width` bits of `pattern`, or extends it on the
/// left with `fill` if it is shorter than that.
pub(crate) fn fit(pattern: &[Bit], fill: Bit, width: usize) -> Vec<Bit> {
    if pattern.len() >= width {
        pattern[pattern.len() - width..].to_vec()
    } else {
        repeat(fill)
            .take(width - pattern.len())
            .chain(pattern.iter().copied())
            .collect()
    }
}

/// The binary form of an unsigned integer, without leading zeros.
fn magnitude_bits(mut magnitude: u128) -> Vec<Bit> {
    let mut bits = Vec::new();
    while magnitude != 0 {
        bits.push(Bit::from_bool(magnitude % 2 == 1));
        magnitude /= 2;
    }
    bits.reverse();
    bits
}

pub(crate) fn from_integer(negative: bool, magnitude: u128, width: usize) -> Vec<Bit> {
    let padded = fit(&magnitude_bits(magnitude), Bit::Zero, width);
    if negative {
        negate(&padded)
    } else {
        padded
    }
}

fn format_error(literal: &str, radix: Radix) -> BitValueError {
    BitValueError::Format {
        literal: literal.to_string(),
        radix,
    }
}

/// Splits a decimal literal into its sign and digit values.
fn decimal_digits(literal: &str) -> Result<(bool, Vec<u8>), BitValueError> {
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    if digits.is_empty() {
        return Err(format_error(literal, Radix::Decimal));
    }
    let values = digits
        .chars()
        .map(|ch| Radix::Decimal.digit_value(ch))
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| format_error(literal, Radix::Decimal))?;
    Ok((negative, values))
}

/// Accumulates decimal digits into a `width`-bit value using the
/// adder: each step computes `acc * 10 + digit` as
/// `(acc << 3) + (acc << 1) + digit`.  Overflow wraps, which leaves
/// exactly the low `width` bits of the full value.
fn accumulate_decimal(digits: &[u8], width: usize) -> Vec<Bit> {
    digits.iter().fold(zeros(width), |acc, digit| {
        let times_ten = add(&shift_left(&acc, 3), &shift_left(&acc, 1));
        add(&times_ten, &fit(&magnitude_bits(u128::from(*digit)), Bit::Zero, width))
    })
}

/// The bit pattern spelled out by a binary, octal or hexadecimal
/// literal, including any leading zeros it was written with.
fn pattern_bits(literal: &str, radix: Radix, digits: &str) -> Result<Vec<Bit>, BitValueError> {
    let per_digit = match radix.bits_per_digit() {
        Some(n) => n,
        None => return Err(format_error(literal, radix)),
    };
    if digits.is_empty() {
        return Err(format_error(literal, radix));
    }
    let mut bits = Vec::with_capacity(digits.len() * per_digit);
    for ch in digits.chars() {
        let value = radix
            .digit_value(ch)
            .ok_or_else(|| format_error(literal, radix))?;
        bits.extend(digit_bits(value, per_digit));
    }
    Ok(bits)
}

fn convert_text(literal: &str, width: usize, signed: bool) -> Result<Vec<Bit>, BitValueError> {
    match Radix::scan(literal) {
        (Radix::Decimal, digits) => {
            let (negative, values) = decimal_digits(digits)?;
            let magnitude = accumulate_decimal(&values, width);
            Ok(if negative {
                negate(&magnitude)
            } else {
                magnitude
            })
        }
        (radix, digits) => {
            let pattern = pattern_bits(literal, radix, digits)?;
            let fill = if signed { pattern[0] } else { Bit::Zero };
            Ok(fit(&pattern, fill, width))
        }
    }
}

/// Converts `value` to exactly `width` bits.
pub(crate) fn convert(value: &Value<'_>, width: usize, signed: bool) -> Result<Vec<Bit>, BitValueError> {
    match value {
        Value::Integer {
            negative,
            magnitude,
        } => Ok(from_integer(*negative, *magnitude, width)),
        Value::Text(text) => convert_text(text, width, signed),
        Value::Vector(v) => {
            let fill = if v.is_signed() { v.bits()[0] } else { Bit::Zero };
            Ok(fit(v.bits(), fill, width))
        }
        Value::Boolean(_) => Err(BitValueError::TypeMismatch {
            found: value.type_name(),
        }),
    }
}

fn strip_leading_zeros(bits: &[Bit]) -> Vec<Bit> {
    bits.iter()
        .copied()
        .skip_while(|b| *b == Bit::Zero)
        .collect()
}

/// The sign and significant magnitude bits of `value`, read as a
/// number.  Prefixed literals count as non-negative here.
pub(crate) fn signed_magnitude(value: &Value<'_>) -> Result<(bool, Vec<Bit>), BitValueError> {
    match value {
        Value::Integer {
            negative,
            magnitude,
        } => Ok((*negative, magnitude_bits(*magnitude))),
        Value::Text(text) => match Radix::scan(text) {
            (Radix::Decimal, digits) => {
                let (negative, values) = decimal_digits(digits)?;
                // Every decimal digit needs fewer than four bits.
                let magnitude = accumulate_decimal(&values, values.len() * 4);
                Ok((negative, strip_leading_zeros(&magnitude)))
            }
            (radix, digits) => {
                let pattern = pattern_bits(text, radix, digits)?;
                Ok((false, strip_leading_zeros(&pattern)))
            }
        },
        Value::Vector(v) => {
            if v.is_negative() {
                Ok((true, strip_leading_zeros(&negate(v.bits()))))
            } else {
                Ok((false, strip_leading_zeros(v.bits())))
            }
        }
        Value::Boolean(_) => Err(BitValueError::TypeMismatch {
            found: value.type_name(),
        }),
    }
}
