//! Text renderings of a bit vector.
//!
//! Binary, octal and hexadecimal output shows the whole stored bit
//! pattern (there is no minus sign).  Decimal output is the numeric
//! value, negative for a signed vector whose sign bit is set.
use std::fmt::{self, Binary, Display, Formatter, LowerHex, Octal, UpperHex};

use super::arith::{divide_unsigned, is_zero, negate};
use super::convert::{fit, from_integer, Radix, DIGITS};
use super::BitVector;
use crate::bit::Bit;

/// The value of a short group of bits, most significant first.
fn group_value(group: &[Bit]) -> usize {
    group
        .iter()
        .fold(0, |acc, bit| (acc << 1) | usize::from(bit.is_set()))
}

/// Splits `bits` into groups of `per_digit` counted from the least
/// significant end, padding the top group with zeros, and spells each
/// group as one digit.
fn grouped_digits(bits: &[Bit], per_digit: usize) -> String {
    let digit_count = bits.len().div_ceil(per_digit);
    let padded = fit(bits, Bit::Zero, digit_count * per_digit);
    padded
        .chunks(per_digit)
        .map(|group| DIGITS[group_value(group)])
        .collect()
}

/// Decimal digits of an unsigned bit pattern, found by repeated
/// division by ten.
fn decimal_digits(bits: &[Bit]) -> String {
    // Ten needs four bits, so narrow values are widened first.
    let width = bits.len().max(4);
    let ten = from_integer(false, 10, width);
    let mut quotient = fit(bits, Bit::Zero, width);
    let mut digits = Vec::new();
    while !is_zero(&quotient) {
        match divide_unsigned(&quotient, &ten) {
            Some((q, r)) => {
                digits.push(DIGITS[group_value(&r)]);
                quotient = q;
            }
            None => break,
        }
    }
    if digits.is_empty() {
        digits.push('0');
    }
    digits.iter().rev().collect()
}

impl BitVector {
    fn digits(&self, radix: Radix) -> String {
        match radix.bits_per_digit() {
            Some(1) => self.bits.iter().map(|b| b.to_char()).collect(),
            Some(per_digit) => grouped_digits(&self.bits, per_digit),
            None => {
                if self.is_negative() {
                    format!("-{}", decimal_digits(&negate(&self.bits)))
                } else {
                    decimal_digits(&self.bits)
                }
            }
        }
    }

    /// Renders the value in `radix`, with its literal marker.  The
    /// result can be converted back into the same value.
    pub fn to_string_radix(&self, radix: Radix) -> String {
        format!("{}{}", radix.prefix(), self.digits(radix))
    }

    /// `0b` followed by exactly `width` binary digits.
    ///
    /// ```
    /// use base::BitVector;
    /// let v = BitVector::new(5, 6, true).expect("valid value");
    /// assert_eq!(v.bin(), "0b000101");
    /// ```
    pub fn bin(&self) -> String {
        self.to_string_radix(Radix::Binary)
    }

    pub fn oct(&self) -> String {
        self.to_string_radix(Radix::Octal)
    }

    /// `0x` followed by upper-case digits covering the whole width.
    ///
    /// ```
    /// use base::BitVector;
    /// let v = BitVector::new(-1, 10, true).expect("valid value");
    /// assert_eq!(v.hex(), "0x3FF");
    /// ```
    pub fn hex(&self) -> String {
        self.to_string_radix(Radix::Hexadecimal)
    }

    pub fn dec(&self) -> String {
        self.to_string_radix(Radix::Decimal)
    }
}

impl Display for BitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(&self.bin())
    }
}

impl Binary for BitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad_integral(true, Radix::Binary.prefix(), &self.digits(Radix::Binary))
    }
}

impl Octal for BitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad_integral(true, Radix::Octal.prefix(), &self.digits(Radix::Octal))
    }
}

impl UpperHex for BitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad_integral(
            true,
            Radix::Hexadecimal.prefix(),
            &self.digits(Radix::Hexadecimal),
        )
    }
}

impl LowerHex for BitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad_integral(
            true,
            Radix::Hexadecimal.prefix(),
            &self.digits(Radix::Hexadecimal).to_ascii_lowercase(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::{BitVector, Radix};

    #[test]
    fn test_bin_shows_every_bit() {
        assert_eq!(BitVector::new(0, 1, false).unwrap().bin(), "0b0");
        assert_eq!(BitVector::new(-1, 4, true).unwrap().bin(), "0b1111");
        assert_eq!(BitVector::new(10, 8, true).unwrap().to_string(), "0b00001010");
    }

    #[test]
    fn test_oct_groups_from_least_significant_end() {
        for (value, width, expected) in [
            (0_i32, 4, "0o00"),
            (8, 4, "0o10"),
            (-1, 8, "0o377"),
            (0o1234, 12, "0o1234"),
            (5, 3, "0o5"),
        ] {
            assert_eq!(BitVector::new(value, width, true).unwrap().oct(), expected);
        }
    }

    #[test]
    fn test_hex() {
        for (value, width, expected) in [
            (0_i32, 8, "0x00"),
            (0xAB, 8, "0xAB"),
            (-1, 16, "0xFFFF"),
            (0x123, 12, "0x123"),
            (1, 1, "0x1"),
            (-2, 5, "0x1E"),
        ] {
            assert_eq!(BitVector::new(value, width, true).unwrap().hex(), expected);
        }
    }

    #[test]
    fn test_dec() {
        for (value, width, signed, expected) in [
            (0_i64, 8, true, "0"),
            (127, 8, true, "127"),
            (-128, 8, true, "-128"),
            (-1, 8, false, "255"),
            (1, 1, false, "1"),
            (-1, 1, true, "-1"),
            (1_000_000_007, 40, true, "1000000007"),
        ] {
            let v = BitVector::new(value, width, signed).unwrap();
            assert_eq!(v.dec(), expected, "{value} in {width} bits");
        }
    }

    #[test]
    fn test_renderings_read_back() {
        let v = BitVector::new("0xBEEF", 16, true).unwrap();
        for radix in [
            Radix::Binary,
            Radix::Octal,
            Radix::Decimal,
            Radix::Hexadecimal,
        ] {
            let text = v.to_string_radix(radix);
            assert_eq!(BitVector::new(text.as_str(), 16, true).unwrap(), v, "{text}");
        }
    }

    #[test]
    fn test_std_formatting_traits() {
        let v = BitVector::new(0x2A, 8, false).unwrap();
        assert_eq!(format!("{v:b}"), "00101010");
        assert_eq!(format!("{v:#b}"), "0b00101010");
        assert_eq!(format!("{v:o}"), "052");
        assert_eq!(format!("{v:#X}"), "0x2A");
        assert_eq!(format!("{v:x}"), "2a");
        assert_eq!(format!("{v:>6X}"), "    2A");
    }
}
