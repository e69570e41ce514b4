//! Bitwise logic and shifts.
//!
//! The free functions here work on MSB-first bit sequences of equal
//! length; the arithmetic engine and the base converter are built on
//! top of them.
use std::iter::repeat;

use super::BitVector;
use crate::bit::Bit;

pub(crate) fn zeros(width: usize) -> Vec<Bit> {
    vec![Bit::Zero; width]
}

pub(crate) fn invert(bits: &[Bit]) -> Vec<Bit> {
    bits.iter().map(|b| b.invert()).collect()
}

/// Applies a two-input truth table position by position.
pub(crate) fn combine(left: &[Bit], right: &[Bit], table: fn(Bit, Bit) -> Bit) -> Vec<Bit> {
    debug_assert_eq!(left.len(), right.len());
    left.iter()
        .zip(right.iter())
        .map(|(l, r)| table(*l, *r))
        .collect()
}

/// Appends `places` zero bits at the least-significant end and drops
/// the same number of bits off the most-significant end.
pub(crate) fn shift_left(bits: &[Bit], places: usize) -> Vec<Bit> {
    let width = bits.len();
    if places >= width {
        return zeros(width);
    }
    bits[places..]
        .iter()
        .copied()
        .chain(repeat(Bit::Zero).take(places))
        .collect()
}

/// Drops `places` bits off the least-significant end, filling the
/// vacated high positions with `fill`.
pub(crate) fn shift_right(bits: &[Bit], places: usize, fill: Bit) -> Vec<Bit> {
    let width = bits.len();
    if places >= width {
        return vec![fill; width];
    }
    repeat(fill)
        .take(places)
        .chain(bits[..width - places].iter().copied())
        .collect()
}

impl BitVector {
    /// Complements every bit, including leading zeros.
    pub fn invert(&self) -> BitVector {
        self.with_bits(invert(&self.bits))
    }

    pub fn and(&self, rhs: &BitVector) -> BitVector {
        self.with_bits(combine(&self.bits, &self.normalized(rhs), Bit::and))
    }

    pub fn or(&self, rhs: &BitVector) -> BitVector {
        self.with_bits(combine(&self.bits, &self.normalized(rhs), Bit::or))
    }

    pub fn xor(&self, rhs: &BitVector) -> BitVector {
        self.with_bits(combine(&self.bits, &self.normalized(rhs), Bit::xor))
    }

    pub fn shift_left(&self, places: usize) -> BitVector {
        self.with_bits(shift_left(&self.bits, places))
    }

    /// Logical shift right: the vacated high bits are always zero,
    /// even for a negative signed value.
    pub fn shift_right(&self, places: usize) -> BitVector {
        self.with_bits(shift_right(&self.bits, places, Bit::Zero))
    }

    /// Shift right, copying the sign bit into the vacated high bits
    /// of a signed value.  The `>>` operator does not use this.
    pub fn shift_right_arithmetic(&self, places: usize) -> BitVector {
        let fill = if self.signed { self.bits[0] } else { Bit::Zero };
        self.with_bits(shift_right(&self.bits, places, fill))
    }
}

#[cfg(test)]
mod tests {
    use super::super::BitVector;

    fn u8bits(text: &str) -> BitVector {
        BitVector::new(text, 8, false).expect("test literal should be valid")
    }

    #[test]
    fn test_invert_keeps_leading_bits() {
        for (input, expected) in [
            ("0xAA", "0b01010101"),
            ("0x0F", "0b11110000"),
            ("0x99", "0b01100110"),
        ] {
            assert_eq!(u8bits(input).invert().bin(), expected);
        }
        assert_eq!(
            BitVector::new(0, 5, true).unwrap().invert().bin(),
            "0b11111"
        );
    }

    #[test]
    fn test_and_or_xor() {
        let cases = [
            ("0xAA", "0x00", "0b00000000", "0b10101010", "0b10101010"),
            ("0xAA", "0xFF", "0b10101010", "0b11111111", "0b01010101"),
            ("0x0F", "0xF0", "0b00000000", "0b11111111", "0b11111111"),
            ("0xAA", "0x55", "0b00000000", "0b11111111", "0b11111111"),
        ];
        for (l, r, and, or, xor) in cases {
            let (l, r) = (u8bits(l), u8bits(r));
            assert_eq!(l.and(&r).bin(), and, "{l} & {r}");
            assert_eq!(l.or(&r).bin(), or, "{l} | {r}");
            assert_eq!(l.xor(&r).bin(), xor, "{l} ^ {r}");
        }
    }

    #[test]
    fn test_narrow_signed_operand_is_sign_extended() {
        let wide = BitVector::new("0x0F00", 16, true).unwrap();
        let narrow = BitVector::new(-1, 4, true).unwrap();
        assert_eq!(wide.or(&narrow).bin(), "0b1111111111111111");

        let unsigned_narrow = BitVector::new("0xF", 4, false).unwrap();
        assert_eq!(wide.or(&unsigned_narrow).bin(), "0b0000111100001111");
    }

    #[test]
    fn test_shifts() {
        for text in ["0x00", "0xFF", "0xAA", "0x55"] {
            let v = u8bits(text);
            let digits: String = v.bin()[2..].to_string();
            for i in 1..=8 {
                let left = format!("0b{}{}", &digits[i..], "0".repeat(i));
                let right = format!("0b{}{}", "0".repeat(i), &digits[..8 - i]);
                assert_eq!(v.shift_left(i).bin(), left, "{text} << {i}");
                assert_eq!(v.shift_right(i).bin(), right, "{text} >> {i}");
            }
        }
        assert_eq!(u8bits("0xFF").shift_left(100).bin(), "0b00000000");
    }

    #[test]
    fn test_right_shift_does_not_sign_extend() {
        let minus_two = BitVector::new(-2, 8, true).unwrap();
        assert_eq!(minus_two.shift_right(1).bin(), "0b01111111");
        assert_eq!(minus_two.shift_right_arithmetic(1).bin(), "0b11111111");
    }
}
