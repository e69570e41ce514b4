//! Hardware-style bit addressing.
//!
//! Bit 0 is the least significant bit and bit `width - 1` the most
//! significant, while the bits themselves are stored most significant
//! first.  Negative indices count from the most significant end, so
//! `-1` is the sign bit.
use std::fmt::{self, Display, Formatter};
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use super::error::BitValueError;
use super::BitVector;
use crate::bit::Bit;

/// A half-open range of bit indices, with the defaults and negative
/// endpoint handling of a slice.  Only unit steps are supported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BitRange {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl BitRange {
    pub const fn new(start: Option<isize>, stop: Option<isize>) -> BitRange {
        BitRange {
            start,
            stop,
            step: None,
        }
    }

    #[must_use]
    pub const fn step_by(self, step: isize) -> BitRange {
        BitRange {
            step: Some(step),
            ..self
        }
    }

    /// Resolves the range against `width`, giving clamped
    /// `(start, stop)` indices with `start <= stop`.
    fn resolve(&self, width: usize) -> Result<(usize, usize), BitValueError> {
        match self.step {
            None | Some(1) => (),
            Some(step) => {
                return Err(BitValueError::UnsupportedStep(step));
            }
        }
        let w = isize::try_from(width).unwrap_or(isize::MAX);
        let clamp = |bound: Option<isize>, default: isize| -> usize {
            let index = match bound {
                None => default,
                Some(i) if i < 0 => (i + w).max(0),
                Some(i) => i.min(w),
            };
            usize::try_from(index).unwrap_or(0)
        };
        let start = clamp(self.start, 0);
        let stop = clamp(self.stop, w).max(start);
        Ok((start, stop))
    }
}

impl From<Range<isize>> for BitRange {
    fn from(r: Range<isize>) -> BitRange {
        BitRange::new(Some(r.start), Some(r.end))
    }
}

impl From<RangeFrom<isize>> for BitRange {
    fn from(r: RangeFrom<isize>) -> BitRange {
        BitRange::new(Some(r.start), None)
    }
}

impl From<RangeTo<isize>> for BitRange {
    fn from(r: RangeTo<isize>) -> BitRange {
        BitRange::new(None, Some(r.end))
    }
}

impl From<RangeFull> for BitRange {
    fn from(_: RangeFull) -> BitRange {
        BitRange::default()
    }
}

/// A borrowed, contiguous run of bits from a [`BitVector`], most
/// significant first.  It may be empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitSlice<'a> {
    bits: &'a [Bit],
}

impl<'a> BitSlice<'a> {
    pub fn bits(&self) -> &'a [Bit] {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Reinterprets the slice as a value in its own right.
    pub fn to_vector(&self, signed: bool) -> Result<BitVector, BitValueError> {
        if self.bits.is_empty() {
            return Err(BitValueError::Width(0));
        }
        Ok(BitVector {
            width: self.bits.len(),
            signed,
            bits: self.bits.to_vec(),
        })
    }
}

impl Display for BitSlice<'_> {
    /// Renders the bare digits (there is no `0b` marker).
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        for bit in self.bits {
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

impl BitVector {
    /// Fetches a single bit.
    ///
    /// ```
    /// use base::{Bit, BitVector};
    /// let v = BitVector::new("0b0110", 4, false).expect("valid literal");
    /// assert_eq!(v.bit(0), Ok(Bit::Zero));
    /// assert_eq!(v.bit(1), Ok(Bit::One));
    /// assert_eq!(v.bit(-1), Ok(Bit::Zero));
    /// ```
    pub fn bit(&self, index: isize) -> Result<Bit, BitValueError> {
        let out_of_range = BitValueError::IndexOutOfRange {
            index,
            width: self.width,
        };
        let w = isize::try_from(self.width).map_err(|_| out_of_range.clone())?;
        if index >= w || index < -w {
            return Err(out_of_range);
        }
        let position = if index >= 0 { w - 1 - index } else { -index - 1 };
        usize::try_from(position)
            .ok()
            .and_then(|pos| self.bits.get(pos).copied())
            .ok_or(out_of_range)
    }

    /// Fetches a contiguous range of bits `[start, stop)`, counted
    /// from the least significant end.
    ///
    /// ```
    /// use base::BitVector;
    /// let v = BitVector::new("0x9B5F", 16, false).expect("valid literal");
    /// assert_eq!(v.slice(0..4).expect("unit step").to_string(), "1111");
    /// assert_eq!(v.slice(12..).expect("unit step").to_string(), "1001");
    /// ```
    pub fn slice<R: Into<BitRange>>(&self, range: R) -> Result<BitSlice<'_>, BitValueError> {
        let (start, stop) = range.into().resolve(self.width)?;
        Ok(BitSlice {
            bits: &self.bits[self.width - stop..self.width - start],
        })
    }

    /// Copies out the `size` bits starting at `start_bit` as a vector
    /// of their own.
    pub fn field(&self, start_bit: usize, size: usize, signed: bool) -> Result<BitVector, BitValueError> {
        let stop = self.field_end(start_bit, size)?;
        BitSlice {
            bits: &self.bits[self.width - stop..self.width - start_bit],
        }
        .to_vector(signed)
    }

    /// Returns a copy of `self` in which bits `start_bit` up to
    /// `start_bit + field.width()` hold the bits of `field`.
    ///
    /// ```
    /// use base::BitVector;
    /// let word = BitVector::new("0xFF00", 16, false).expect("valid literal");
    /// let nibble = BitVector::new("0xA", 4, false).expect("valid literal");
    /// assert_eq!(word.with_field(4, &nibble).expect("in range").hex(), "0xFFA0");
    /// ```
    pub fn with_field(&self, start_bit: usize, field: &BitVector) -> Result<BitVector, BitValueError> {
        let stop = self.field_end(start_bit, field.width)?;
        let mut bits = self.bits.clone();
        bits[self.width - stop..self.width - start_bit].copy_from_slice(&field.bits);
        Ok(self.with_bits(bits))
    }

    /// The index just past a field of `size` bits at `start_bit`.
    fn field_end(&self, start_bit: usize, size: usize) -> Result<usize, BitValueError> {
        match start_bit.checked_add(size) {
            Some(stop) if stop <= self.width => Ok(stop),
            stop => Err(BitValueError::IndexOutOfRange {
                index: stop
                    .and_then(|stop| isize::try_from(stop - 1).ok())
                    .unwrap_or(isize::MAX),
                width: self.width,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{BitValueError, BitVector};
    use super::BitRange;
    use crate::bit::Bit;

    fn sample() -> BitVector {
        BitVector::new("0x9B5F", 16, true).unwrap()
    }

    #[test]
    fn test_single_index() {
        let v = sample();
        let digits = "1001101101011111";
        for i in 0..16_isize {
            let expected = digits.as_bytes()[15 - i as usize] == b'1';
            assert_eq!(v.bit(i), Ok(Bit::from_bool(expected)), "bit {i}");
        }
        assert_eq!(v.bit(-1), Ok(Bit::One));
        assert_eq!(v.bit(-16), Ok(Bit::One));
        assert_eq!(v.bit(-3), Ok(Bit::Zero));
    }

    #[test]
    fn test_index_out_of_range() {
        let v = sample();
        assert_eq!(
            v.bit(18),
            Err(BitValueError::IndexOutOfRange {
                index: 18,
                width: 16
            })
        );
        assert!(v.bit(16).is_err());
        assert!(v.bit(-17).is_err());
        assert!(v.bit(-20).is_err());
    }

    #[test]
    fn test_default_endpoints() {
        let v = sample();
        assert_eq!(v.slice(..).unwrap().to_string(), "1001101101011111");
        assert_eq!(v.slice(0..).unwrap().to_string(), "1001101101011111");
        assert_eq!(v.slice(..4).unwrap().to_string(), "1111");
        assert_eq!(v.slice(4..).unwrap().to_string(), "100110110101");
        assert_eq!(v.slice(..100).unwrap().to_string(), "1001101101011111");
    }

    #[test]
    fn test_ranges() {
        let v = BitVector::new("0x02468ACE", 32, true).unwrap();
        assert_eq!(v.slice(3..10).unwrap().to_string(), "1011001");
        assert_eq!(v.slice(0..8).unwrap().to_string(), "11001110");
        assert_eq!(v.slice(-8..-3).unwrap().to_string(), "00010");
        assert!(v.slice(10..3).unwrap().is_empty());
    }

    #[test]
    fn test_steps_are_rejected() {
        let v = sample();
        for step in [2, -1, 0] {
            assert_eq!(
                v.slice(BitRange::from(2..6).step_by(step)),
                Err(BitValueError::UnsupportedStep(step))
            );
        }
        assert!(v.slice(BitRange::from(2..6).step_by(1)).is_ok());
    }

    #[test]
    fn test_with_field() {
        let v = BitVector::new(0, 8, true).unwrap();
        let field = BitVector::new("0b101", 3, false).unwrap();
        assert_eq!(v.with_field(0, &field).unwrap().bin(), "0b00000101");
        assert_eq!(v.with_field(5, &field).unwrap().bin(), "0b10100000");
        assert!(v.with_field(5, &field).unwrap().is_signed());
        assert_eq!(
            v.with_field(6, &field),
            Err(BitValueError::IndexOutOfRange { index: 8, width: 8 })
        );
        let written = v.with_field(2, &field).unwrap();
        assert_eq!(written.field(2, 3, false).unwrap(), field);
        assert_eq!(written.field(2, 3, true).unwrap().dec(), "-3");
        assert_eq!(written.field(0, 0, false), Err(BitValueError::Width(0)));
        assert!(written.field(4, 5, false).is_err());
        assert_eq!(
            written.field(usize::MAX, 2, false),
            Err(BitValueError::IndexOutOfRange {
                index: isize::MAX,
                width: 8
            })
        );
        assert!(v.with_field(usize::MAX, &field).is_err());
    }

    #[test]
    fn test_slice_as_vector() {
        let v = sample();
        let low = v.slice(0..4).unwrap().to_vector(false).unwrap();
        assert_eq!(low.width(), 4);
        assert_eq!(low.dec(), "15");
        let signed_low = v.slice(0..4).unwrap().to_vector(true).unwrap();
        assert_eq!(signed_low.dec(), "-1");
        assert_eq!(
            v.slice(4..4).unwrap().to_vector(false),
            Err(BitValueError::Width(0))
        );
    }
}
