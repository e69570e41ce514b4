//! Ordering of bit vectors.
//!
//! Every relational operator is derived from [`compare_bits`], which
//! looks at the sign bits first (for signed values) and otherwise
//! decides on the first differing position from the most significant
//! end.
use std::cmp::Ordering;

use super::error::BitValueError;
use super::value::Value;
use super::BitVector;
use crate::bit::Bit;

pub(crate) fn compare_bits(left: &[Bit], right: &[Bit], signed: bool) -> Ordering {
    debug_assert_eq!(left.len(), right.len());
    if signed {
        if let (Some(l), Some(r)) = (left.first(), right.first()) {
            if l != r {
                // A clear sign bit means the value is non-negative.
                return if *l == Bit::Zero {
                    Ordering::Greater
                } else {
                    Ordering::Less
                };
            }
        }
    }
    left.iter()
        .zip(right.iter())
        .find(|(l, r)| l != r)
        .map_or(Ordering::Equal, |(l, _)| {
            if l.is_set() {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        })
}

impl BitVector {
    /// Compares `self` with any value, after converting that value to
    /// the width and signedness of `self`.
    pub fn compare<'a, V: Into<Value<'a>>>(&self, other: V) -> Result<Ordering, BitValueError> {
        let other = self.convert_operand(&other.into())?;
        Ok(compare_bits(&self.bits, &other, self.signed))
    }

    /// Compares the values of two vectors whatever their shapes.  Both
    /// are extended, each by its own signedness, to one bit more than
    /// the wider of them and compared as signed values there, so that
    /// the result is the same whichever side is `self`.
    pub fn compare_vector(&self, other: &BitVector) -> Ordering {
        let width = self.width.max(other.width) + 1;
        compare_bits(&self.resized(width), &other.resized(width), true)
    }
}

impl PartialEq for BitVector {
    fn eq(&self, other: &BitVector) -> bool {
        self.compare_vector(other) == Ordering::Equal
    }
}

impl PartialOrd for BitVector {
    fn partial_cmp(&self, other: &BitVector) -> Option<Ordering> {
        Some(self.compare_vector(other))
    }
}

impl PartialEq<&str> for BitVector {
    /// A literal which cannot be parsed is not equal to anything.
    fn eq(&self, other: &&str) -> bool {
        matches!(self.compare(*other), Ok(Ordering::Equal))
    }
}

impl PartialOrd<&str> for BitVector {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        self.compare(*other).ok()
    }
}

/// This macro implements comparisons between bit vectors and native
/// integers.  The integer is converted to the width of the vector
/// first, so it wraps just as an assignment would.
macro_rules! compare_with_native_type {
    ($($native:ty)*) => {
        $(
            impl PartialEq<$native> for BitVector {
                fn eq(&self, other: &$native) -> bool {
                    compare_bits(&self.bits, &self.integer_operand(*other), self.signed)
                        == Ordering::Equal
                }
            }

            impl PartialOrd<$native> for BitVector {
                fn partial_cmp(&self, other: &$native) -> Option<Ordering> {
                    Some(compare_bits(&self.bits, &self.integer_operand(*other), self.signed))
                }
            }
        )*
    }
}

compare_with_native_type!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);
