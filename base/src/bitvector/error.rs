//! Basic error reporting.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use super::convert::Radix;

/// Describes why an operation on a [`BitVector`](super::BitVector)
/// could not be carried out.  When one of these is returned the
/// receiver's stored value has not been modified.
///
/// There is no overflow error: results which do not fit simply
/// wrap around, as they would in a hardware register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BitValueError {
    /// A literal contains a character which is not a digit of its
    /// base (or contains no digits at all).
    Format { literal: String, radix: Radix },
    /// The requested width is not positive.
    Width(usize),
    /// The operand has a type which cannot be interpreted as a bit
    /// pattern (for example a boolean, which is not an integer).
    TypeMismatch { found: &'static str },
    IndexOutOfRange { index: isize, width: usize },
    UnsupportedStep(isize),
    DivideByZero,
}

impl Error for BitValueError {}

impl Display for BitValueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            BitValueError::Format { literal, radix } => {
                write!(f, "illegal {radix} value: '{literal}'")
            }
            BitValueError::Width(width) => {
                write!(
                    f,
                    "number of bits for a value must be positive (got {width})"
                )
            }
            BitValueError::TypeMismatch { found } => {
                write!(f, "illegal type for binary value: {found}")
            }
            BitValueError::IndexOutOfRange { index, width } => {
                write!(f, "bit index {index} out of range for a {width}-bit value")
            }
            BitValueError::UnsupportedStep(step) => {
                write!(
                    f,
                    "bit vectors do not support steps in slicing (step was {step})"
                )
            }
            BitValueError::DivideByZero => f.write_str("division by zero"),
        }
    }
}

/// Represents a failure to convert a bit vector to one of the native
/// integer types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionFailed {
    TooLarge,
    TooSmall,
}

impl Error for ConversionFailed {}

impl Display for ConversionFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ConversionFailed::TooLarge => f.write_str("value is too large"),
            ConversionFailed::TooSmall => f.write_str("value is too small"),
        }
    }
}
