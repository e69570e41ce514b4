//! The prelude exports the types needed to build and combine bit
//! vectors.
pub use super::bit::Bit;
pub use super::bitvector::{
    BitRange, BitSlice, BitValueError, BitVector, ConversionFailed, Radix, Signum, Value,
};
