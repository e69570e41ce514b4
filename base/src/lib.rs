//! The `base` crate defines fixed-width binary values whose
//! arithmetic is carried out one bit at a time, using the same
//! boolean logic a hardware adder would.  Everything which simulates
//! storage (registers, flags, clocking) lives in the `components`
//! crate, which depends on this one.
//!
//! ```
//! use base::prelude::*;
//! let ff = BitVector::new("0xFF", 8, false).expect("valid literal");
//! assert_eq!((&ff + 1).bin(), "0b00000000");
//! ```

mod bit;
mod bitvector;

pub mod prelude;

pub use bit::Bit;
pub use bitvector::*;
