//! A single binary digit, and the fixed truth tables from which
//! every other operation in this crate is built.
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Bit {
    Zero = 0,
    One = 1,
}

impl Bit {
    pub const fn from_bool(b: bool) -> Bit {
        if b {
            Bit::One
        } else {
            Bit::Zero
        }
    }

    pub const fn is_set(self) -> bool {
        matches!(self, Bit::One)
    }

    pub const fn from_char(ch: char) -> Option<Bit> {
        match ch {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    pub const fn invert(self) -> Bit {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }

    pub const fn and(self, other: Bit) -> Bit {
        match (self, other) {
            (Bit::One, Bit::One) => Bit::One,
            _ => Bit::Zero,
        }
    }

    pub const fn or(self, other: Bit) -> Bit {
        match (self, other) {
            (Bit::Zero, Bit::Zero) => Bit::Zero,
            _ => Bit::One,
        }
    }

    pub const fn xor(self, other: Bit) -> Bit {
        match (self, other) {
            (Bit::Zero, Bit::One) | (Bit::One, Bit::Zero) => Bit::One,
            _ => Bit::Zero,
        }
    }
}

/// One stage of a ripple-carry adder.  Maps (a, b, carry in) to
/// (sum, carry out).
pub(crate) const fn full_add(a: Bit, b: Bit, carry: Bit) -> (Bit, Bit) {
    use Bit::{One, Zero};
    match (a, b, carry) {
        (Zero, Zero, Zero) => (Zero, Zero),
        (Zero, Zero, One) | (Zero, One, Zero) | (One, Zero, Zero) => (One, Zero),
        (Zero, One, One) | (One, Zero, One) | (One, One, Zero) => (Zero, One),
        (One, One, One) => (One, One),
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Bit {
        Bit::from_bool(b)
    }
}

impl From<Bit> for bool {
    fn from(b: Bit) -> bool {
        b.is_set()
    }
}

impl Display for Bit {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            Bit::Zero => "0",
            Bit::One => "1",
        })
    }
}

impl std::ops::Not for Bit {
    type Output = Bit;
    fn not(self) -> Bit {
        self.invert()
    }
}
