//! Operator overloading for [`BitVector`].
//!
//! Right-hand operands are fitted to the left-hand operand, so the
//! result always has the width and signedness of the left side.
//! Division, remainder and exponentiation are not operators because
//! division can fail; see [`BitVector::div_mod`] and
//! [`BitVector::wrapping_pow`].
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Mul,
    MulAssign, Neg, Not, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

use super::arith::{add, mul, sub};
use super::bitwise::combine;
use super::BitVector;
use crate::bit::Bit;

/// Implements a binary operator (and its assigning form) between a
/// bit vector and another bit vector.
macro_rules! vector_operator {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $engine:expr) => {
        impl $Op<&BitVector> for &BitVector {
            type Output = BitVector;
            fn $op(self, rhs: &BitVector) -> BitVector {
                self.with_bits($engine(&self.bits, &self.normalized(rhs)))
            }
        }

        impl $Op<BitVector> for &BitVector {
            type Output = BitVector;
            fn $op(self, rhs: BitVector) -> BitVector {
                <&BitVector as $Op<&BitVector>>::$op(self, &rhs)
            }
        }

        impl $Op<&BitVector> for BitVector {
            type Output = BitVector;
            fn $op(self, rhs: &BitVector) -> BitVector {
                <&BitVector as $Op<&BitVector>>::$op(&self, rhs)
            }
        }

        impl $Op<BitVector> for BitVector {
            type Output = BitVector;
            fn $op(self, rhs: BitVector) -> BitVector {
                <&BitVector as $Op<&BitVector>>::$op(&self, &rhs)
            }
        }

        impl $OpAssign<&BitVector> for BitVector {
            fn $op_assign(&mut self, rhs: &BitVector) {
                self.bits = $engine(&self.bits, &self.normalized(rhs));
            }
        }

        impl $OpAssign<BitVector> for BitVector {
            fn $op_assign(&mut self, rhs: BitVector) {
                <BitVector as $OpAssign<&BitVector>>::$op_assign(self, &rhs);
            }
        }
    };
}

/// Implements a binary operator (and its assigning form) between a
/// bit vector and a native integer.  The integer is converted to the
/// shape of the vector first, wrapping if needed.
///
/// Only `i128` is accepted, so that an unsuffixed literal such as the
/// `1` in `&v + 1` has exactly one type it can take.
macro_rules! native_operator {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $engine:expr, $native:ty) => {
        impl $Op<$native> for &BitVector {
            type Output = BitVector;
            fn $op(self, rhs: $native) -> BitVector {
                self.with_bits($engine(&self.bits, &self.integer_operand(rhs)))
            }
        }

        impl $Op<$native> for BitVector {
            type Output = BitVector;
            fn $op(self, rhs: $native) -> BitVector {
                <&BitVector as $Op<$native>>::$op(&self, rhs)
            }
        }

        impl $OpAssign<$native> for BitVector {
            fn $op_assign(&mut self, rhs: $native) {
                self.bits = $engine(&self.bits, &self.integer_operand(rhs));
            }
        }
    };
}

fn bit_and(left: &[Bit], right: &[Bit]) -> Vec<Bit> {
    combine(left, right, Bit::and)
}

fn bit_or(left: &[Bit], right: &[Bit]) -> Vec<Bit> {
    combine(left, right, Bit::or)
}

fn bit_xor(left: &[Bit], right: &[Bit]) -> Vec<Bit> {
    combine(left, right, Bit::xor)
}

vector_operator!(Add, add, AddAssign, add_assign, add);
vector_operator!(Sub, sub, SubAssign, sub_assign, sub);
vector_operator!(Mul, mul, MulAssign, mul_assign, mul);
vector_operator!(BitAnd, bitand, BitAndAssign, bitand_assign, bit_and);
vector_operator!(BitOr, bitor, BitOrAssign, bitor_assign, bit_or);
vector_operator!(BitXor, bitxor, BitXorAssign, bitxor_assign, bit_xor);

native_operator!(Add, add, AddAssign, add_assign, add, i128);
native_operator!(Sub, sub, SubAssign, sub_assign, sub, i128);
native_operator!(Mul, mul, MulAssign, mul_assign, mul, i128);
native_operator!(BitAnd, bitand, BitAndAssign, bitand_assign, bit_and, i128);
native_operator!(BitOr, bitor, BitOrAssign, bitor_assign, bit_or, i128);
native_operator!(BitXor, bitxor, BitXorAssign, bitxor_assign, bit_xor, i128);

impl Neg for &BitVector {
    type Output = BitVector;
    fn neg(self) -> BitVector {
        self.negate()
    }
}

impl Neg for BitVector {
    type Output = BitVector;
    fn neg(self) -> BitVector {
        self.negate()
    }
}

impl Not for &BitVector {
    type Output = BitVector;
    fn not(self) -> BitVector {
        self.invert()
    }
}

impl Not for BitVector {
    type Output = BitVector;
    fn not(self) -> BitVector {
        self.invert()
    }
}

impl Shl<usize> for &BitVector {
    type Output = BitVector;
    fn shl(self, places: usize) -> BitVector {
        self.shift_left(places)
    }
}

impl Shl<usize> for BitVector {
    type Output = BitVector;
    fn shl(self, places: usize) -> BitVector {
        self.shift_left(places)
    }
}

impl ShlAssign<usize> for BitVector {
    fn shl_assign(&mut self, places: usize) {
        *self = self.shift_left(places);
    }
}

/// `>>` is a logical shift; use
/// [`BitVector::shift_right_arithmetic`] to keep the sign.
impl Shr<usize> for &BitVector {
    type Output = BitVector;
    fn shr(self, places: usize) -> BitVector {
        self.shift_right(places)
    }
}

impl Shr<usize> for BitVector {
    type Output = BitVector;
    fn shr(self, places: usize) -> BitVector {
        self.shift_right(places)
    }
}

impl ShrAssign<usize> for BitVector {
    fn shr_assign(&mut self, places: usize) {
        *self = self.shift_right(places);
    }
}
