//! Evaluation of a single `LHS [OP RHS]` expression.
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use tracing::{event, Level};

use base::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Operator {
    fn is_shift(self) -> bool {
        matches!(self, Operator::Shl | Operator::Shr)
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Operator, CalcError> {
        Ok(match s {
            "+" => Operator::Add,
            "-" => Operator::Sub,
            "*" => Operator::Mul,
            "/" | "//" => Operator::Div,
            "%" => Operator::Rem,
            "**" => Operator::Pow,
            "&" => Operator::And,
            "|" => Operator::Or,
            "^" => Operator::Xor,
            "<<" => Operator::Shl,
            ">>" => Operator::Shr,
            "==" => Operator::Eq,
            "!=" => Operator::Ne,
            "<" => Operator::Lt,
            "<=" => Operator::Le,
            ">" => Operator::Gt,
            ">=" => Operator::Ge,
            other => {
                return Err(CalcError::UnknownOperator(other.to_string()));
            }
        })
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum CalcError {
    UnknownOperator(String),
    BadShift(String),
    Value(BitValueError),
}

impl Display for CalcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            CalcError::UnknownOperator(op) => write!(f, "unknown operator '{op}'"),
            CalcError::BadShift(amount) => {
                write!(f, "shift amount '{amount}' is not a non-negative number")
            }
            CalcError::Value(e) => e.fmt(f),
        }
    }
}

impl Error for CalcError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CalcError::Value(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BitValueError> for CalcError {
    fn from(e: BitValueError) -> CalcError {
        CalcError::Value(e)
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum Outcome {
    Value(BitVector),
    Truth(bool),
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Outcome::Truth(t) => write!(f, "{t}"),
            Outcome::Value(v) => {
                writeln!(
                    f,
                    "{} {}-bit value",
                    if v.is_signed() { "signed" } else { "unsigned" },
                    v.width()
                )?;
                writeln!(f, "bin: {}", v.bin())?;
                writeln!(f, "oct: {}", v.oct())?;
                writeln!(f, "dec: {}", v.dec())?;
                write!(f, "hex: {}", v.hex())
            }
        }
    }
}

/// The width needed to hold a literal as a signed value.
fn fitted_width(literal: &str) -> Result<usize, CalcError> {
    Ok(BitVector::fitted(literal)?.width())
}

fn shift_amount(literal: &str) -> Result<usize, CalcError> {
    let bad = || CalcError::BadShift(literal.to_string());
    let amount = BitVector::fitted(literal).map_err(|_| bad())?;
    usize::try_from(&amount).map_err(|_| bad())
}

/// The width used when none is given: the narrowest width which holds
/// every numeric operand as a signed value, widened so that the sum,
/// difference or product of those operands also fits.
fn inferred_width(lhs: &str, operation: Option<(Operator, &str)>) -> Result<usize, CalcError> {
    let left = fitted_width(lhs)?;
    let width = match operation {
        None => left,
        Some((op, _)) if op.is_shift() => left,
        Some((op, rhs)) => {
            let right = fitted_width(rhs)?;
            match op {
                Operator::Add | Operator::Sub => left.max(right) + 1,
                Operator::Mul => left + right,
                _ => left.max(right),
            }
        }
    };
    event!(Level::DEBUG, "no width given, using {width} bits");
    Ok(width)
}

/// Evaluates `lhs`, or `lhs op rhs`.
///
/// With an explicit width, binary, octal and hexadecimal literals are
/// bit patterns (so `0xFF` in a signed 8-bit value is -1).  Without
/// one, every literal keeps its numeric value.
pub(crate) fn evaluate(
    lhs: &str,
    operation: Option<(Operator, &str)>,
    width: Option<usize>,
    signed: bool,
) -> Result<Outcome, CalcError> {
    let (width, inferred) = match width {
        Some(w) => (w, false),
        None => (inferred_width(lhs, operation)?, true),
    };
    let build = |literal: &str| -> Result<BitVector, CalcError> {
        if inferred {
            Ok(BitVector::new(&BitVector::fitted(literal)?, width, signed)?)
        } else {
            Ok(BitVector::new(literal, width, signed)?)
        }
    };
    let left = build(lhs)?;
    let (op, rhs) = match operation {
        None => {
            return Ok(Outcome::Value(left));
        }
        Some(operation) => operation,
    };
    event!(Level::INFO, "evaluating {lhs} {op:?} {rhs} in {width} bits");
    let right = || build(rhs);
    let truth = |ordering: fn(Ordering) -> bool| -> Result<Outcome, CalcError> {
        Ok(Outcome::Truth(ordering(left.compare_vector(&right()?))))
    };
    Ok(match op {
        Operator::Add => Outcome::Value(&left + &right()?),
        Operator::Sub => Outcome::Value(&left - &right()?),
        Operator::Mul => Outcome::Value(&left * &right()?),
        Operator::Div => Outcome::Value(left.checked_div(&right()?)?),
        Operator::Rem => Outcome::Value(left.checked_rem(&right()?)?),
        Operator::Pow => Outcome::Value(left.wrapping_pow(&right()?)),
        Operator::And => Outcome::Value(&left & &right()?),
        Operator::Or => Outcome::Value(&left | &right()?),
        Operator::Xor => Outcome::Value(&left ^ &right()?),
        Operator::Shl => Outcome::Value(&left << shift_amount(rhs)?),
        Operator::Shr => Outcome::Value(&left >> shift_amount(rhs)?),
        Operator::Eq => truth(Ordering::is_eq)?,
        Operator::Ne => truth(Ordering::is_ne)?,
        Operator::Lt => truth(Ordering::is_lt)?,
        Operator::Le => truth(Ordering::is_le)?,
        Operator::Gt => truth(Ordering::is_gt)?,
        Operator::Ge => truth(Ordering::is_ge)?,
    })
}
