//! Clocked storage built from bit vectors: registers, slice registers
//! and one-bit flags, wired together on a [`Board`] and advanced by a
//! two-phase ("up" then "down") clock tick.
#![crate_name = "components"]

mod board;
mod component;
mod error;
mod flag;
mod gate;
mod register;

pub use board::Board;
pub use component::{ComponentId, ComponentKind};
pub use error::BoardError;
pub use flag::{Flag, FlagBank, FlagKind};
pub use gate::{AlwaysEnabled, FlagGate, SelfContainedGate, WriteGate};
pub use register::RegisterSnapshot;
