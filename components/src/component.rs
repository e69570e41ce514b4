use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Identifies a register or flag on a [`crate::Board`].  Registers
/// and flags share one numbering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ComponentId(pub u32);

impl From<u32> for ComponentId {
    fn from(n: u32) -> ComponentId {
        ComponentId(n)
    }
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ComponentKind {
    Register,
    SliceRegister,
    Flag,
    InterruptFlag,
}

impl Display for ComponentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            ComponentKind::Register => "register",
            ComponentKind::SliceRegister => "slice register",
            ComponentKind::Flag => "flag",
            ComponentKind::InterruptFlag => "interrupt flag",
        })
    }
}
