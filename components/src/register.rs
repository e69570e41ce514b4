use serde::Serialize;

use base::BitVector;

use super::component::{ComponentId, ComponentKind};
use super::gate::WriteGate;

/// Where a register keeps its value.
#[derive(Clone, Debug)]
pub(crate) enum Storage {
    Owned(BitVector),
    /// A window of `size` bits starting at `start_bit` of another
    /// register.  The window has no storage of its own; it is read
    /// as an unsigned value.
    Slice {
        parent: ComponentId,
        start_bit: usize,
        size: usize,
    },
}

#[derive(Debug)]
pub(crate) struct Register {
    pub(crate) id: ComponentId,
    pub(crate) name: String,
    pub(crate) storage: Storage,
    pub(crate) gate: Box<dyn WriteGate>,
    pub(crate) input: Option<ComponentId>,
    /// The value to be committed at the next down tick.
    pub(crate) staged: Option<BitVector>,
}

impl Register {
    pub(crate) fn kind(&self) -> ComponentKind {
        match self.storage {
            Storage::Owned(_) => ComponentKind::Register,
            Storage::Slice { .. } => ComponentKind::SliceRegister,
        }
    }
}

/// The state of one register, for display or serialization.
#[derive(Clone, Debug, Serialize)]
pub struct RegisterSnapshot {
    pub id: ComponentId,
    pub name: String,
    pub kind: ComponentKind,
    pub value: BitVector,
    pub input: Option<ComponentId>,
    pub pending: bool,
}
