//! Write enables for registers.
//!
//! A register only captures its input during the up tick if its gate
//! is enabled, and its gate is consumed (closed again) at every down
//! tick.  The gate either carries its own state or follows a flag on
//! the board.
use std::fmt::Debug;

use tracing::{event, Level};

use super::component::ComponentId;
use super::flag::FlagBank;

pub trait WriteGate: Debug {
    fn enabled(&self, flags: &FlagBank) -> bool;

    /// Called at the end of each down tick.
    fn consume(&mut self, flags: &mut FlagBank);

    /// Enables writing for the next tick.
    fn open(&mut self, flags: &mut FlagBank);

    /// The flag this gate follows, if any.
    fn flag(&self) -> Option<ComponentId> {
        None
    }
}

/// A gate which is never closed.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysEnabled;

impl WriteGate for AlwaysEnabled {
    fn enabled(&self, _flags: &FlagBank) -> bool {
        true
    }

    fn consume(&mut self, _flags: &mut FlagBank) {}

    fn open(&mut self, _flags: &mut FlagBank) {}
}

/// A gate holding its own enable bit.  It starts closed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelfContainedGate {
    open: bool,
}

impl WriteGate for SelfContainedGate {
    fn enabled(&self, _flags: &FlagBank) -> bool {
        self.open
    }

    fn consume(&mut self, _flags: &mut FlagBank) {
        self.open = false;
    }

    fn open(&mut self, _flags: &mut FlagBank) {
        self.open = true;
    }
}

/// A gate driven by a flag on the board.  Consuming the gate lowers
/// the flag immediately, whatever kind of flag it is.
#[derive(Debug, Clone, Copy)]
pub struct FlagGate {
    flag: ComponentId,
}

impl FlagGate {
    pub fn new(flag: ComponentId) -> FlagGate {
        FlagGate { flag }
    }
}

impl WriteGate for FlagGate {
    fn enabled(&self, flags: &FlagBank) -> bool {
        flags.is_set(self.flag)
    }

    fn consume(&mut self, flags: &mut FlagBank) {
        if flags.is_set(self.flag) {
            event!(Level::DEBUG, flag = %self.flag, "write-enable flag lowered");
            flags.force(self.flag, false);
        }
    }

    fn open(&mut self, flags: &mut FlagBank) {
        flags.force(self.flag, true);
    }

    fn flag(&self) -> Option<ComponentId> {
        Some(self.flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::{Flag, FlagKind};

    #[test]
    fn test_self_contained_gate() {
        let mut flags = FlagBank::default();
        let mut gate = SelfContainedGate::default();
        assert!(!gate.enabled(&flags));
        gate.open(&mut flags);
        assert!(gate.enabled(&flags));
        gate.consume(&mut flags);
        assert!(!gate.enabled(&flags));
    }

    #[test]
    fn test_flag_gate_follows_flag() {
        let mut flags = FlagBank::default();
        flags
            .insert(Flag::new(ComponentId(7), "we", FlagKind::Buffered))
            .unwrap();
        let mut gate = FlagGate::new(ComponentId(7));
        assert_eq!(gate.flag(), Some(ComponentId(7)));
        assert!(!gate.enabled(&flags));
        gate.open(&mut flags);
        assert!(gate.enabled(&flags));
        assert!(flags.is_set(ComponentId(7)));
        gate.consume(&mut flags);
        assert!(!flags.is_set(ComponentId(7)));
    }

    #[test]
    fn test_always_enabled() {
        let mut flags = FlagBank::default();
        let mut gate = AlwaysEnabled;
        gate.consume(&mut flags);
        assert!(gate.enabled(&flags));
        assert_eq!(gate.flag(), None);
    }
}
