//! One-bit flags.
//!
//! A buffered flag behaves like any other clocked component: `set`,
//! `clear` and `complement` are staged and take effect at the next
//! down tick.  An interrupt flag changes immediately, and is cleared
//! when it is checked.
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{event, Level};

use super::component::{ComponentId, ComponentKind};
use super::error::BoardError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FlagKind {
    Buffered,
    Interrupt,
}

#[derive(Clone, Debug, Serialize)]
pub struct Flag {
    id: ComponentId,
    name: String,
    kind: FlagKind,
    value: bool,
    #[serde(skip)]
    staged: Option<bool>,
}

impl Flag {
    pub fn new(id: ComponentId, name: &str, kind: FlagKind) -> Flag {
        Flag {
            id,
            name: name.to_string(),
            kind,
            value: false,
            staged: None,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    pub fn component_kind(&self) -> ComponentKind {
        match self.kind {
            FlagKind::Buffered => ComponentKind::Flag,
            FlagKind::Interrupt => ComponentKind::InterruptFlag,
        }
    }

    /// The current (committed) value.
    pub fn value(&self) -> bool {
        self.value
    }

    fn change(&mut self, value: bool) {
        match self.kind {
            FlagKind::Buffered => {
                self.staged = Some(value);
            }
            FlagKind::Interrupt => {
                self.value = value;
            }
        }
    }

    pub fn set(&mut self) {
        self.change(true);
    }

    pub fn clear(&mut self) {
        self.change(false);
    }

    /// Inverts the current value (not any value staged this tick).
    pub fn complement(&mut self) {
        self.change(!self.value);
    }

    pub fn toggle(&mut self) {
        self.complement();
    }

    /// Returns whether the flag was raised, and clears it.
    pub fn check(&mut self) -> bool {
        let raised = self.value;
        self.clear();
        raised
    }

    /// Changes the value at once, whatever the kind of flag.  Any
    /// staged change still applies at the next down tick.
    pub(crate) fn force(&mut self, value: bool) {
        self.value = value;
    }

    pub(crate) fn down_tick(&mut self) {
        if let Some(value) = self.staged.take() {
            event!(
                Level::TRACE,
                flag = %self.id,
                name = %self.name,
                "flag changes from {} to {}",
                self.value,
                value
            );
            self.value = value;
        }
    }
}

/// The flags on a board, in id order.
#[derive(Debug, Default)]
pub struct FlagBank {
    flags: BTreeMap<ComponentId, Flag>,
}

impl FlagBank {
    pub fn contains(&self, id: ComponentId) -> bool {
        self.flags.contains_key(&id)
    }

    pub fn get(&self, id: ComponentId) -> Option<&Flag> {
        self.flags.get(&id)
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Flag> {
        self.flags.get_mut(&id)
    }

    pub fn is_set(&self, id: ComponentId) -> bool {
        self.flags.get(&id).is_some_and(Flag::value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    pub(crate) fn insert(&mut self, flag: Flag) -> Result<(), BoardError> {
        let id = flag.id;
        if self.flags.contains_key(&id) {
            return Err(BoardError::DuplicateComponent(id));
        }
        self.flags.insert(id, flag);
        Ok(())
    }

    pub(crate) fn force(&mut self, id: ComponentId, value: bool) {
        if let Some(flag) = self.flags.get_mut(&id) {
            flag.force(value);
        }
    }

    pub(crate) fn down_tick(&mut self) {
        for flag in self.flags.values_mut() {
            flag.down_tick();
        }
    }
}
