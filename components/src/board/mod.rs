//! The board holds every register and flag and drives the clock.
//!
//! ## Ticks
//!
//! A tick has two phases.  In the up tick, every register whose
//! write gate is enabled captures the value of its input into a
//! staging buffer; nothing visible changes.  In the down tick, the
//! staged values are committed (in component id order), every write
//! gate is consumed, and staged flag changes take effect.  Because all
//! inputs are read before anything is committed, two registers which
//! are each other's input exchange their values in a single tick.
use std::collections::BTreeMap;

use tracing::{event, span, Level};

use base::{BitVector, Value};

use super::component::{ComponentId, ComponentKind};
use super::error::BoardError;
use super::flag::{Flag, FlagBank, FlagKind};
use super::gate::WriteGate;
use super::register::{Register, RegisterSnapshot, Storage};


#[derive(Debug, Default)]
pub struct Board {
    registers: BTreeMap<ComponentId, Register>,
    flags: FlagBank,
    ticks: u64,
}

impl Board {
    pub fn new() -> Board {
        Board::default()
    }

    /// The number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn kind(&self, id: ComponentId) -> Result<ComponentKind, BoardError> {
        if let Some(reg) = self.registers.get(&id) {
            Ok(reg.kind())
        } else if let Some(flag) = self.flags.get(id) {
            Ok(flag.component_kind())
        } else {
            Err(BoardError::UnknownComponent(id))
        }
    }

    pub fn name(&self, id: ComponentId) -> Result<&str, BoardError> {
        if let Some(reg) = self.registers.get(&id) {
            Ok(&reg.name)
        } else if let Some(flag) = self.flags.get(id) {
            Ok(flag.name())
        } else {
            Err(BoardError::UnknownComponent(id))
        }
    }

    fn not_a_register(&self, id: ComponentId) -> BoardError {
        match self.kind(id) {
            Ok(kind) => BoardError::NotARegister { id, kind },
            Err(e) => e,
        }
    }

    fn not_a_flag(&self, id: ComponentId) -> BoardError {
        match self.kind(id) {
            Ok(kind) => BoardError::NotAFlag { id, kind },
            Err(e) => e,
        }
    }

    fn register(&self, id: ComponentId) -> Result<&Register, BoardError> {
        self.registers
            .get(&id)
            .ok_or_else(|| self.not_a_register(id))
    }

    pub fn flag(&self, id: ComponentId) -> Result<&Flag, BoardError> {
        self.flags.get(id).ok_or_else(|| self.not_a_flag(id))
    }

    fn flag_mut(&mut self, id: ComponentId) -> Result<&mut Flag, BoardError> {
        if !self.flags.contains(id) {
            return Err(self.not_a_flag(id));
        }
        self.flags
            .get_mut(id)
            .ok_or(BoardError::UnknownComponent(id))
    }

    pub fn flags(&self) -> &FlagBank {
        &self.flags
    }

    fn check_unused(&self, id: ComponentId) -> Result<(), BoardError> {
        match self.kind(id) {
            Ok(_) => Err(BoardError::DuplicateComponent(id)),
            Err(_) => Ok(()),
        }
    }

    fn check_gate(&self, gate: &dyn WriteGate) -> Result<(), BoardError> {
        match gate.flag() {
            Some(flag) => self.flag(flag).map(|_| ()),
            None => Ok(()),
        }
    }

    fn insert_register(
        &mut self,
        id: ComponentId,
        name: &str,
        storage: Storage,
        gate: Box<dyn WriteGate>,
    ) -> Result<(), BoardError> {
        self.check_unused(id)?;
        self.check_gate(gate.as_ref())?;
        event!(Level::DEBUG, register = %id, name, "adding register");
        self.registers.insert(
            id,
            Register {
                id,
                name: name.to_string(),
                storage,
                gate,
                input: None,
                staged: None,
            },
        );
        Ok(())
    }

    /// Adds a register holding a value of its own, initially zero.
    pub fn add_register(
        &mut self,
        id: ComponentId,
        name: &str,
        width: usize,
        signed: bool,
        gate: Box<dyn WriteGate>,
    ) -> Result<(), BoardError> {
        let value = BitVector::zero(width, signed)?;
        self.insert_register(id, name, Storage::Owned(value), gate)
    }

    /// Adds a register which reads and writes `size` bits of the
    /// register `parent`, starting at bit `start_bit`.
    pub fn add_slice_register(
        &mut self,
        id: ComponentId,
        name: &str,
        parent: ComponentId,
        start_bit: usize,
        size: usize,
        gate: Box<dyn WriteGate>,
    ) -> Result<(), BoardError> {
        let (parent_width, _) = self.shape(parent)?;
        let fits = start_bit
            .checked_add(size)
            .is_some_and(|stop| stop <= parent_width);
        if size == 0 || !fits {
            return Err(BoardError::SliceOutOfRange {
                parent,
                parent_width,
                start_bit,
                size,
            });
        }
        self.insert_register(
            id,
            name,
            Storage::Slice {
                parent,
                start_bit,
                size,
            },
            gate,
        )
    }

    fn insert_flag(&mut self, id: ComponentId, name: &str, kind: FlagKind) -> Result<(), BoardError> {
        self.check_unused(id)?;
        event!(Level::DEBUG, flag = %id, name, ?kind, "adding flag");
        self.flags.insert(Flag::new(id, name, kind))
    }

    pub fn add_flag(&mut self, id: ComponentId, name: &str) -> Result<(), BoardError> {
        self.insert_flag(id, name, FlagKind::Buffered)
    }

    pub fn add_interrupt_flag(&mut self, id: ComponentId, name: &str) -> Result<(), BoardError> {
        self.insert_flag(id, name, FlagKind::Interrupt)
    }

    /// Makes `source` (a register or a flag) the input of `register`.
    pub fn connect(&mut self, register: ComponentId, source: ComponentId) -> Result<(), BoardError> {
        self.kind(source)?;
        let not_a_register = self.not_a_register(register);
        let reg = self.registers.get_mut(&register).ok_or(not_a_register)?;
        event!(Level::DEBUG, register = %register, source = %source, "connecting input");
        reg.input = Some(source);
        Ok(())
    }

    pub fn disconnect(&mut self, register: ComponentId) -> Result<(), BoardError> {
        let not_a_register = self.not_a_register(register);
        let reg = self.registers.get_mut(&register).ok_or(not_a_register)?;
        reg.input = None;
        Ok(())
    }

    /// The width and signedness of values held by `id`.
    fn shape(&self, id: ComponentId) -> Result<(usize, bool), BoardError> {
        match &self.register(id)?.storage {
            Storage::Owned(v) => Ok((v.width(), v.is_signed())),
            Storage::Slice { size, .. } => Ok((*size, false)),
        }
    }

    /// The current value of a register, or of a flag as a one-bit
    /// unsigned value.
    pub fn value(&self, id: ComponentId) -> Result<BitVector, BoardError> {
        if let Some(flag) = self.flags.get(id) {
            return Ok(BitVector::new(u8::from(flag.value()), 1, false)?);
        }
        match &self.register(id)?.storage {
            Storage::Owned(v) => Ok(v.clone()),
            Storage::Slice {
                parent,
                start_bit,
                size,
            } => Ok(self.value(*parent)?.field(*start_bit, *size, false)?),
        }
    }

    /// Stores `value`, which must already have the shape of `id`.
    fn write(&mut self, id: ComponentId, value: BitVector) -> Result<(), BoardError> {
        let not_a_register = self.not_a_register(id);
        let storage = &mut self
            .registers
            .get_mut(&id)
            .ok_or(not_a_register)?
            .storage;
        match storage {
            Storage::Owned(current) => {
                event!(
                    Level::TRACE,
                    register = %id,
                    "value changes from {} to {}",
                    current,
                    value
                );
                *current = value;
                Ok(())
            }
            Storage::Slice {
                parent, start_bit, ..
            } => {
                let (parent, start_bit) = (*parent, *start_bit);
                let updated = self.value(parent)?.with_field(start_bit, &value)?;
                self.write(parent, updated)
            }
        }
    }

    /// Converts `value` to the shape of register `id`.
    fn fit<'a, V: Into<Value<'a>>>(&self, id: ComponentId, value: V) -> Result<BitVector, BoardError> {
        let (width, signed) = self.shape(id)?;
        Ok(BitVector::new(value, width, signed)?)
    }

    /// Writes a register immediately, without waiting for a tick.  A
    /// slice register writes through to its parent.
    pub fn load<'a, V: Into<Value<'a>>>(&mut self, id: ComponentId, value: V) -> Result<(), BoardError> {
        let value = self.fit(id, value)?;
        self.write(id, value)
    }

    fn stage(&mut self, id: ComponentId, value: BitVector) -> Result<(), BoardError> {
        let not_a_register = self.not_a_register(id);
        let reg = self.registers.get_mut(&id).ok_or(not_a_register)?;
        event!(Level::TRACE, register = %id, "staging {}", value);
        reg.staged = Some(value);
        Ok(())
    }

    /// Clears a register at the next commit, or clears a flag.  The
    /// staged zero is dropped if the register's gate is closed at the
    /// up tick.
    pub fn clear(&mut self, id: ComponentId) -> Result<(), BoardError> {
        if self.flags.contains(id) {
            self.flag_mut(id)?.clear();
            return Ok(());
        }
        let zero = self.fit(id, 0)?;
        self.stage(id, zero)
    }

    /// Stages the current value of a register plus one.
    pub fn increment(&mut self, id: ComponentId) -> Result<(), BoardError> {
        if self.flags.contains(id) {
            return Err(self.not_a_register(id));
        }
        let next = self.value(id)?.increment();
        self.stage(id, next)
    }

    pub fn set(&mut self, id: ComponentId) -> Result<(), BoardError> {
        self.flag_mut(id)?.set();
        Ok(())
    }

    pub fn complement(&mut self, id: ComponentId) -> Result<(), BoardError> {
        self.flag_mut(id)?.complement();
        Ok(())
    }

    pub fn toggle(&mut self, id: ComponentId) -> Result<(), BoardError> {
        self.complement(id)
    }

    /// Reads a flag and clears it.
    pub fn check(&mut self, id: ComponentId) -> Result<bool, BoardError> {
        Ok(self.flag_mut(id)?.check())
    }

    /// Opens the write gate of a register.
    pub fn enable_write(&mut self, id: ComponentId) -> Result<(), BoardError> {
        let not_a_register = self.not_a_register(id);
        let reg = self.registers.get_mut(&id).ok_or(not_a_register)?;
        reg.gate.open(&mut self.flags);
        event!(Level::DEBUG, register = %id, "write enabled");
        Ok(())
    }

    /// The first phase of a tick: registers with an open gate capture
    /// their inputs.  A register whose gate is closed discards
    /// anything staged for it.
    pub fn up_tick(&mut self) -> Result<(), BoardError> {
        let span = span!(Level::DEBUG, "up_tick", tick = self.ticks);
        let _enter = span.enter();
        let mut captured: Vec<(ComponentId, Option<BitVector>)> =
            Vec::with_capacity(self.registers.len());
        for (id, reg) in &self.registers {
            if !reg.gate.enabled(&self.flags) {
                if reg.staged.is_some() {
                    event!(Level::TRACE, register = %id, "write disabled, discarding staged value");
                }
                captured.push((*id, None));
                continue;
            }
            match reg.input {
                None => {
                    captured.push((*id, reg.staged.clone()));
                }
                Some(source) => {
                    let value = self.fit(*id, &self.value(source)?)?;
                    event!(Level::TRACE, register = %id, source = %source, "captured {}", value);
                    captured.push((*id, Some(value)));
                }
            }
        }
        for (id, staged) in captured {
            if let Some(reg) = self.registers.get_mut(&id) {
                reg.staged = staged;
            }
        }
        Ok(())
    }

    /// The second phase of a tick: commits staged register values,
    /// consumes every write gate, then commits staged flag changes.
    pub fn down_tick(&mut self) -> Result<(), BoardError> {
        let span = span!(Level::DEBUG, "down_tick", tick = self.ticks);
        let _enter = span.enter();
        let pending: Vec<(ComponentId, BitVector)> = self
            .registers
            .iter_mut()
            .filter_map(|(id, reg)| reg.staged.take().map(|value| (*id, value)))
            .collect();
        for (id, value) in pending {
            self.write(id, value)?;
        }
        for reg in self.registers.values_mut() {
            reg.gate.consume(&mut self.flags);
        }
        self.flags.down_tick();
        self.ticks += 1;
        event!(Level::DEBUG, "tick {} complete", self.ticks);
        Ok(())
    }

    pub fn tick(&mut self) -> Result<(), BoardError> {
        self.up_tick()?;
        self.down_tick()
    }

    /// The state of every register, in id order.
    pub fn snapshot(&self) -> Result<Vec<RegisterSnapshot>, BoardError> {
        self.registers
            .values()
            .map(|reg| -> Result<RegisterSnapshot, BoardError> {
                Ok(RegisterSnapshot {
                    id: reg.id,
                    name: reg.name.clone(),
                    kind: reg.kind(),
                    value: self.value(reg.id)?,
                    input: reg.input,
                    pending: reg.staged.is_some(),
                })
            })
            .collect()
    }
}
