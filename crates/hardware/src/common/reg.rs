//! Register Status Table.
//!
//! Every architectural register carries its committed value and, while an
//! in-flight instruction is going to overwrite it, the tag of the producing
//! reservation station. It provides:
//! 1. **Lookup by name:** Registers are addressed by their assembly name (`R7`).
//! 2. **Renaming:** Issue overwrites the producer tag; the newest claim wins.
//! 3. **Stale-write protection:** A broadcast only lands if its tag is still current.
//!
//! Names that do not match an architectural register are tolerated: they read
//! as zero and ignore writes.

use serde::Serialize;

use crate::common::Value;
use crate::common::constants::{REGISTER_COUNT, REGISTER_PREFIX};
use crate::core::pipeline::station::StationTag;

/// State of one architectural register.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterStatus {
    /// Assembly name, e.g. `R3`.
    pub name: String,
    /// Last published value.
    pub value: Value,
    /// Station that will produce the next value, if any.
    pub producer: Option<StationTag>,
}

impl RegisterStatus {
    fn new(name: String) -> Self {
        Self {
            name,
            value: 0.0,
            producer: None,
        }
    }
}

/// The Register Status Table: a fixed set of `R0..R31`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RegisterFile {
    regs: Vec<RegisterStatus>,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates the table with every register at zero and no producers.
    pub fn new() -> Self {
        let regs = (0..REGISTER_COUNT)
            .map(|i| RegisterStatus::new(format!("{REGISTER_PREFIX}{i}")))
            .collect();
        Self { regs }
    }

    /// Applies initial values by register name.
    ///
    /// Names outside the architectural set are skipped.
    pub fn apply_overrides<'a, I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (&'a String, &'a i64)>,
    {
        for (name, value) in overrides {
            if let Some(reg) = self.get_mut(name) {
                reg.value = *value as Value;
            } else {
                tracing::debug!(register = %name, "ignoring override for unknown register");
            }
        }
    }

    /// Looks up a register by exact name.
    pub fn get(&self, name: &str) -> Option<&RegisterStatus> {
        self.regs.iter().find(|r| r.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut RegisterStatus> {
        self.regs.iter_mut().find(|r| r.name == name)
    }

    /// Current value of `name`, or zero for an unknown register.
    pub fn value(&self, name: &str) -> Value {
        self.get(name).map_or(0.0, |r| r.value)
    }

    /// Pending producer of `name`, if any.
    pub fn producer(&self, name: &str) -> Option<StationTag> {
        self.get(name).and_then(|r| r.producer)
    }

    /// Marks `tag` as the producer of `name`, replacing any older claim.
    pub fn set_producer(&mut self, name: &str, tag: StationTag) {
        if let Some(reg) = self.get_mut(name) {
            reg.producer = Some(tag);
        }
    }

    /// Publishes `value` into `name` only if `tag` is still its producer.
    ///
    /// Returns `false` when a later instruction has already renamed the
    /// register, in which case the table is left untouched.
    pub fn publish_if_match(&mut self, name: &str, tag: StationTag, value: Value) -> bool {
        match self.get_mut(name) {
            Some(reg) if reg.producer == Some(tag) => {
                reg.value = value;
                reg.producer = None;
                true
            }
            _ => false,
        }
    }

    /// Iterates registers in architectural order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisterStatus> {
        self.regs.iter()
    }

    /// Number of architectural registers.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }
}
