//! Load/Store Unit (LSU).
//!
//! Address generation happens once, when a load or store starts executing:
//! the resolved base value is folded into the staged offset. Memory itself
//! is only touched when the station wins the common data bus.

use crate::common::{Memory, Value};

/// Load/Store Unit for word memory operations.
#[derive(Debug)]
pub struct Lsu;

impl Lsu {
    /// Folds the base register value into the immediate offset.
    ///
    /// The sum is truncated toward zero; non-finite bases saturate
    /// (`NaN` maps to address 0).
    ///
    /// # Examples
    ///
    /// ```
    /// use tomasulo_core::core::units::lsu::Lsu;
    ///
    /// assert_eq!(Lsu::effective_address(4.0, 100), 104);
    /// assert_eq!(Lsu::effective_address(-0.5, 10), 9);
    /// ```
    pub fn effective_address(base: Value, offset: i64) -> i64 {
        (base + offset as Value) as i64
    }

    /// Reads the word at `addr`; unmapped addresses read as zero.
    #[inline]
    pub fn load(memory: &Memory, addr: i64) -> Value {
        memory.read(addr)
    }

    /// Writes `value` at `addr`. Never fails.
    #[inline]
    pub fn store(memory: &mut Memory, addr: i64, value: Value) {
        memory.write(addr, value);
    }
}
