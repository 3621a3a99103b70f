//! Common types shared across the simulator.
//!
//! This module provides the machine state that every pipeline phase touches:
//! 1. **Constants:** Register count and numeric sentinels.
//! 2. **Error Handling:** The crate-wide [`SimError`] type.
//! 3. **Register Status Table:** Values plus renaming tags per register.
//! 4. **Memory:** The sparse data memory read by loads and written by stores.

/// Architectural constants.
pub mod constants;

/// Error types.
pub mod error;

/// Sparse integer-addressed data memory.
pub mod memory;

/// Register status table (value + producer tag).
pub mod reg;

pub use constants::REGISTER_COUNT;
pub use error::{SimError, SimResult};
pub use memory::Memory;
pub use reg::{RegisterFile, RegisterStatus};

/// Operand and result value type.
///
/// Values are floating point so that division yields fractional results and
/// a divide-by-zero can broadcast positive infinity.
pub type Value = f64;
