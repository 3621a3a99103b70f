//! Functional units.
//!
//! The arithmetic unit and the load/store unit. Timing lives in the
//! execute stage; these units only compute values and addresses.

/// Arithmetic unit (`ADD`, `SUB`, `MUL`, `DIV`, `ADDI`).
pub mod alu;

/// Load/store unit (address generation, memory access).
pub mod lsu;
