//! Core processor implementation.
//!
//! This module contains the Tomasulo machine: the CPU container and its
//! per-cycle orchestration, the reservation stations and phases, and the
//! functional units.

/// CPU container, snapshot and cycle orchestration.
pub mod cpu;

/// Reservation stations, ledger and the three pipeline phases.
pub mod pipeline;

/// Functional units (arithmetic, load/store).
pub mod units;

pub use self::cpu::{Cpu, SimulationState};
