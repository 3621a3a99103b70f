//! Tomasulo pipeline.
//!
//! This module contains the dynamic-scheduling machinery:
//! 1. **Stations:** The reservation station pool and producer tags.
//! 2. **Ledger:** Per-instruction issue/execute/write-result cycles.
//! 3. **Stages:** Issue, execute and write-result phases.

/// Instruction status ledger.
pub mod ledger;

/// Phase implementations.
pub mod stages;

/// Reservation stations and producer tags.
pub mod station;
