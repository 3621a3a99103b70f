//! Simulation driver.
//!
//! [`Simulator`] is the entry point collaborators use: initialize with a
//! program, step it one cycle at a time, and read back the snapshot, ledger
//! and statistics.

/// Simulator facade.
pub mod simulator;

pub use simulator::Simulator;
