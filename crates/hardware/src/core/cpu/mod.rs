//! CPU core definition and initialization.
//!
//! The [`Cpu`] bundles everything one cycle step mutates:
//! 1. **State:** The [`SimulationState`] snapshot (clock, feed, stations, registers, memory).
//! 2. **Ledger:** Per-instruction cycle records for reporting.
//! 3. **Statistics:** Counters for stalls, broadcasts and retirements.

/// Per-cycle orchestration of the three phases.
pub mod execution;

/// The snapshot struct shared by all phases.
pub mod state;

use std::collections::BTreeMap;

use crate::config::Config;
use crate::core::pipeline::ledger::Ledger;
use crate::isa::instruction::Instruction;
use crate::stats::SimStats;

pub use state::SimulationState;

/// Processor model: snapshot, ledger and statistics.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// Machine state visible to every phase.
    pub state: SimulationState,
    /// Instruction status ledger.
    pub ledger: Ledger,
    /// Run statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Allocates a machine for `program` using the pool layout in `config`.
    pub fn new(
        program: Vec<Instruction>,
        register_overrides: &BTreeMap<String, i64>,
        memory: &BTreeMap<i64, i64>,
        config: &Config,
    ) -> Self {
        let ledger = Ledger::new(&program);
        let state =
            SimulationState::new(program, register_overrides, memory, &config.station_pools);
        tracing::info!(
            instructions = ledger.len(),
            stations = state.stations.len(),
            "machine initialized"
        );
        Self {
            state,
            ledger,
            stats: SimStats::default(),
        }
    }
}
