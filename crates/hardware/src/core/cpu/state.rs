//! Machine snapshot.
//!
//! [`SimulationState`] is the single struct every phase mutates through
//! `&mut`. It holds no references (producer identity is a station index), so
//! cloning it yields an independent, comparable snapshot.

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;

use crate::common::{Memory, RegisterFile};
use crate::config::PoolConfig;
use crate::core::pipeline::station::StationPool;
use crate::isa::instruction::Instruction;

/// Complete architectural and microarchitectural state at a cycle boundary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationState {
    /// Cycles completed so far.
    pub clock: u64,
    /// Instructions not yet issued, head first.
    pub instructions: VecDeque<Instruction>,
    /// Reservation stations.
    pub stations: StationPool,
    /// Register status table.
    pub registers: RegisterFile,
    /// Data memory.
    pub memory: Memory,
}

impl SimulationState {
    /// Builds the state for a fresh run at clock 0.
    pub fn new(
        program: Vec<Instruction>,
        register_overrides: &BTreeMap<String, i64>,
        memory: &BTreeMap<i64, i64>,
        pools: &[PoolConfig],
    ) -> Self {
        let mut registers = RegisterFile::new();
        registers.apply_overrides(register_overrides);
        Self {
            clock: 0,
            instructions: program.into(),
            stations: StationPool::allocate(pools),
            registers,
            memory: memory.iter().collect(),
        }
    }

    /// Returns `true` when the feed is empty and every station is free.
    pub fn is_drained(&self) -> bool {
        self.instructions.is_empty() && self.stations.is_idle()
    }
}
