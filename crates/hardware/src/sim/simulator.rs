//! Simulator facade: owns the configuration and, once initialized, the CPU.
//!
//! The CPU is created by [`Simulator::initialize`]; until then every
//! operation that needs machine state reports [`SimError::NotInitialized`].

use std::collections::BTreeMap;

use crate::common::error::{SimError, SimResult};
use crate::config::{Config, ConfigUpdate};
use crate::core::Cpu;
use crate::core::SimulationState;
use crate::core::pipeline::ledger::Ledger;
use crate::isa::instruction::Instruction;
use crate::stats::SimStats;

/// Top-level simulator: configuration plus the (optional) machine.
#[derive(Clone, Debug, Default)]
pub struct Simulator {
    config: Config,
    cpu: Option<Cpu>,
}

impl Simulator {
    /// Creates an uninitialized simulator.
    pub const fn new(config: Config) -> Self {
        Self { config, cpu: None }
    }

    /// (Re)initializes the machine with the current configuration.
    ///
    /// Discards any in-flight state. Register overrides naming registers
    /// outside `R0..R31` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if the configuration fails
    /// validation; the previous machine (if any) is kept.
    pub fn initialize(
        &mut self,
        program: Vec<Instruction>,
        register_overrides: &BTreeMap<String, i64>,
        memory: &BTreeMap<i64, i64>,
    ) -> SimResult<()> {
        self.config.validate()?;
        self.cpu = Some(Cpu::new(program, register_overrides, memory, &self.config));
        Ok(())
    }

    /// Replaces the configuration, then initializes.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if `config` fails validation.
    pub fn initialize_with(
        &mut self,
        program: Vec<Instruction>,
        register_overrides: &BTreeMap<String, i64>,
        memory: &BTreeMap<i64, i64>,
        config: Config,
    ) -> SimResult<()> {
        config.validate()?;
        self.config = config;
        self.initialize(program, register_overrides, memory)
    }

    /// Runs exactly one cycle.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotInitialized`] before the first `initialize`.
    pub fn advance_cycle(&mut self) -> SimResult<()> {
        let cpu = self.cpu.as_mut().ok_or(SimError::NotInitialized)?;
        cpu.tick(&self.config);
        Ok(())
    }

    /// Merges a partial configuration.
    ///
    /// Latency changes apply to stations that start executing afterwards.
    /// Pool changes take effect on the next `initialize`. The previous
    /// configuration is kept if the merged one fails validation.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if the merged configuration is invalid.
    pub fn update_config(&mut self, update: ConfigUpdate) -> SimResult<()> {
        let mut merged = self.config.clone();
        merged.merge(update);
        merged.validate()?;
        self.config = merged;
        Ok(())
    }

    /// Current configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Machine state at the last cycle boundary.
    ///
    /// # Errors
    ///
    /// [`SimError::NotInitialized`] before the first `initialize`.
    pub fn snapshot(&self) -> SimResult<&SimulationState> {
        self.cpu().map(|cpu| &cpu.state)
    }

    /// Instruction status ledger.
    ///
    /// # Errors
    ///
    /// [`SimError::NotInitialized`] before the first `initialize`.
    pub fn ledger(&self) -> SimResult<&Ledger> {
        self.cpu().map(|cpu| &cpu.ledger)
    }

    /// Run statistics.
    ///
    /// # Errors
    ///
    /// [`SimError::NotInitialized`] before the first `initialize`.
    pub fn stats(&self) -> SimResult<&SimStats> {
        self.cpu().map(|cpu| &cpu.stats)
    }

    /// The machine, if initialized.
    ///
    /// # Errors
    ///
    /// [`SimError::NotInitialized`] before the first `initialize`.
    pub fn cpu(&self) -> SimResult<&Cpu> {
        self.cpu.as_ref().ok_or(SimError::NotInitialized)
    }

    /// Returns `true` once initialized with an empty feed and no busy station.
    pub fn is_drained(&self) -> bool {
        self.cpu.as_ref().is_some_and(|cpu| cpu.state.is_drained())
    }

    /// Steps until drained or `max_cycles` steps have run.
    ///
    /// Returns the number of cycles stepped by this call. A program whose
    /// opcodes no pool accepts never drains, so the cap always applies.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotInitialized`] before the first `initialize`.
    pub fn run_until_drained(&mut self, max_cycles: u64) -> SimResult<u64> {
        let mut stepped = 0;
        while stepped < max_cycles && !self.cpu()?.state.is_drained() {
            self.advance_cycle()?;
            stepped += 1;
        }
        if !self.is_drained() {
            tracing::warn!(max_cycles, "cycle limit reached before the machine drained");
        }
        Ok(stepped)
    }
}
