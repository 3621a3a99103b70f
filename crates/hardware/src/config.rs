//! Configuration system for the Tomasulo simulator.
//!
//! This module defines the structures that parameterize the machine. It provides:
//! 1. **Defaults:** Baseline functional-unit latencies and station pool layout.
//! 2. **Structures:** [`Config`] (full) and [`ConfigUpdate`] (partial overrides).
//! 3. **Loading:** JSON text or files, with missing fields falling back to defaults.
//!
//! Latencies may change between cycles and apply to the next execution start.
//! The pool layout is only read by `initialize`; changing it requires a re-init.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::{SimError, SimResult};
use crate::isa::opcode::Opcode;

/// Default configuration constants for the simulator.
mod defaults {
    /// Load latency in cycles.
    pub const LW: u32 = 2;
    /// Store latency in cycles.
    pub const SW: u32 = 1;
    /// Add latency in cycles.
    pub const ADD: u32 = 2;
    /// Subtract latency in cycles.
    pub const SUB: u32 = 2;
    /// Multiply latency in cycles.
    pub const MUL: u32 = 8;
    /// Divide latency in cycles.
    pub const DIV: u32 = 8;
    /// Add-immediate latency in cycles.
    pub const ADDI: u32 = 1;

    /// Stations in the add/subtract pool.
    pub const ADD_STATIONS: usize = 3;
    /// Stations in the multiply/divide pool.
    pub const MUL_STATIONS: usize = 2;
    /// Stations in the load/store pool.
    pub const LOAD_STATIONS: usize = 2;
    /// Stations in the immediate pool.
    pub const IMM_STATIONS: usize = 2;
}

/// Functional-unit latency, in cycles, for every opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "UPPERCASE")]
pub struct Latencies {
    /// `LW` latency.
    pub lw: u32,
    /// `SW` latency.
    pub sw: u32,
    /// `ADD` latency.
    pub add: u32,
    /// `SUB` latency.
    pub sub: u32,
    /// `MUL` latency.
    pub mul: u32,
    /// `DIV` latency.
    pub div: u32,
    /// `ADDI` latency.
    pub addi: u32,
}

impl Default for Latencies {
    fn default() -> Self {
        Self {
            lw: defaults::LW,
            sw: defaults::SW,
            add: defaults::ADD,
            sub: defaults::SUB,
            mul: defaults::MUL,
            div: defaults::DIV,
            addi: defaults::ADDI,
        }
    }
}

impl Latencies {
    /// Latency of `op`.
    pub const fn get(&self, op: Opcode) -> u32 {
        match op {
            Opcode::Lw => self.lw,
            Opcode::Sw => self.sw,
            Opcode::Add => self.add,
            Opcode::Sub => self.sub,
            Opcode::Mul => self.mul,
            Opcode::Div => self.div,
            Opcode::Addi => self.addi,
        }
    }

    /// Overrides the latency of `op`.
    pub fn set(&mut self, op: Opcode, cycles: u32) {
        let slot = match op {
            Opcode::Lw => &mut self.lw,
            Opcode::Sw => &mut self.sw,
            Opcode::Add => &mut self.add,
            Opcode::Sub => &mut self.sub,
            Opcode::Mul => &mut self.mul,
            Opcode::Div => &mut self.div,
            Opcode::Addi => &mut self.addi,
        };
        *slot = cycles;
    }
}

/// One pool of reservation stations sharing the same accepted opcodes.
///
/// A pool named `Add` with `count = 3` yields stations `Add1`, `Add2`, `Add3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Name prefix of the pool's stations.
    pub name: String,
    /// Opcodes that may be issued into this pool.
    pub opcodes: Vec<Opcode>,
    /// Number of stations in the pool.
    pub count: usize,
}

impl PoolConfig {
    /// Convenience constructor.
    pub fn new(name: &str, opcodes: &[Opcode], count: usize) -> Self {
        Self {
            name: name.to_string(),
            opcodes: opcodes.to_vec(),
            count,
        }
    }

    /// Whether `op` may be issued into this pool.
    pub fn accepts(&self, op: Opcode) -> bool {
        self.opcodes.contains(&op)
    }

    /// Display names of the pool's stations: the pool name followed by the
    /// slot number, starting at 1.
    pub fn station_names(&self) -> impl Iterator<Item = String> {
        (1..=self.count).map(|slot| format!("{}{slot}", self.name))
    }
}

/// How the write-result cycle is attributed in the instruction ledger.
///
/// Scheduling never depends on this choice; it only affects reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum LedgerMatching {
    /// The first entry whose execution has ended but whose result has not been
    /// written receives the cycle, regardless of which station broadcast.
    ///
    /// With several stations finishing together this can credit the cycle to
    /// a different instruction than the one actually broadcast.
    #[default]
    Positional,
    /// The broadcasting station's own instruction receives the cycle.
    ByInstruction,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use tomasulo_core::config::Config;
/// use tomasulo_core::isa::Opcode;
///
/// let config = Config::default();
/// assert_eq!(config.latencies.get(Opcode::Add), 2);
/// assert_eq!(config.station_pools.len(), 4);
/// ```
///
/// Deserializing from JSON; omitted fields keep their defaults:
///
/// ```
/// use tomasulo_core::config::{Config, LedgerMatching};
/// use tomasulo_core::isa::Opcode;
///
/// let json = r#"{
///     "latencies": { "MUL": 4 },
///     "station_pools": [
///         { "name": "Alu", "opcodes": ["ADD", "SUB", "ADDI"], "count": 2 },
///         { "name": "Mem", "opcodes": ["LW", "SW"], "count": 1 }
///     ],
///     "ledger_matching": "ByInstruction"
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.latencies.get(Opcode::Mul), 4);
/// assert_eq!(config.latencies.get(Opcode::Div), 8);
/// assert_eq!(config.station_pools[0].name, "Alu");
/// assert_eq!(config.ledger_matching, LedgerMatching::ByInstruction);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Functional-unit latencies.
    pub latencies: Latencies,
    /// Station pools in declaration order (this order is the issue scan order).
    pub station_pools: Vec<PoolConfig>,
    /// Ledger write-result attribution.
    pub ledger_matching: LedgerMatching,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latencies: Latencies::default(),
            station_pools: vec![
                PoolConfig::new("Add", &[Opcode::Add, Opcode::Sub], defaults::ADD_STATIONS),
                PoolConfig::new("Mul", &[Opcode::Mul, Opcode::Div], defaults::MUL_STATIONS),
                PoolConfig::new("Load", &[Opcode::Lw, Opcode::Sw], defaults::LOAD_STATIONS),
                PoolConfig::new("Imm", &[Opcode::Addi], defaults::IMM_STATIONS),
            ],
            ledger_matching: LedgerMatching::default(),
        }
    }
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`SimError::ConfigParse`] for malformed JSON or unknown opcodes,
    /// [`SimError::InvalidConfig`] if validation fails.
    pub fn from_json(text: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`SimError::ConfigRead`] if the file cannot be read, otherwise as
    /// [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks that pool names are unique and non-empty and that no two pools
    /// generate the same station name.
    ///
    /// Pools that accept no opcodes and opcodes that no pool accepts are both
    /// allowed (such stations stay idle, such instructions never issue) but
    /// are reported at `warn` level.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> SimResult<()> {
        let mut seen = BTreeSet::new();
        for pool in &self.station_pools {
            if pool.name.trim().is_empty() {
                return Err(SimError::InvalidConfig(
                    "station pool name must not be empty".to_string(),
                ));
            }
            if !seen.insert(pool.name.as_str()) {
                return Err(SimError::InvalidConfig(format!(
                    "duplicate station pool name `{}`",
                    pool.name
                )));
            }
            if pool.opcodes.is_empty() {
                tracing::warn!(
                    pool = %pool.name,
                    "station pool accepts no opcodes; it will stay idle"
                );
            }
        }
        let mut stations = BTreeSet::new();
        for pool in &self.station_pools {
            for name in pool.station_names() {
                if !stations.insert(name.clone()) {
                    return Err(SimError::InvalidConfig(format!(
                        "station name `{name}` is generated by more than one pool"
                    )));
                }
            }
        }
        for op in Opcode::ALL {
            if !self.station_pools.iter().any(|p| p.accepts(op)) {
                tracing::warn!(opcode = %op, "no station pool accepts opcode; it will never issue");
            }
        }
        Ok(())
    }

    /// Applies a partial update.
    ///
    /// Latencies merge key by key; the pool list and ledger matching are
    /// replaced only when present in `update`.
    pub fn merge(&mut self, update: ConfigUpdate) {
        for (op, cycles) in update.latencies {
            self.latencies.set(op, cycles);
        }
        if let Some(pools) = update.station_pools {
            self.station_pools = pools;
        }
        if let Some(matching) = update.ledger_matching {
            self.ledger_matching = matching;
        }
    }
}

/// Partial configuration accepted by `update_config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigUpdate {
    /// Per-opcode latency overrides.
    pub latencies: BTreeMap<Opcode, u32>,
    /// Replacement pool list.
    pub station_pools: Option<Vec<PoolConfig>>,
    /// Replacement ledger attribution mode.
    pub ledger_matching: Option<LedgerMatching>,
}

impl ConfigUpdate {
    /// An update that only overrides one latency.
    pub fn latency(op: Opcode, cycles: u32) -> Self {
        Self {
            latencies: BTreeMap::from([(op, cycles)]),
            ..Self::default()
        }
    }
}
