//! Tomasulo dynamic-scheduling simulator library.
//!
//! This crate implements a cycle-stepped model of Tomasulo's algorithm with the following:
//! 1. **ISA:** A small opcode set (LW, SW, ADD, SUB, MUL, DIV, ADDI), a text decoder and disassembler.
//! 2. **Core:** Reservation stations, register renaming via producer tags, and a single common data bus.
//! 3. **Ledger:** Per-instruction issue, execute and write-result cycles for reporting.
//! 4. **Simulation:** Configuration, the [`Simulator`] facade and run statistics.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeMap;
//! use tomasulo_core::{Config, Simulator};
//! use tomasulo_core::isa::decode::parse_program;
//!
//! let program = parse_program("ADD R3, R1, R2");
//! let regs = BTreeMap::from([("R1".to_string(), 4), ("R2".to_string(), 5)]);
//!
//! let mut sim = Simulator::new(Config::default());
//! sim.initialize(program, &regs, &BTreeMap::new()).unwrap();
//! let cycles = sim.run_until_drained(100).unwrap();
//!
//! assert_eq!(cycles, 4);
//! assert_eq!(sim.snapshot().unwrap().registers.value("R3"), 9.0);
//! ```

/// Common types and constants (values, registers, memory, errors).
pub mod common;
/// Simulator configuration (latencies, station pools, partial updates).
pub mod config;
/// CPU core (state snapshot, station pool, ledger, phases, functional units).
pub mod core;
/// Instruction set (opcodes, instructions, decoder, disassembler).
pub mod isa;
/// Simulator facade.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Processor model; holds the snapshot, ledger and stats.
pub use crate::core::Cpu;
/// Library error type.
pub use crate::common::error::{SimError, SimResult};
/// Top-level driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
