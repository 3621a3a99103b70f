//! Simulator facade tests: lifecycle, re-initialization and configuration.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;

use tomasulo_core::config::{Config, ConfigUpdate, PoolConfig};
use tomasulo_core::isa::Opcode;
use tomasulo_core::isa::decode::parse_program;
use tomasulo_core::{SimError, Simulator};

use crate::common::harness::{TestContext, init_tracing};

#[test]
fn every_accessor_requires_initialize() {
    init_tracing();
    let mut sim = Simulator::new(Config::default());
    assert!(matches!(sim.advance_cycle(), Err(SimError::NotInitialized)));
    assert!(matches!(sim.snapshot(), Err(SimError::NotInitialized)));
    assert!(matches!(sim.ledger(), Err(SimError::NotInitialized)));
    assert!(matches!(sim.stats(), Err(SimError::NotInitialized)));
    assert!(matches!(sim.run_until_drained(5), Err(SimError::NotInitialized)));
}

#[test]
fn initialize_resets_everything() {
    let mut ctx = TestContext::new()
        .with_reg("R1", 3)
        .load("MUL R2, R1, R1\nADD R3, R1, R1")
        .start();
    ctx.step_n(4);
    assert!(ctx.clock() > 0);

    ctx.sim
        .initialize(parse_program("SUB R4, R1, R1"), &BTreeMap::new(), &BTreeMap::new())
        .unwrap();
    let state = ctx.state();
    assert_eq!(state.clock, 0);
    assert_eq!(state.instructions.len(), 1);
    assert!(state.stations.is_idle());
    assert_eq!(ctx.reg("R1"), 0.0);
    assert_eq!(ctx.ledger().len(), 1);
    assert_eq!(ctx.stats().cycles, 0);
}

#[test]
fn idle_steps_only_advance_the_clock() {
    let mut ctx = TestContext::new()
        .with_reg("R1", 2)
        .load("ADD R2, R1, R1")
        .start();
    let taken = ctx.run_counting();
    let before = ctx.state().clone();

    ctx.step_n(3);
    let after = ctx.state();
    assert_eq!(after.clock, taken + 3);
    assert_eq!(after.registers, before.registers);
    assert_eq!(after.stations, before.stations);
    assert_eq!(after.memory, before.memory);
}

#[test]
fn pool_changes_wait_for_reinitialize() {
    let mut ctx = TestContext::new().start();
    assert_eq!(ctx.state().stations.len(), 9);

    ctx.sim
        .update_config(ConfigUpdate {
            station_pools: Some(vec![PoolConfig::new("Any", &Opcode::ALL, 1)]),
            ..ConfigUpdate::default()
        })
        .unwrap();
    assert_eq!(ctx.state().stations.len(), 9);

    ctx.sim
        .initialize(Vec::new(), &BTreeMap::new(), &BTreeMap::new())
        .unwrap();
    assert_eq!(ctx.state().stations.len(), 1);
    assert!(ctx.state().stations.by_name("Any1").is_some());
}

#[test]
fn initialize_with_replaces_config() {
    init_tracing();
    let mut sim = Simulator::default();
    let mut config = Config::default();
    config.latencies.set(Opcode::Add, 7);
    sim.initialize_with(parse_program("ADD R1, R2, R3"), &BTreeMap::new(), &BTreeMap::new(), config)
        .unwrap();
    assert_eq!(sim.config().latencies.get(Opcode::Add), 7);
    assert_eq!(sim.run_until_drained(100).unwrap(), 9);
}

#[test]
fn invalid_config_refuses_to_initialize() {
    init_tracing();
    let config = Config {
        station_pools: vec![
            PoolConfig::new("Dup", &[Opcode::Add], 1),
            PoolConfig::new("Dup", &[Opcode::Sub], 1),
        ],
        ..Config::default()
    };
    let mut sim = Simulator::new(config);
    let err = sim
        .initialize(Vec::new(), &BTreeMap::new(), &BTreeMap::new())
        .unwrap_err();
    assert!(matches!(err, SimError::InvalidConfig(_)));
    assert!(sim.snapshot().is_err());
}

#[test]
fn snapshot_serializes_to_json() {
    let mut ctx = TestContext::new()
        .with_reg("R1", 4)
        .with_mem(8, 1)
        .load("ADD R2, R1, R1\nSW R2, 8(R0)")
        .start();
    ctx.step_n(2);

    let json = serde_json::to_value(ctx.state()).unwrap();
    assert_eq!(json["clock"], 2);
    assert_eq!(json["registers"][1]["name"], "R1");
    assert_eq!(json["registers"][2]["producer"], 0);
    assert_eq!(json["memory"]["8"], 1.0);

    let ledger = serde_json::to_value(ctx.ledger()).unwrap();
    assert_eq!(ledger[0]["issue"], 1);
    assert!(ledger[1]["exec_start"].is_null());
}

#[test]
fn pool_accepting_no_opcodes_stays_idle() {
    init_tracing();
    let config = Config {
        station_pools: vec![
            PoolConfig::new("Add", &[Opcode::Add], 1),
            PoolConfig::new("Idle", &[], 1),
        ],
        ..Config::default()
    };
    let mut sim = Simulator::new(config);
    sim.initialize(parse_program("ADD R1, R0, R0"), &BTreeMap::new(), &BTreeMap::new())
        .unwrap();
    sim.advance_cycle().unwrap();

    let state = sim.snapshot().unwrap();
    assert_eq!(state.instructions.len(), 0);
    assert!(state.stations.by_name("Add1").unwrap().busy);
    assert!(!state.stations.by_name("Idle1").unwrap().busy);

    assert!(sim.run_until_drained(20).unwrap() < 20);
    assert!(sim.is_drained());
}

#[test]
fn update_config_accepts_a_pool_without_opcodes() {
    let mut sim = Simulator::new(Config::default());
    sim.update_config(ConfigUpdate {
        station_pools: Some(vec![
            PoolConfig::new("Idle", &[], 2),
            PoolConfig::new("Add", &[Opcode::Add, Opcode::Sub], 1),
        ]),
        ..ConfigUpdate::default()
    })
    .unwrap();
    assert_eq!(sim.config().station_pools.len(), 2);

    sim.initialize(parse_program("SUB R2, R0, R0"), &BTreeMap::new(), &BTreeMap::new())
        .unwrap();
    sim.advance_cycle().unwrap();
    assert!(sim.snapshot().unwrap().stations.by_name("Add1").unwrap().busy);
}
