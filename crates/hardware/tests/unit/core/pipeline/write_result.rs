//! Write-result phase tests.
//!
//! Broadcast results, memory effects and same-cycle wakeup of dependents.

use pretty_assertions::assert_eq;

use tomasulo_core::config::{Config, LedgerMatching};
use tomasulo_core::isa::Opcode;

use crate::common::harness::{TestContext, cycles};

#[test]
fn lone_add_scenario() {
    let mut ctx = TestContext::new().load("ADD R3, R1, R2").start();

    ctx.step_n(3);
    assert_eq!(ctx.producer("R3").as_deref(), Some("Add1"));
    assert_eq!(ctx.entry(0).write_result, None);

    ctx.step();
    assert_eq!(ctx.timing(0), cycles(1, 2, 3, 4));
    assert_eq!(ctx.reg("R3"), 0.0);
    assert_eq!(ctx.producer("R3"), None);
    assert!(ctx.sim.is_drained());
}

#[test]
fn divide_by_zero_broadcasts_infinity() {
    let mut ctx = TestContext::new()
        .with_reg("R1", 7)
        .load("DIV R5, R1, R2")
        .start();
    ctx.run();
    assert_eq!(ctx.reg("R5"), f64::INFINITY);
    assert_eq!(ctx.timing(0), cycles(1, 2, 9, 10));
}

#[test]
fn division_is_not_truncated() {
    let mut ctx = TestContext::new()
        .with_reg("R1", 7)
        .with_reg("R2", 2)
        .load("DIV R3, R1, R2")
        .start();
    ctx.run();
    assert_eq!(ctx.reg("R3"), 3.5);
}

#[test]
fn store_then_load_roundtrip() {
    let mut ctx = TestContext::new()
        .with_reg("R3", 42)
        .load("SW R3, 100(R0)\nLW R4, 100(R0)")
        .start();
    ctx.run();

    assert_eq!(ctx.mem(100), 42.0);
    assert_eq!(ctx.reg("R4"), 42.0);
    assert_eq!(ctx.timing(0), cycles(1, 2, 2, 3));
    assert_eq!(ctx.timing(1), cycles(2, 3, 4, 5));
    assert_eq!(ctx.stats().stores_retired, 1);
}

#[test]
fn load_reads_seeded_memory_and_defaults_to_zero() {
    let mut ctx = TestContext::new()
        .with_mem(6, 9)
        .with_reg("R2", 10)
        .with_reg("R5", 1)
        .load("LW R1, -4(R2)\nLW R5, 500(R0)")
        .start();
    ctx.run();
    assert_eq!(ctx.reg("R1"), 9.0);
    assert_eq!(ctx.reg("R5"), 0.0);
}

#[test]
fn broadcast_wakes_dependent_in_the_same_cycle() {
    let mut ctx = TestContext::new()
        .with_reg("R2", 1)
        .with_reg("R3", 2)
        .load("ADD R1, R2, R3\nADD R4, R1, R1")
        .start();
    ctx.run();

    assert_eq!(ctx.timing(0), cycles(1, 2, 3, 4));
    // The dependent starts executing in cycle 4, the cycle Add1 broadcasts.
    assert_eq!(ctx.timing(1), cycles(2, 4, 5, 6));
    assert_eq!(ctx.reg("R4"), 6.0);
    assert_eq!(ctx.stats().operands_forwarded, 2);
}

#[test]
fn store_broadcasts_nothing() {
    let mut ctx = TestContext::new()
        .with_reg("R1", 5)
        .load("SW R1, 0(R0)\nADD R2, R1, R1")
        .start();
    ctx.run();
    assert_eq!(ctx.mem(0), 5.0);
    assert_eq!(ctx.reg("R1"), 5.0);
    assert_eq!(ctx.stats().operands_forwarded, 0);
}

#[test]
fn simultaneous_completions_drain_one_per_cycle_in_pool_order() {
    // Each instruction issues a cycle later with one cycle less latency, so
    // all four reach the end of execution in cycle 5.
    let mut config = Config::default();
    config.latencies.set(Opcode::Mul, 4);
    config.latencies.set(Opcode::Add, 3);
    config.latencies.set(Opcode::Addi, 2);
    config.latencies.set(Opcode::Lw, 1);
    config.ledger_matching = LedgerMatching::ByInstruction;
    let mut ctx = TestContext::with_config(config)
        .load("MUL R1, R0, R0\nADD R2, R0, R0\nADDI R3, R0, 1\nLW R4, 0(R0)")
        .start();
    ctx.run();

    let ends: Vec<_> = ctx.ledger().entries().iter().map(|e| e.exec_end).collect();
    assert_eq!(ends, [Some(5); 4]);

    let writes: Vec<_> = ctx.ledger().entries().iter().map(|e| e.write_result).collect();
    // Pool order is Add, Mul, Load, Imm.
    assert_eq!(writes, [Some(7), Some(6), Some(9), Some(8)]);
    assert_eq!(ctx.stats().cdb_conflicts, 3);
}
