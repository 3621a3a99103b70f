//! Statistics over the built-in style sample program.
//!
//! The program mixes five stores, four loads and six arithmetic operations,
//! and oversubscribes the two-slot load/store pool.

use pretty_assertions::assert_eq;

use tomasulo_core::stats::SimStats;

use crate::common::harness::TestContext;

const SAMPLE: &str = "\
SW R3,100(R14)
LW  R11,200(R2)
LW  R15,96(R19)
LW  R30,12(R6)
LW  R19,60(R16)
ADD   R6,R2,R3
SUB   R2,R8,R0
DIV   R10,R8,R9
SW R10,100(R2)
MUL   R20,R14,R19
ADD   R3,R4,R4
SUB   R2,R9,R8
SW R2,100(R0)
SW R7,116(R0)
SW R10,228(R0)
";

fn run_sample() -> TestContext {
    let mut ctx = TestContext::new()
        .with_reg("R3", 5)
        .with_reg("R8", 12)
        .with_reg("R9", 4)
        .load(SAMPLE)
        .start();
    ctx.run();
    ctx
}

#[test]
fn counts_every_instruction_once() {
    let ctx = run_sample();
    let stats = ctx.stats();
    assert_eq!(stats.instructions_issued, 15);
    assert_eq!(stats.instructions_retired, 15);
    assert_eq!(stats.stores_retired, 5);
    assert_eq!(stats.cycles, ctx.clock());
    assert!(ctx.ledger().is_complete());
}

#[test]
fn load_store_pool_pressure_shows_as_stalls() {
    let ctx = run_sample();
    assert!(ctx.stats().stalls_structural > 0);
}

#[test]
fn results_match_dataflow() {
    let ctx = run_sample();
    assert_eq!(ctx.reg("R10"), 3.0);
    assert_eq!(ctx.reg("R2"), -8.0);
    assert_eq!(ctx.reg("R3"), 0.0);
    assert_eq!(ctx.reg("R6"), 5.0);
    assert_eq!(ctx.mem(0), 0.0);
    assert_eq!(ctx.mem(100), -8.0);
    assert_eq!(ctx.mem(228), 3.0);
}

#[test]
fn ipc_is_retired_over_cycles() {
    let stats = SimStats {
        cycles: 40,
        instructions_retired: 10,
        ..SimStats::default()
    };
    assert_eq!(stats.ipc(), 0.25);
    assert_eq!(SimStats::default().ipc(), 0.0);
}
