//! Execute phase tests.
//!
//! Latency accounting, address folding and operand-wait behaviour.

use rstest::rstest;

use tomasulo_core::config::{Config, ConfigUpdate, LedgerMatching};
use tomasulo_core::core::pipeline::station::StationState;
use tomasulo_core::isa::{Instruction, Opcode};

use crate::common::harness::{TestContext, cycles};

#[rstest]
#[case::add(Instruction::arithmetic(Opcode::Add, "R3", "R1", "R2"))]
#[case::sub(Instruction::arithmetic(Opcode::Sub, "R3", "R1", "R2"))]
#[case::mul(Instruction::arithmetic(Opcode::Mul, "R3", "R1", "R2"))]
#[case::div(Instruction::arithmetic(Opcode::Div, "R3", "R1", "R2"))]
#[case::addi(Instruction::add_immediate("R3", "R1", 4))]
#[case::lw(Instruction::load("R3", 8, "R1"))]
#[case::sw(Instruction::store("R3", 8, "R1"))]
fn lone_instruction_timing_follows_latency(
    #[case] inst: Instruction,
    #[values(1, 2, 5)] latency: u32,
) {
    let mut config = Config::default();
    config.latencies.set(inst.opcode, latency);
    let mut ctx = TestContext::with_config(config)
        .load_program(vec![inst])
        .start();
    let taken = ctx.run_counting();

    let issue = 1;
    let start = issue + 1;
    let end = start + u64::from(latency) - 1;
    assert_eq!(ctx.timing(0), cycles(issue, start, end, end + 1));
    assert_eq!(taken, end + 1);
}

#[test]
fn waiting_station_makes_no_progress() {
    let mut ctx = TestContext::new()
        .load("MUL R1, R2, R3\nADD R4, R1, R1")
        .start();
    ctx.step_n(5);

    let add = ctx.state().stations.by_name("Add1").unwrap();
    assert_eq!(add.state(), StationState::WaitingOperands);
    assert_eq!(add.time_left, None);
    assert_eq!(ctx.entry(1).exec_start, None);
}

#[test]
fn address_is_folded_once_at_execution_start() {
    let mut ctx = TestContext::new()
        .with_reg("R2", 100)
        .load("LW R1, 8(R2)")
        .start();

    ctx.step();
    let address = |ctx: &TestContext| ctx.state().stations.by_name("Load1").unwrap().address;
    assert_eq!(address(&ctx), Some(8));
    ctx.step();
    assert_eq!(address(&ctx), Some(108));
    ctx.step();
    assert_eq!(address(&ctx), Some(108));
}

#[test]
fn latency_update_applies_to_later_starts() {
    let mut ctx = TestContext::new().load("ADD R1, R2, R3").start();
    ctx.step();
    ctx.sim
        .update_config(ConfigUpdate::latency(Opcode::Add, 5))
        .unwrap();
    ctx.run();
    assert_eq!(ctx.timing(0), cycles(1, 2, 6, 7));
}

#[test]
fn latency_update_leaves_running_timer_alone() {
    let mut ctx = TestContext::new().load("MUL R1, R2, R3").start();
    ctx.step_n(2);
    ctx.sim
        .update_config(ConfigUpdate::latency(Opcode::Mul, 1))
        .unwrap();
    ctx.run();
    assert_eq!(ctx.timing(0), cycles(1, 2, 9, 10));
}

#[test]
fn zero_latency_completes_without_an_end_cycle() {
    let mut config = Config::default();
    config.latencies.set(Opcode::Add, 0);
    config.ledger_matching = LedgerMatching::ByInstruction;
    let mut ctx = TestContext::with_config(config)
        .with_reg("R1", 2)
        .load("ADD R3, R1, R1")
        .start();
    ctx.run();

    assert_eq!(ctx.timing(0), (Some(1), Some(2), None, Some(3)));
    assert_eq!(ctx.reg("R3"), 4.0);
}
