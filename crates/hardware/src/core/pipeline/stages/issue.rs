//! Issue stage.
//!
//! Moves the head of the instruction feed into the first free station of the
//! first pool that accepts its opcode. Later pools are not tried. If that pool
//! is full the feed is left untouched (structural hazard) and nothing else
//! happens this cycle.
//!
//! Source operands are renamed here: a register with a pending producer
//! contributes that producer's tag, otherwise its current value. The
//! destination register is then claimed for the new station, so later
//! instructions read the new tag (this is what removes WAR and WAW hazards).

use crate::common::{RegisterFile, Value};
use crate::core::Cpu;
use crate::core::pipeline::station::{ReservationStation, StationTag};
use crate::isa::instruction::Operand;
use crate::isa::opcode::OpClass;

/// A resolved source: either a value or the tag that will produce it.
fn resolve(registers: &RegisterFile, operand: &Operand) -> (Option<Value>, Option<StationTag>) {
    match operand {
        Operand::Register(name) => match registers.producer(name) {
            Some(tag) => (None, Some(tag)),
            None => (Some(registers.value(name)), None),
        },
        Operand::Immediate(imm) => (Some(*imm as Value), None),
    }
}

/// Immediate field of an instruction; a register in this position is
/// unresolvable and reads as zero.
const fn immediate(operand: &Operand) -> i64 {
    match operand {
        Operand::Immediate(imm) => *imm,
        Operand::Register(_) => 0,
    }
}

/// Executes the issue stage.
///
/// Records the issue cycle as `clock + 1`, the cycle being simulated.
pub fn issue_stage(cpu: &mut Cpu) {
    let state = &mut cpu.state;
    let Some(head) = state.instructions.front() else {
        return;
    };
    let Some(tag) = state.stations.find_free(head.opcode) else {
        cpu.stats.stalls_structural += 1;
        tracing::debug!(
            cycle = state.clock + 1,
            instruction = %head,
            "structural stall: no free station"
        );
        return;
    };
    let Some(inst) = state.instructions.pop_front() else {
        return;
    };
    let cycle = state.clock + 1;

    let registers = &mut state.registers;
    let rs: &mut ReservationStation = &mut state.stations[tag];
    rs.busy = true;
    rs.opcode = Some(inst.opcode);
    rs.instruction_id = Some(inst.id);
    rs.time_left = None;

    match inst.opcode.class() {
        OpClass::Arithmetic => {
            (rs.vj, rs.qj) = resolve(registers, &inst.operand1);
            (rs.vk, rs.qk) = resolve(registers, &inst.operand2);
            registers.set_producer(&inst.dest, tag);
            rs.dest = Some(inst.dest.clone());
        }
        OpClass::Immediate => {
            (rs.vj, rs.qj) = resolve(registers, &inst.operand1);
            rs.vk = Some(immediate(&inst.operand2) as Value);
            rs.qk = None;
            registers.set_producer(&inst.dest, tag);
            rs.dest = Some(inst.dest.clone());
        }
        OpClass::Load => {
            (rs.vj, rs.qj) = resolve(registers, &inst.operand2);
            rs.address = Some(immediate(&inst.operand1));
            rs.vk = None;
            rs.qk = None;
            registers.set_producer(&inst.dest, tag);
            rs.dest = Some(inst.dest.clone());
        }
        OpClass::Store => {
            (rs.vj, rs.qj) = resolve(registers, &inst.operand2);
            rs.address = Some(immediate(&inst.operand1));
            (rs.vk, rs.qk) = resolve(registers, &Operand::Register(inst.dest.clone()));
            rs.dest = None;
        }
    }

    tracing::trace!(
        cycle,
        station = %rs.name,
        instruction = %inst,
        qj = ?rs.qj,
        qk = ?rs.qk,
        "issue"
    );
    cpu.ledger.record_issue(inst.id, cycle);
    cpu.stats.instructions_issued += 1;
}
