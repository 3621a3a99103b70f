//! Write-result stage (common data bus).
//!
//! At most one completed station broadcasts per cycle: the first one in pool
//! order. Others that are also complete keep waiting. The broadcast value goes
//! to the destination register only if that register still names this station
//! as its producer, and independently to every station waiting on the tag.
//! Stores write memory and broadcast nothing.

use crate::config::Config;
use crate::core::Cpu;
use crate::core::units::alu::Alu;
use crate::core::units::lsu::Lsu;
use crate::isa::opcode::OpClass;

/// Executes the write-result stage.
pub fn write_result_stage(cpu: &mut Cpu, config: &Config) {
    let Cpu {
        state,
        ledger,
        stats,
    } = cpu;
    let Some(tag) = state.stations.first_complete() else {
        return;
    };
    if state.stations.complete_count() > 1 {
        stats.cdb_conflicts += 1;
    }
    let cycle = state.clock + 1;

    let rs = &state.stations[tag];
    let vj = rs.vj.unwrap_or(0.0);
    let vk = rs.vk.unwrap_or(0.0);
    let address = rs.address;
    let dest = rs.dest.clone();
    let instruction_id = rs.instruction_id;

    let result = match rs.opcode {
        Some(op) => match op.class() {
            OpClass::Arithmetic | OpClass::Immediate => Alu::execute(op, vj, vk),
            OpClass::Load => Some(address.map_or(0.0, |a| Lsu::load(&state.memory, a))),
            OpClass::Store => {
                if let Some(a) = address {
                    Lsu::store(&mut state.memory, a, vk);
                }
                stats.stores_retired += 1;
                None
            }
        },
        None => None,
    };

    if let Some(value) = result {
        if let Some(reg) = dest.as_deref() {
            let published = state.registers.publish_if_match(reg, tag, value);
            if !published && state.registers.get(reg).is_some() {
                stats.stale_writes_suppressed += 1;
                tracing::debug!(
                    cycle,
                    station = %state.stations.name(tag),
                    register = reg,
                    "register renamed since issue; broadcast not written back"
                );
            }
        }
        let forwarded = state.stations.broadcast(tag, value);
        stats.operands_forwarded += forwarded as u64;
        tracing::trace!(
            cycle,
            station = %state.stations.name(tag),
            value,
            forwarded,
            "broadcast"
        );
    }

    state.stations[tag].release();
    stats.instructions_retired += 1;

    if let Some(id) = instruction_id {
        let _ = ledger.record_write_result(id, cycle, config.ledger_matching);
    }
}
