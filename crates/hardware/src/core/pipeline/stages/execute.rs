//! Execute stage.
//!
//! Every busy station whose operands are all resolved makes progress:
//! on its first cycle it records the start, computes the effective address
//! (loads and stores) and loads its timer from the latency table; then the
//! timer counts down by one. Reaching zero records the end of execution.
//! Stations still waiting on a tag are skipped.

use crate::config::Config;
use crate::core::Cpu;
use crate::core::units::lsu::Lsu;

/// Executes the execute stage.
pub fn execute_stage(cpu: &mut Cpu, config: &Config) {
    let Cpu { state, ledger, .. } = cpu;
    let cycle = state.clock + 1;

    for rs in state.stations.iter_mut() {
        if !rs.operands_ready() {
            continue;
        }
        let Some(op) = rs.opcode else {
            continue;
        };

        if rs.time_left.is_none() {
            if let Some(id) = rs.instruction_id {
                ledger.record_exec_start(id, cycle);
            }
            if op.is_memory() {
                let base = rs.vj.unwrap_or(0.0);
                rs.address = Some(Lsu::effective_address(base, rs.address.unwrap_or(0)));
            }
            rs.time_left = Some(config.latencies.get(op));
            tracing::trace!(cycle, station = %rs.name, address = ?rs.address, "exec start");
        }

        if let Some(left) = rs.time_left.filter(|t| *t > 0) {
            rs.time_left = Some(left - 1);
            if left == 1 {
                if let Some(id) = rs.instruction_id {
                    ledger.record_exec_end(id, cycle);
                }
                tracing::trace!(cycle, station = %rs.name, "exec end");
            }
        }
    }
}
