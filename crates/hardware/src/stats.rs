//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the Tomasulo machine. It provides:
//! 1. **Cycle and IPC:** Total cycles, issued and retired instructions.
//! 2. **Hazards:** Structural stalls and common data bus contention.
//! 3. **Renaming:** Broadcasts that were kept out of the register table
//!    because a newer producer had already claimed the register.

use serde::Serialize;

/// Simulation statistics for one run (reset by `initialize`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total cycles elapsed.
    pub cycles: u64,
    /// Instructions moved from the feed into a station.
    pub instructions_issued: u64,
    /// Stations freed by the write-result phase (stores included).
    pub instructions_retired: u64,
    /// Completed stores (they retire without a broadcast).
    pub stores_retired: u64,
    /// Cycles in which the head of the feed found no free matching station.
    pub stalls_structural: u64,
    /// Cycles in which more than one station was waiting for the bus.
    pub cdb_conflicts: u64,
    /// Broadcasts that did not update their destination register.
    pub stale_writes_suppressed: u64,
    /// Operand slots filled by broadcasts.
    pub operands_forwarded: u64,
}

impl SimStats {
    /// Retired instructions per cycle.
    pub fn ipc(&self) -> f64 {
        let cyc = self.cycles.max(1);
        self.instructions_retired as f64 / cyc as f64
    }

    /// Prints a summary to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("TOMASULO SIMULATION STATISTICS");
        println!("==========================================================");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts_issued         {}", self.instructions_issued);
        println!("sim_insts_retired        {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", self.ipc());
        println!("----------------------------------------------------------");
        println!("HAZARDS");
        println!("  stalls.structural      {}", self.stalls_structural);
        println!("  cdb.conflicts          {}", self.cdb_conflicts);
        println!("RENAMING");
        println!("  stale_writes           {}", self.stale_writes_suppressed);
        println!("  operands_forwarded     {}", self.operands_forwarded);
        println!("  stores_retired         {}", self.stores_retired);
        println!("==========================================================");
    }
}
