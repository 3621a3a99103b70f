//! Cycle orchestration.
//!
//! One call to [`Cpu::tick`] is one clock cycle: write-result, then execute,
//! then issue, then the clock advances. Write-result runs first so that a
//! value broadcast this cycle can start a dependent station's execution and
//! free a station for issue within the same step.

use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::stages::{execute_stage, issue_stage, write_result_stage};

impl Cpu {
    /// Advances the machine by exactly one cycle.
    pub fn tick(&mut self, config: &Config) {
        write_result_stage(self, config);
        execute_stage(self, config);
        issue_stage(self);

        self.state.clock += 1;
        self.stats.cycles += 1;
    }
}
