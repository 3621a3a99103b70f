//! Pipeline phase implementations.
//!
//! The three phases of a Tomasulo cycle, run in this order each step:
//! 1. **Write-result:** One completed station broadcasts on the common data bus.
//! 2. **Execute:** Ready stations start or continue counting down their latency.
//! 3. **Issue:** The head of the instruction feed enters a free station.

/// Execute phase.
pub mod execute;

/// Issue phase.
pub mod issue;

/// Write-result phase (common data bus arbitration).
pub mod write_result;

/// Execute stage entry point.
pub use execute::execute_stage;
/// Issue stage entry point.
pub use issue::issue_stage;
/// Write-result stage entry point.
pub use write_result::write_result_stage;
