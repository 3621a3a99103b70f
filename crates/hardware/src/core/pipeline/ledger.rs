//! Instruction status ledger.
//!
//! One entry per program instruction recording the cycle at which it issued,
//! started executing, finished executing and wrote its result. Each field is
//! filled exactly once. The ledger is for reporting; scheduling never reads it.

use serde::Serialize;

use crate::config::LedgerMatching;
use crate::isa::instruction::{Instruction, InstructionId};

/// Cycle numbers recorded for one instruction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InstructionStatus {
    /// The instruction this entry tracks.
    pub instruction: Instruction,
    /// Issue cycle.
    pub issue: Option<u64>,
    /// First execution cycle.
    pub exec_start: Option<u64>,
    /// Last execution cycle.
    pub exec_end: Option<u64>,
    /// Cycle in which the result went out on the common data bus.
    pub write_result: Option<u64>,
}

impl InstructionStatus {
    fn new(instruction: Instruction) -> Self {
        Self {
            instruction,
            issue: None,
            exec_start: None,
            exec_end: None,
            write_result: None,
        }
    }

    /// Instruction id shortcut.
    #[inline]
    pub const fn id(&self) -> InstructionId {
        self.instruction.id
    }
}

/// Ledger of [`InstructionStatus`] entries in program order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<InstructionStatus>,
}

impl Ledger {
    /// Seeds an empty entry for every instruction of `program`.
    pub fn new(program: &[Instruction]) -> Self {
        Self {
            entries: program.iter().cloned().map(InstructionStatus::new).collect(),
        }
    }

    /// All entries in program order.
    pub fn entries(&self) -> &[InstructionStatus] {
        &self.entries
    }

    /// Entry for `id`.
    pub fn get(&self, id: InstructionId) -> Option<&InstructionStatus> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Number of tracked instructions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` for an empty program.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` once every instruction has written its result.
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.write_result.is_some())
    }

    pub(crate) fn record_issue(&mut self, id: InstructionId, cycle: u64) {
        if let Some(e) = self
            .entries
            .iter_mut()
            .find(|e| e.id() == id && e.issue.is_none())
        {
            e.issue = Some(cycle);
        }
    }

    pub(crate) fn record_exec_start(&mut self, id: InstructionId, cycle: u64) {
        if let Some(e) = self
            .entries
            .iter_mut()
            .find(|e| e.id() == id && e.exec_start.is_none())
        {
            e.exec_start = Some(cycle);
        }
    }

    pub(crate) fn record_exec_end(&mut self, id: InstructionId, cycle: u64) {
        if let Some(e) = self
            .entries
            .iter_mut()
            .find(|e| e.id() == id && e.exec_end.is_none())
        {
            e.exec_end = Some(cycle);
        }
    }

    /// Records a write-result for the broadcast of instruction `id`.
    ///
    /// Returns the id of the entry that was actually updated, which under
    /// [`LedgerMatching::Positional`] may differ from `id`.
    pub(crate) fn record_write_result(
        &mut self,
        id: InstructionId,
        cycle: u64,
        matching: LedgerMatching,
    ) -> Option<InstructionId> {
        let entry = match matching {
            LedgerMatching::Positional => self
                .entries
                .iter_mut()
                .find(|e| e.exec_end.is_some() && e.write_result.is_none()),
            LedgerMatching::ByInstruction => self
                .entries
                .iter_mut()
                .find(|e| e.id() == id && e.write_result.is_none()),
        }?;
        entry.write_result = Some(cycle);
        Some(entry.id())
    }
}
