//! Decoded instruction records.
//!
//! An [`Instruction`] is immutable once created. Its identity is an
//! [`InstructionId`] drawn from a process-wide counter, so two decodes of the
//! same text still yield distinct instructions.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::isa::opcode::{OpClass, Opcode};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique, process-lifetime-stable instruction identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct InstructionId(pub u64);

impl InstructionId {
    /// Allocates a fresh id.
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for InstructionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A source operand: either a register name or a decimal immediate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    /// Register reference, kept exactly as written.
    Register(String),
    /// Immediate value (offset for loads/stores, addend for `ADDI`).
    Immediate(i64),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(name) => f.write_str(name),
            Self::Immediate(imm) => write!(f, "{imm}"),
        }
    }
}

/// A decoded instruction.
///
/// Field meaning depends on the opcode class:
///
/// | class      | `dest`        | `operand1`    | `operand2`    |
/// |------------|---------------|---------------|---------------|
/// | arithmetic | destination   | source 1      | source 2      |
/// | immediate  | destination   | source        | immediate     |
/// | load       | destination   | offset        | base register |
/// | store      | data register | offset        | base register |
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Instruction {
    /// Identity used by stations and the ledger.
    pub id: InstructionId,
    /// Operation.
    pub opcode: Opcode,
    /// Destination register, or the data register of a store.
    pub dest: String,
    /// First operand.
    pub operand1: Operand,
    /// Second operand.
    pub operand2: Operand,
}

impl Instruction {
    /// Builds a register-register arithmetic instruction.
    pub fn arithmetic(opcode: Opcode, rd: &str, rs: &str, rt: &str) -> Self {
        debug_assert_eq!(opcode.class(), OpClass::Arithmetic);
        Self {
            id: InstructionId::next(),
            opcode,
            dest: rd.to_string(),
            operand1: Operand::Register(rs.to_string()),
            operand2: Operand::Register(rt.to_string()),
        }
    }

    /// Builds `ADDI rd, rs, imm`.
    pub fn add_immediate(rd: &str, rs: &str, imm: i64) -> Self {
        Self {
            id: InstructionId::next(),
            opcode: Opcode::Addi,
            dest: rd.to_string(),
            operand1: Operand::Register(rs.to_string()),
            operand2: Operand::Immediate(imm),
        }
    }

    /// Builds `LW rd, offset(base)`.
    pub fn load(rd: &str, offset: i64, base: &str) -> Self {
        Self::memory(Opcode::Lw, rd, offset, base)
    }

    /// Builds `SW rt, offset(base)`.
    pub fn store(rt: &str, offset: i64, base: &str) -> Self {
        Self::memory(Opcode::Sw, rt, offset, base)
    }

    fn memory(opcode: Opcode, reg: &str, offset: i64, base: &str) -> Self {
        Self {
            id: InstructionId::next(),
            opcode,
            dest: reg.to_string(),
            operand1: Operand::Immediate(offset),
            operand2: Operand::Register(base.to_string()),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::isa::disasm::disassemble(self))
    }
}
