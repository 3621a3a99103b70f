//! Opcode set and operation families.
//!
//! The modeled machine knows a closed set of seven operations. Each belongs
//! to exactly one [`OpClass`], and the class is what issue, execute and
//! write-result dispatch on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operation performed by an instruction.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Opcode {
    /// Load word: `LW rd, offset(base)`.
    Lw,
    /// Store word: `SW rt, offset(base)`.
    Sw,
    /// Register add: `ADD rd, rs, rt`.
    Add,
    /// Register subtract: `SUB rd, rs, rt`.
    Sub,
    /// Register multiply: `MUL rd, rs, rt`.
    Mul,
    /// Register divide: `DIV rd, rs, rt`.
    Div,
    /// Add immediate: `ADDI rd, rs, imm`.
    Addi,
}

/// Operand shape of an opcode; drives operand resolution at issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpClass {
    /// Two source registers, one destination register.
    Arithmetic,
    /// One source register plus an immediate, one destination register.
    Immediate,
    /// Base register plus offset; destination register receives memory.
    Load,
    /// Base register plus offset; data register is written to memory.
    Store,
}

impl Opcode {
    /// Every opcode, in canonical order.
    pub const ALL: [Self; 7] = [
        Self::Lw,
        Self::Sw,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Addi,
    ];

    /// Operand family of this opcode.
    pub const fn class(self) -> OpClass {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div => OpClass::Arithmetic,
            Self::Addi => OpClass::Immediate,
            Self::Lw => OpClass::Load,
            Self::Sw => OpClass::Store,
        }
    }

    /// Upper-case assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Lw => "LW",
            Self::Sw => "SW",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Addi => "ADDI",
        }
    }

    /// Whether this opcode computes an effective address at execution start.
    pub const fn is_memory(self) -> bool {
        matches!(self.class(), OpClass::Load | OpClass::Store)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Error returned when a mnemonic is not part of the opcode set.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown opcode `{0}`")]
pub struct UnknownOpcode(pub String);

impl FromStr for Opcode {
    type Err = UnknownOpcode;

    /// Parses a mnemonic, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic() == upper)
            .ok_or(UnknownOpcode(upper))
    }
}
