//! Instruction set definitions.
//!
//! The machine understands a closed set of operations: register arithmetic
//! (`ADD`, `SUB`, `MUL`, `DIV`), immediate arithmetic (`ADDI`) and word memory
//! access (`LW`, `SW`).

/// Assembly text decoder producing the instruction feed.
pub mod decode;

/// Instruction-to-text rendering for tracing and diagnostics.
pub mod disasm;

/// Decoded instruction records and operand types.
pub mod instruction;

/// Opcode set and operation families.
pub mod opcode;

pub use instruction::{Instruction, InstructionId, Operand};
pub use opcode::{OpClass, Opcode};
