//! Assembly text decoder.
//!
//! Turns program text into the ordered instruction feed. Accepted forms:
//!
//! ```text
//! ADD  R3, R1, R2        ; also SUB, MUL, DIV
//! ADDI R3, R1, -4
//! LW   R4, 100(R0)
//! SW   R3, 100(R14)
//! ```
//!
//! Lines are split on whitespace, commas and parentheses. The mnemonic is
//! case-insensitive; register names are kept verbatim. Anything that does not
//! decode (unknown mnemonic, wrong operand count, non-decimal immediate) is
//! dropped without error. Text after `;` or `#` is a comment.

use crate::isa::instruction::{Instruction, InstructionId, Operand};
use crate::isa::opcode::{OpClass, Opcode};

/// Tokens in a well-formed line: mnemonic plus three operands.
const TOKENS_PER_LINE: usize = 4;

fn tokenize(line: &str) -> Vec<&str> {
    let code = line.split([';', '#']).next().unwrap_or_default();
    code.split(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')'))
        .filter(|t| !t.is_empty())
        .collect()
}

fn immediate(token: &str) -> Option<i64> {
    token.parse().ok()
}

/// Decodes a single line, or returns `None` if it is not a valid instruction.
pub fn parse_instruction(line: &str) -> Option<Instruction> {
    let tokens = tokenize(line);
    if tokens.len() != TOKENS_PER_LINE {
        return None;
    }
    let opcode: Opcode = tokens[0].parse().ok()?;
    let dest = tokens[1].to_string();

    let (operand1, operand2) = match opcode.class() {
        OpClass::Arithmetic => (
            Operand::Register(tokens[2].to_string()),
            Operand::Register(tokens[3].to_string()),
        ),
        OpClass::Immediate => (
            Operand::Register(tokens[2].to_string()),
            Operand::Immediate(immediate(tokens[3])?),
        ),
        OpClass::Load | OpClass::Store => (
            Operand::Immediate(immediate(tokens[2])?),
            Operand::Register(tokens[3].to_string()),
        ),
    };

    Some(Instruction {
        id: InstructionId::next(),
        opcode,
        dest,
        operand1,
        operand2,
    })
}

/// Decodes every line of `source`, keeping program order and skipping lines
/// that do not decode.
pub fn parse_program(source: &str) -> Vec<Instruction> {
    let program: Vec<Instruction> = source.lines().filter_map(parse_instruction).collect();
    tracing::debug!(
        lines = source.lines().count(),
        instructions = program.len(),
        "decoded program"
    );
    program
}
