//! Instruction disassembler.
//!
//! Renders a decoded [`Instruction`] back into canonical assembly text for
//! tracing, ledger output and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use tomasulo_core::isa::disasm::disassemble;
//! use tomasulo_core::isa::instruction::Instruction;
//!
//! let text = disassemble(&Instruction::load("R4", 100, "R0"));
//! assert_eq!(text, "LW R4, 100(R0)");
//! ```

use crate::isa::instruction::Instruction;
use crate::isa::opcode::OpClass;

/// Formats `inst` as `OP dest, src1, src2` or `OP reg, offset(base)`.
pub fn disassemble(inst: &Instruction) -> String {
    let op = inst.opcode.mnemonic();
    match inst.opcode.class() {
        OpClass::Arithmetic | OpClass::Immediate => {
            format!("{op} {}, {}, {}", inst.dest, inst.operand1, inst.operand2)
        }
        OpClass::Load | OpClass::Store => {
            format!("{op} {}, {}({})", inst.dest, inst.operand1, inst.operand2)
        }
    }
}
