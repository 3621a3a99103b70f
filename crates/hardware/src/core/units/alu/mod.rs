//! Arithmetic unit.
//!
//! Computes the result of register and immediate arithmetic at write-result
//! time. Operands are `f64`, so `DIV` produces fractional quotients; a zero
//! divisor yields positive infinity instead of a fault.

use crate::common::Value;
use crate::common::constants::DIV_BY_ZERO_RESULT;
use crate::isa::opcode::Opcode;

/// Arithmetic unit for `ADD`, `ADDI`, `SUB`, `MUL` and `DIV`.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Applies `op` to `a` (`vj`) and `b` (`vk`).
    ///
    /// Returns `None` for memory opcodes, which the ALU does not evaluate.
    ///
    /// # Examples
    ///
    /// ```
    /// use tomasulo_core::core::units::alu::Alu;
    /// use tomasulo_core::isa::Opcode;
    ///
    /// assert_eq!(Alu::execute(Opcode::Sub, 7.0, 2.0), Some(5.0));
    /// assert_eq!(Alu::execute(Opcode::Div, 7.0, 2.0), Some(3.5));
    /// assert_eq!(Alu::execute(Opcode::Div, 1.0, 0.0), Some(f64::INFINITY));
    /// assert_eq!(Alu::execute(Opcode::Lw, 1.0, 1.0), None);
    /// ```
    pub fn execute(op: Opcode, a: Value, b: Value) -> Option<Value> {
        let result = match op {
            Opcode::Add | Opcode::Addi => a + b,
            Opcode::Sub => a - b,
            Opcode::Mul => a * b,
            Opcode::Div if b == 0.0 => DIV_BY_ZERO_RESULT,
            Opcode::Div => a / b,
            Opcode::Lw | Opcode::Sw => return None,
        };
        Some(result)
    }
}
