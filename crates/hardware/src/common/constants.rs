//! Architectural constants.

/// Number of architectural registers (`R0` through `R31`).
pub const REGISTER_COUNT: usize = 32;

/// Prefix of every architectural register name.
pub const REGISTER_PREFIX: char = 'R';

/// Result broadcast for a division whose divisor is zero.
pub const DIV_BY_ZERO_RESULT: f64 = f64::INFINITY;
