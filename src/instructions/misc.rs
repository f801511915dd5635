//! # Miscellaneous Instructions
//!
//! - NOP: No operation

use super::Instruction;
use crate::addressing::AddressingMode as Mode;

/// Instructions that fit no other group.
pub const INSTRUCTIONS: &[Instruction] = &[Instruction::new(
    0x00,
    "NOP",
    Mode::Implied,
    4,
    |_| Ok(()),
)];
