//! # 16-bit Load Instructions
//!
//! This module defines the SM83 16-bit load group:
//! - LD rr,nn: Immediate word into BC, DE, HL or SP
//! - LD (nn),SP: Store SP little-endian at an absolute address
//! - LD SP,HL / LD HL,SP+e
//! - PUSH rr / POP rr: Stack transfers of AF, BC, DE, HL

use super::Instruction;
use crate::addressing::AddressingMode as Mode;
use crate::registers::ExtendedRegister::{AF, BC, DE, HL, SP};

/// The 16-bit load group.
#[rustfmt::skip]
pub const INSTRUCTIONS: &[Instruction] = &[
    // LD rr,nn
    Instruction::new(0x01, "LD BC,nn", Mode::ImmediateWord, 12, |ctx| ctx.load_word_from_value(BC)),
    Instruction::new(0x11, "LD DE,nn", Mode::ImmediateWord, 12, |ctx| ctx.load_word_from_value(DE)),
    Instruction::new(0x21, "LD HL,nn", Mode::ImmediateWord, 12, |ctx| ctx.load_word_from_value(HL)),
    Instruction::new(0x31, "LD SP,nn", Mode::ImmediateWord, 12, |ctx| ctx.load_word_from_value(SP)),

    Instruction::new(0x08, "LD (nn),SP", Mode::Absolute, 20, |ctx| ctx.put_word_to_absolute(SP)),
    Instruction::new(0xF9, "LD SP,HL", Mode::Register, 8, |ctx| ctx.load_extended_from_extended(HL, SP)),
    Instruction::new(0xF8, "LD HL,SP+e", Mode::StackRelative, 12, |ctx| ctx.load_stack_offset(HL)),

    // Stack
    Instruction::new(0xC5, "PUSH BC", Mode::RegisterIndirect, 16, |ctx| ctx.push_word(BC)),
    Instruction::new(0xD5, "PUSH DE", Mode::RegisterIndirect, 16, |ctx| ctx.push_word(DE)),
    Instruction::new(0xE5, "PUSH HL", Mode::RegisterIndirect, 16, |ctx| ctx.push_word(HL)),
    Instruction::new(0xF5, "PUSH AF", Mode::RegisterIndirect, 16, |ctx| ctx.push_word(AF)),
    Instruction::new(0xC1, "POP BC", Mode::RegisterIndirect, 12, |ctx| ctx.pop_word(BC)),
    Instruction::new(0xD1, "POP DE", Mode::RegisterIndirect, 12, |ctx| ctx.pop_word(DE)),
    Instruction::new(0xE1, "POP HL", Mode::RegisterIndirect, 12, |ctx| ctx.pop_word(HL)),
    Instruction::new(0xF1, "POP AF", Mode::RegisterIndirect, 12, |ctx| ctx.pop_word(AF)),
];
