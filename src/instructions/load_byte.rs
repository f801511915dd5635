//! # 8-bit Load Instructions
//!
//! This module defines the SM83 8-bit load group:
//! - LD r,r': Register to register (0x40-0x7F, except 0x76 which is HALT)
//! - LD r,n: Immediate to register
//! - LD r,(HL) / LD (HL),r / LD (HL),n: Through the address in HL
//! - LD A,(BC) / LD A,(DE) / LD (BC),A / LD (DE),A
//! - LD A,(nn) / LD (nn),A: Absolute address following the opcode
//! - LD A,(C) / LD (C),A: High page plus C
//! - LDH A,(n) / LDH (n),A: High page plus immediate offset
//! - LD (HL+),A / LD (HL-),A / LD A,(HL+) / LD A,(HL-): Post-increment/decrement HL
//!
//! Cycle counts are clock cycles (four per machine cycle).

use super::Instruction;
use crate::addressing::AddressingMode as Mode;
use crate::context::HIGH_PAGE;
use crate::registers::ExtendedRegister::{BC, DE, HL};
use crate::registers::Register::{A, B, C, D, E, H, L};

/// The 8-bit load group.
#[rustfmt::skip]
pub const INSTRUCTIONS: &[Instruction] = &[
    // LD r,n
    Instruction::new(0x06, "LD B,n", Mode::Immediate, 8, |ctx| ctx.load_from_value(B)),
    Instruction::new(0x0E, "LD C,n", Mode::Immediate, 8, |ctx| ctx.load_from_value(C)),
    Instruction::new(0x16, "LD D,n", Mode::Immediate, 8, |ctx| ctx.load_from_value(D)),
    Instruction::new(0x1E, "LD E,n", Mode::Immediate, 8, |ctx| ctx.load_from_value(E)),
    Instruction::new(0x26, "LD H,n", Mode::Immediate, 8, |ctx| ctx.load_from_value(H)),
    Instruction::new(0x2E, "LD L,n", Mode::Immediate, 8, |ctx| ctx.load_from_value(L)),
    Instruction::new(0x36, "LD (HL),n", Mode::Immediate, 12, |ctx| ctx.put_value_to_address(HL)),
    Instruction::new(0x3E, "LD A,n", Mode::Immediate, 8, |ctx| ctx.load_from_value(A)),

    // Accumulator through BC/DE
    Instruction::new(0x02, "LD (BC),A", Mode::RegisterIndirect, 8, |ctx| ctx.put_to_address(A, BC)),
    Instruction::new(0x12, "LD (DE),A", Mode::RegisterIndirect, 8, |ctx| ctx.put_to_address(A, DE)),
    Instruction::new(0x0A, "LD A,(BC)", Mode::RegisterIndirect, 8, |ctx| ctx.load_from_address(A, BC)),
    Instruction::new(0x1A, "LD A,(DE)", Mode::RegisterIndirect, 8, |ctx| ctx.load_from_address(A, DE)),

    // Accumulator through HL with post-increment/decrement
    Instruction::new(0x22, "LD (HL+),A", Mode::RegisterIndirect, 8, |ctx| {
        ctx.put_to_address(A, HL)?;
        ctx.registers_mut().increment_extended(HL);
        Ok(())
    }),
    Instruction::new(0x2A, "LD A,(HL+)", Mode::RegisterIndirect, 8, |ctx| {
        ctx.load_from_address(A, HL)?;
        ctx.registers_mut().increment_extended(HL);
        Ok(())
    }),
    Instruction::new(0x32, "LD (HL-),A", Mode::RegisterIndirect, 8, |ctx| {
        ctx.put_to_address(A, HL)?;
        ctx.registers_mut().decrement_extended(HL);
        Ok(())
    }),
    Instruction::new(0x3A, "LD A,(HL-)", Mode::RegisterIndirect, 8, |ctx| {
        ctx.load_from_address(A, HL)?;
        ctx.registers_mut().decrement_extended(HL);
        Ok(())
    }),

    // LD r,r' / LD r,(HL) / LD (HL),r
    Instruction::new(0x40, "LD B,B", Mode::Register, 4, |ctx| ctx.load_from_register(B, B)),
    Instruction::new(0x41, "LD B,C", Mode::Register, 4, |ctx| ctx.load_from_register(C, B)),
    Instruction::new(0x42, "LD B,D", Mode::Register, 4, |ctx| ctx.load_from_register(D, B)),
    Instruction::new(0x43, "LD B,E", Mode::Register, 4, |ctx| ctx.load_from_register(E, B)),
    Instruction::new(0x44, "LD B,H", Mode::Register, 4, |ctx| ctx.load_from_register(H, B)),
    Instruction::new(0x45, "LD B,L", Mode::Register, 4, |ctx| ctx.load_from_register(L, B)),
    Instruction::new(0x46, "LD B,(HL)", Mode::RegisterIndirect, 8, |ctx| ctx.load_from_address(B, HL)),
    Instruction::new(0x47, "LD B,A", Mode::Register, 4, |ctx| ctx.load_from_register(A, B)),
    Instruction::new(0x48, "LD C,B", Mode::Register, 4, |ctx| ctx.load_from_register(B, C)),
    Instruction::new(0x49, "LD C,C", Mode::Register, 4, |ctx| ctx.load_from_register(C, C)),
    Instruction::new(0x4A, "LD C,D", Mode::Register, 4, |ctx| ctx.load_from_register(D, C)),
    Instruction::new(0x4B, "LD C,E", Mode::Register, 4, |ctx| ctx.load_from_register(E, C)),
    Instruction::new(0x4C, "LD C,H", Mode::Register, 4, |ctx| ctx.load_from_register(H, C)),
    Instruction::new(0x4D, "LD C,L", Mode::Register, 4, |ctx| ctx.load_from_register(L, C)),
    Instruction::new(0x4E, "LD C,(HL)", Mode::RegisterIndirect, 8, |ctx| ctx.load_from_address(C, HL)),
    Instruction::new(0x4F, "LD C,A", Mode::Register, 4, |ctx| ctx.load_from_register(A, C)),
    Instruction::new(0x50, "LD D,B", Mode::Register, 4, |ctx| ctx.load_from_register(B, D)),
    Instruction::new(0x51, "LD D,C", Mode::Register, 4, |ctx| ctx.load_from_register(C, D)),
    Instruction::new(0x52, "LD D,D", Mode::Register, 4, |ctx| ctx.load_from_register(D, D)),
    Instruction::new(0x53, "LD D,E", Mode::Register, 4, |ctx| ctx.load_from_register(E, D)),
    Instruction::new(0x54, "LD D,H", Mode::Register, 4, |ctx| ctx.load_from_register(H, D)),
    Instruction::new(0x55, "LD D,L", Mode::Register, 4, |ctx| ctx.load_from_register(L, D)),
    Instruction::new(0x56, "LD D,(HL)", Mode::RegisterIndirect, 8, |ctx| ctx.load_from_address(D, HL)),
    Instruction::new(0x57, "LD D,A", Mode::Register, 4, |ctx| ctx.load_from_register(A, D)),
    Instruction::new(0x58, "LD E,B", Mode::Register, 4, |ctx| ctx.load_from_register(B, E)),
    Instruction::new(0x59, "LD E,C", Mode::Register, 4, |ctx| ctx.load_from_register(C, E)),
    Instruction::new(0x5A, "LD E,D", Mode::Register, 4, |ctx| ctx.load_from_register(D, E)),
    Instruction::new(0x5B, "LD E,E", Mode::Register, 4, |ctx| ctx.load_from_register(E, E)),
    Instruction::new(0x5C, "LD E,H", Mode::Register, 4, |ctx| ctx.load_from_register(H, E)),
    Instruction::new(0x5D, "LD E,L", Mode::Register, 4, |ctx| ctx.load_from_register(L, E)),
    Instruction::new(0x5E, "LD E,(HL)", Mode::RegisterIndirect, 8, |ctx| ctx.load_from_address(E, HL)),
    Instruction::new(0x5F, "LD E,A", Mode::Register, 4, |ctx| ctx.load_from_register(A, E)),
    Instruction::new(0x60, "LD H,B", Mode::Register, 4, |ctx| ctx.load_from_register(B, H)),
    Instruction::new(0x61, "LD H,C", Mode::Register, 4, |ctx| ctx.load_from_register(C, H)),
    Instruction::new(0x62, "LD H,D", Mode::Register, 4, |ctx| ctx.load_from_register(D, H)),
    Instruction::new(0x63, "LD H,E", Mode::Register, 4, |ctx| ctx.load_from_register(E, H)),
    Instruction::new(0x64, "LD H,H", Mode::Register, 4, |ctx| ctx.load_from_register(H, H)),
    Instruction::new(0x65, "LD H,L", Mode::Register, 4, |ctx| ctx.load_from_register(L, H)),
    Instruction::new(0x66, "LD H,(HL)", Mode::RegisterIndirect, 8, |ctx| ctx.load_from_address(H, HL)),
    Instruction::new(0x67, "LD H,A", Mode::Register, 4, |ctx| ctx.load_from_register(A, H)),
    Instruction::new(0x68, "LD L,B", Mode::Register, 4, |ctx| ctx.load_from_register(B, L)),
    Instruction::new(0x69, "LD L,C", Mode::Register, 4, |ctx| ctx.load_from_register(C, L)),
    Instruction::new(0x6A, "LD L,D", Mode::Register, 4, |ctx| ctx.load_from_register(D, L)),
    Instruction::new(0x6B, "LD L,E", Mode::Register, 4, |ctx| ctx.load_from_register(E, L)),
    Instruction::new(0x6C, "LD L,H", Mode::Register, 4, |ctx| ctx.load_from_register(H, L)),
    Instruction::new(0x6D, "LD L,L", Mode::Register, 4, |ctx| ctx.load_from_register(L, L)),
    Instruction::new(0x6E, "LD L,(HL)", Mode::RegisterIndirect, 8, |ctx| ctx.load_from_address(L, HL)),
    Instruction::new(0x6F, "LD L,A", Mode::Register, 4, |ctx| ctx.load_from_register(A, L)),
    Instruction::new(0x70, "LD (HL),B", Mode::RegisterIndirect, 8, |ctx| ctx.put_to_address(B, HL)),
    Instruction::new(0x71, "LD (HL),C", Mode::RegisterIndirect, 8, |ctx| ctx.put_to_address(C, HL)),
    Instruction::new(0x72, "LD (HL),D", Mode::RegisterIndirect, 8, |ctx| ctx.put_to_address(D, HL)),
    Instruction::new(0x73, "LD (HL),E", Mode::RegisterIndirect, 8, |ctx| ctx.put_to_address(E, HL)),
    Instruction::new(0x74, "LD (HL),H", Mode::RegisterIndirect, 8, |ctx| ctx.put_to_address(H, HL)),
    Instruction::new(0x75, "LD (HL),L", Mode::RegisterIndirect, 8, |ctx| ctx.put_to_address(L, HL)),
    Instruction::new(0x77, "LD (HL),A", Mode::RegisterIndirect, 8, |ctx| ctx.put_to_address(A, HL)),
    Instruction::new(0x78, "LD A,B", Mode::Register, 4, |ctx| ctx.load_from_register(B, A)),
    Instruction::new(0x79, "LD A,C", Mode::Register, 4, |ctx| ctx.load_from_register(C, A)),
    Instruction::new(0x7A, "LD A,D", Mode::Register, 4, |ctx| ctx.load_from_register(D, A)),
    Instruction::new(0x7B, "LD A,E", Mode::Register, 4, |ctx| ctx.load_from_register(E, A)),
    Instruction::new(0x7C, "LD A,H", Mode::Register, 4, |ctx| ctx.load_from_register(H, A)),
    Instruction::new(0x7D, "LD A,L", Mode::Register, 4, |ctx| ctx.load_from_register(L, A)),
    Instruction::new(0x7E, "LD A,(HL)", Mode::RegisterIndirect, 8, |ctx| ctx.load_from_address(A, HL)),
    Instruction::new(0x7F, "LD A,A", Mode::Register, 4, |ctx| ctx.load_from_register(A, A)),

    // High page
    Instruction::new(0xE0, "LDH (n),A", Mode::ImmediatePort, 12, |ctx| ctx.put_to_immediate_port(A, HIGH_PAGE)),
    Instruction::new(0xF0, "LDH A,(n)", Mode::ImmediatePort, 12, |ctx| ctx.load_from_immediate_port(A, HIGH_PAGE)),
    Instruction::new(0xE2, "LD (C),A", Mode::Port, 8, |ctx| ctx.put_to_port(A, C, HIGH_PAGE)),
    Instruction::new(0xF2, "LD A,(C)", Mode::Port, 8, |ctx| ctx.load_from_port(A, C, HIGH_PAGE)),

    // Absolute
    Instruction::new(0xEA, "LD (nn),A", Mode::Absolute, 16, |ctx| ctx.put_to_absolute(A)),
    Instruction::new(0xFA, "LD A,(nn)", Mode::Absolute, 16, |ctx| ctx.load_from_absolute(A)),
];
