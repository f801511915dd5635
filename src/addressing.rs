//! # Addressing Modes
//!
//! This module defines how SM83 instructions locate their operands. The mode
//! fixes how many operand bytes follow the opcode, which is what lets the
//! fetch loop know the length of every instruction without decoding it.

/// SM83 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied, Register, RegisterIndirect, Port
/// - **1 byte**: Immediate, ImmediatePort, StackRelative
/// - **2 bytes**: ImmediateWord, Absolute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Example: NOP
    Implied,

    /// Operands are registers only.
    ///
    /// Example: LD B,A (copy A into B)
    Register,

    /// Memory at the address held in a register pair.
    ///
    /// Example: LD A,(HL) (load from the address in HL)
    RegisterIndirect,

    /// 8-bit constant following the opcode.
    ///
    /// Example: LD B,$10
    Immediate,

    /// 16-bit little-endian constant following the opcode.
    ///
    /// Example: LD HL,$C000
    ImmediateWord,

    /// 16-bit little-endian address following the opcode.
    ///
    /// Example: LD A,($C000)
    Absolute,

    /// High page (0xFF00) plus the value of register C.
    ///
    /// Example: LD A,($FF00+C)
    Port,

    /// High page (0xFF00) plus an 8-bit offset following the opcode.
    ///
    /// Example: LDH A,($44) (load from 0xFF44)
    ImmediatePort,

    /// Stack pointer plus a signed 8-bit displacement following the opcode.
    ///
    /// Example: LD HL,SP+$F0
    StackRelative,
}

impl AddressingMode {
    /// Number of operand bytes that follow the opcode.
    pub fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied
            | AddressingMode::Register
            | AddressingMode::RegisterIndirect
            | AddressingMode::Port => 0,
            AddressingMode::Immediate
            | AddressingMode::ImmediatePort
            | AddressingMode::StackRelative => 1,
            AddressingMode::ImmediateWord | AddressingMode::Absolute => 2,
        }
    }
}
