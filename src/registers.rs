//! # Register File
//!
//! The SM83 has eight 8-bit registers (A, F, B, C, D, E, H, L) and two
//! dedicated 16-bit registers (SP, PC). The pairs AF, BC, DE and HL are not
//! stored separately: they are composed from their two halves on every read
//! and decomposed on every write, so the two views can never disagree.

use std::fmt;

/// Named 8-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Register {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
    /// Flags; only the upper nibble exists in hardware.
    F,
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Register::A => "A",
            Register::B => "B",
            Register::C => "C",
            Register::D => "D",
            Register::E => "E",
            Register::H => "H",
            Register::L => "L",
            Register::F => "F",
        };
        f.write_str(name)
    }
}

/// Named 16-bit register: a composed pair or a dedicated 16-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtendedRegister {
    AF,
    BC,
    DE,
    HL,
    SP,
    PC,
}

impl ExtendedRegister {
    /// The `(high, low)` halves of a composed pair, or `None` for SP and PC.
    pub fn halves(self) -> Option<(Register, Register)> {
        match self {
            ExtendedRegister::AF => Some((Register::A, Register::F)),
            ExtendedRegister::BC => Some((Register::B, Register::C)),
            ExtendedRegister::DE => Some((Register::D, Register::E)),
            ExtendedRegister::HL => Some((Register::H, Register::L)),
            ExtendedRegister::SP | ExtendedRegister::PC => None,
        }
    }
}

impl fmt::Display for ExtendedRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtendedRegister::AF => "AF",
            ExtendedRegister::BC => "BC",
            ExtendedRegister::DE => "DE",
            ExtendedRegister::HL => "HL",
            ExtendedRegister::SP => "SP",
            ExtendedRegister::PC => "PC",
        };
        f.write_str(name)
    }
}

/// Condition flags held in the upper nibble of F.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// Zero
    Z = 7,
    /// Subtract
    N = 6,
    /// Half carry
    H = 5,
    /// Carry
    C = 4,
}

impl Flag {
    fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Bits of F that exist in hardware; the low nibble always reads as zero.
const FLAG_MASK: u8 = 0xF0;

/// The SM83 register file.
///
/// # Examples
///
/// ```
/// use libsm83::{ExtendedRegister, Register, Registers};
///
/// let mut regs = Registers::default();
/// regs.set_extended(ExtendedRegister::HL, 0xC0DE);
///
/// assert_eq!(regs.get(Register::H), 0xC0);
/// assert_eq!(regs.get(Register::L), 0xDE);
/// assert_eq!(regs.get_extended(ExtendedRegister::HL), 0xC0DE);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    a: u8,
    f: u8,
    b: u8,
    c: u8,
    d: u8,
    e: u8,
    h: u8,
    l: u8,
    sp: u16,
    pc: u16,
}

impl Registers {
    /// Register state a DMG is left in when its boot ROM hands over to the
    /// cartridge at 0x0100.
    pub fn post_boot() -> Self {
        let mut regs = Self::default();
        regs.set_extended(ExtendedRegister::AF, 0x01B0);
        regs.set_extended(ExtendedRegister::BC, 0x0013);
        regs.set_extended(ExtendedRegister::DE, 0x00D8);
        regs.set_extended(ExtendedRegister::HL, 0x014D);
        regs.set_extended(ExtendedRegister::SP, 0xFFFE);
        regs.set_extended(ExtendedRegister::PC, 0x0100);
        regs
    }

    /// Returns the value of an 8-bit register.
    pub fn get(&self, register: Register) -> u8 {
        match register {
            Register::A => self.a,
            Register::B => self.b,
            Register::C => self.c,
            Register::D => self.d,
            Register::E => self.e,
            Register::H => self.h,
            Register::L => self.l,
            Register::F => self.f,
        }
    }

    /// Sets an 8-bit register. Writes to F drop the low nibble.
    pub fn set(&mut self, register: Register, value: u8) {
        match register {
            Register::A => self.a = value,
            Register::B => self.b = value,
            Register::C => self.c = value,
            Register::D => self.d = value,
            Register::E => self.e = value,
            Register::H => self.h = value,
            Register::L => self.l = value,
            Register::F => self.f = value & FLAG_MASK,
        }
    }

    /// Returns the value of a 16-bit register, composing pairs high:low.
    pub fn get_extended(&self, register: ExtendedRegister) -> u16 {
        match register.halves() {
            Some((high, low)) => u16::from_be_bytes([self.get(high), self.get(low)]),
            None if register == ExtendedRegister::SP => self.sp,
            None => self.pc,
        }
    }

    /// Sets a 16-bit register, splitting pairs into their two halves.
    pub fn set_extended(&mut self, register: ExtendedRegister, value: u16) {
        match register.halves() {
            Some((high, low)) => {
                let [hi, lo] = value.to_be_bytes();
                self.set(high, hi);
                self.set(low, lo);
            }
            None if register == ExtendedRegister::SP => self.sp = value,
            None => self.pc = value,
        }
    }

    /// Adds one to a 16-bit register, wrapping at 0xFFFF.
    pub fn increment_extended(&mut self, register: ExtendedRegister) {
        let value = self.get_extended(register).wrapping_add(1);
        self.set_extended(register, value);
    }

    /// Subtracts one from a 16-bit register, wrapping at 0x0000.
    pub fn decrement_extended(&mut self, register: ExtendedRegister) {
        let value = self.get_extended(register).wrapping_sub(1);
        self.set_extended(register, value);
    }

    /// Returns true if the flag is set.
    pub fn flag(&self, flag: Flag) -> bool {
        self.f & flag.mask() != 0
    }

    /// Sets or clears a flag.
    pub fn set_flag(&mut self, flag: Flag, set: bool) {
        if set {
            self.f |= flag.mask();
        } else {
            self.f &= !flag.mask();
        }
    }

    /// Program counter.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Stack pointer.
    pub fn sp(&self) -> u16 {
        self.sp
    }
}
