//! # SM83 Instruction Set
//!
//! This module contains the instruction record, the dispatch table built from
//! it, and the instruction groups shipped with the core. Each group is a
//! static slice of `Instruction` values whose operations are plain function
//! pointers over `ExecutionContext`.
//!
//! ## Groups
//!
//! - **load_byte**: 8-bit loads (LD r,r' / LD r,n / LD r,(rr) / LD A,(nn) / LDH / LD (HL+/-))
//! - **load_word**: 16-bit loads and stack transfers (LD rr,nn / LD (nn),SP / PUSH / POP)
//! - **misc**: NOP

use crate::addressing::AddressingMode;
use crate::context::ExecutionContext;
use crate::memory::MemoryError;
use crate::ExecutionError;
use log::debug;
use std::fmt;

pub mod load_byte;
pub mod load_word;
pub mod misc;

/// Operation performed by an instruction.
pub type Operation = fn(&mut dyn ExecutionContext) -> Result<(), MemoryError>;

/// A decoded SM83 instruction.
///
/// Instructions are immutable records built once as part of a static table.
///
/// # Fields
///
/// - `opcode`: Byte that selects this instruction
/// - `mnemonic`: Assembly form (e.g., "LD B,A")
/// - `addressing_mode`: Fixes the number of operand bytes after the opcode
/// - `cycles`: Clock cycles charged when the instruction executes
#[derive(Clone, Copy)]
pub struct Instruction {
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub addressing_mode: AddressingMode,
    pub cycles: u8,
    pub(crate) operation: Operation,
}

impl Instruction {
    /// Build an instruction record.
    pub const fn new(
        opcode: u8,
        mnemonic: &'static str,
        addressing_mode: AddressingMode,
        cycles: u8,
        operation: Operation,
    ) -> Self {
        Self {
            opcode,
            mnemonic,
            addressing_mode,
            cycles,
            operation,
        }
    }

    /// Perform the instruction's operation against `context`.
    pub fn execute(&self, context: &mut dyn ExecutionContext) -> Result<(), MemoryError> {
        (self.operation)(context)
    }

    /// Clock cycles charged for this instruction.
    pub fn cycles(&self) -> u8 {
        self.cycles
    }

    /// Total instruction length in bytes, opcode included.
    pub fn size(&self) -> u8 {
        1 + self.addressing_mode.operand_bytes()
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("opcode", &format_args!("0x{:02X}", self.opcode))
            .field("mnemonic", &self.mnemonic)
            .field("addressing_mode", &self.addressing_mode)
            .field("cycles", &self.cycles)
            .finish()
    }
}

/// Opcode-indexed dispatch table.
///
/// Built once from instruction groups and never mutated afterwards. Building
/// fails if two instructions claim the same opcode.
///
/// # Examples
///
/// ```
/// use libsm83::InstructionSet;
///
/// let set = InstructionSet::standard().unwrap();
/// let ld_b_a = set.get(0x47).unwrap();
/// assert_eq!(ld_b_a.mnemonic, "LD B,A");
/// assert_eq!(ld_b_a.cycles(), 4);
/// ```
#[derive(Clone)]
pub struct InstructionSet {
    table: [Option<Instruction>; 256],
}

impl InstructionSet {
    /// Build a dispatch table from instruction groups.
    ///
    /// # Returns
    ///
    /// * `Ok(InstructionSet)` - Every opcode was claimed at most once
    /// * `Err(ExecutionError::DuplicateOpcode)` - Two instructions share an opcode
    pub fn build(groups: &[&[Instruction]]) -> Result<Self, ExecutionError> {
        let mut table: [Option<Instruction>; 256] = [None; 256];

        for instruction in groups.iter().flat_map(|group| group.iter()) {
            let slot = &mut table[instruction.opcode as usize];
            if let Some(existing) = slot {
                return Err(ExecutionError::DuplicateOpcode {
                    opcode: instruction.opcode,
                    existing: existing.mnemonic,
                    duplicate: instruction.mnemonic,
                });
            }
            *slot = Some(*instruction);
        }

        let set = Self { table };
        debug!("built instruction set with {} opcodes", set.len());
        Ok(set)
    }

    /// The instruction set shipped with this crate.
    pub fn standard() -> Result<Self, ExecutionError> {
        Self::build(&[
            misc::INSTRUCTIONS,
            load_byte::INSTRUCTIONS,
            load_word::INSTRUCTIONS,
        ])
    }

    /// Look up the instruction for `opcode`.
    pub fn get(&self, opcode: u8) -> Option<&Instruction> {
        self.table[opcode as usize].as_ref()
    }

    /// Iterate over all defined instructions in opcode order.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.table.iter().flatten()
    }

    /// Number of defined opcodes.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if no opcode is defined.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for InstructionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
