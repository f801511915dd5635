//! # SM83 CPU Emulator Core
//!
//! A cycle-counted instruction-execution core for the Sharp SM83, the
//! Z80-derived CPU of the Nintendo Game Boy, together with the banked memory
//! model it runs against.
//!
//! ## Quick Start
//!
//! ```rust
//! use libsm83::{Cpu, FlatMemory, MemoryBus, Register};
//!
//! let mut memory = FlatMemory::new();
//! // LD A,$7A ; LD B,A at the cartridge entry point
//! memory.write_range(0x0100, &[0x3E, 0x7A, 0x47]).unwrap();
//!
//! let mut cpu = Cpu::with_standard_set(memory).unwrap();
//! cpu.step().unwrap();
//! cpu.step().unwrap();
//!
//! assert_eq!(cpu.registers().get(Register::B), 0x7A);
//! assert_eq!(cpu.cycles(), 12);
//! ```
//!
//! ## Architecture
//!
//! - **Strict memory**: Every access is bounds- and permission-checked; faults
//!   propagate to the caller instead of being papered over
//! - **Composed register pairs**: BC, DE, HL and AF are views over their halves
//! - **Table-driven dispatch**: Opcode, mnemonic, addressing mode, cycle cost
//!   and operation live together in static instruction groups
//! - **Atomic steps**: A failed step leaves registers and memory as they were
//!
//! ## Modules
//!
//! - `memory` - MemoryBus trait, FlatMemory and the memory error taxonomy
//! - `devices` - Bank trait, MemoryBank, IoBank and the AddressSpace router
//! - `layout` - Declarative memory maps (including the DMG map)
//! - `registers` - Register file with 8-bit registers and 16-bit pairs
//! - `context` - Execution context and addressing-mode primitives
//! - `instructions` - Instruction records, dispatch table and instruction groups
//! - `cpu` - Fetch-decode-execute loop and cycle counter
//! - `addressing` - Addressing mode enumeration

pub mod addressing;
pub mod context;
pub mod cpu;
pub mod devices;
pub mod instructions;
pub mod layout;
pub mod memory;
pub mod registers;

// Re-export public API
pub use addressing::AddressingMode;
pub use context::{Context, ExecutionContext, HIGH_PAGE};
pub use cpu::Cpu;
pub use devices::{AddressSpace, Bank, IoBank, MemoryBank, Permission};
pub use instructions::{Instruction, InstructionSet, Operation};
pub use layout::{BankLayout, MemoryLayout};
pub use memory::{FlatMemory, MemoryBus, MemoryError, ADDRESS_SPACE_SIZE};
pub use registers::{ExtendedRegister, Flag, Register, Registers};

use thiserror::Error;

/// Errors that can occur while building an instruction set or executing it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// No instruction is defined for the fetched opcode.
    #[error("opcode 0x{0:02X} is not implemented")]
    UnimplementedOpcode(u8),

    /// A memory access made by the instruction failed.
    #[error(transparent)]
    Memory(#[from] MemoryError),

    /// Two instructions were registered under the same opcode.
    #[error("opcode 0x{opcode:02X} is claimed by both `{existing}` and `{duplicate}`")]
    DuplicateOpcode {
        opcode: u8,
        existing: &'static str,
        duplicate: &'static str,
    },
}
