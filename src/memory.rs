//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from specific
//! memory implementations, and the `MemoryError` taxonomy every memory access
//! reports through.
//!
//! ## Design Principles
//!
//! Unlike real hardware, this core never lets a faulty access slip through:
//! - Reads outside a bank's span fail with `OutOfRange`
//! - Writes to read-only banks fail with `PermissionDenied`
//! - Addresses no bank claims fail with `UnmappedAddress`
//! - Multi-byte writes are all-or-nothing
//!
//! Two implementations are provided: `FlatMemory` (64KB of plain RAM, handy for
//! tests) and `AddressSpace` (banked, see the `devices` module).

use thiserror::Error;

/// Errors raised by memory banks and the address space.
///
/// `Overlap` and `InvalidBank` are configuration-time failures: they are
/// returned while a memory map is being assembled, never during execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Address falls outside the span `[start, end)` owned by a bank.
    ///
    /// `address` is a `usize` because the far endpoint of a range access may
    /// lie beyond the 16-bit space.
    #[error("address 0x{address:04X} is outside bank 0x{start:04X}-0x{end:04X}")]
    OutOfRange {
        /// First offending address
        address: usize,
        /// First address owned by the bank
        start: u16,
        /// One past the last address owned by the bank
        end: usize,
    },

    /// Write attempted on a read-only bank (bounds already satisfied).
    #[error("write to read-only address 0x{address:04X}")]
    PermissionDenied {
        /// Target of the rejected write
        address: u16,
    },

    /// No registered bank owns the address.
    #[error("no bank is mapped at 0x{address:04X}")]
    UnmappedAddress {
        /// Address no bank claims
        address: u16,
    },

    /// A bank was registered over an address range already in use.
    #[error(
        "bank 0x{new_start:04X}-0x{new_end:04X} overlaps existing bank 0x{existing_start:04X}-0x{existing_end:04X}"
    )]
    Overlap {
        /// Base address of the new bank
        new_start: u16,
        /// One past the last address of the new bank
        new_end: usize,
        /// Base address of the bank already registered
        existing_start: u16,
        /// One past the last address of the bank already registered
        existing_end: usize,
    },

    /// A bank is empty or would extend past the top of the 16-bit space.
    #[error("bank at 0x{offset:04X} with size {size} does not fit the address space")]
    InvalidBank {
        /// Requested base address
        offset: u16,
        /// Requested size in bytes
        size: usize,
    },
}

/// Size of the full SM83 address space in bytes.
pub const ADDRESS_SPACE_SIZE: usize = 0x10000;

/// Memory bus trait for the CPU to read/write bytes.
///
/// Every access is fallible. Implementations must never clamp an address or
/// perform a partial write: an access either completes entirely or returns an
/// error and leaves memory untouched.
///
/// # Examples
///
/// ```
/// use libsm83::{FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42).unwrap();
/// assert_eq!(mem.read(0x1234).unwrap(), 0x42);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    fn read(&self, address: u16) -> Result<u8, MemoryError>;

    /// Writes a byte to the specified 16-bit address.
    fn write(&mut self, address: u16, value: u8) -> Result<(), MemoryError>;

    /// Reads `length` consecutive bytes starting at `address`.
    ///
    /// The result is an owned copy; mutating it never touches the bus.
    fn read_range(&self, address: u16, length: usize) -> Result<Vec<u8>, MemoryError>;

    /// Writes `values` starting at `address`, all or nothing.
    fn write_range(&mut self, address: u16, values: &[u8]) -> Result<(), MemoryError>;

    /// Reads a little-endian 16-bit word (low byte at `address`).
    ///
    /// The high byte is read from `address + 1`, wrapping at 0xFFFF.
    fn read_word(&self, address: u16) -> Result<u16, MemoryError> {
        let low = self.read(address)?;
        let high = self.read(address.wrapping_add(1))?;
        Ok(u16::from_le_bytes([low, high]))
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses are mapped to a single contiguous, writable array
/// initialised to zero. Useful for instruction tests that don't care about
/// the banked memory map.
///
/// # Examples
///
/// ```
/// use libsm83::{FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write_range(0x0100, &[0x00, 0x47]).unwrap();
/// assert_eq!(memory.read(0x0101).unwrap(), 0x47);
/// ```
pub struct FlatMemory {
    data: Box<[u8; ADDRESS_SPACE_SIZE]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; ADDRESS_SPACE_SIZE]),
        }
    }

    fn check_span(address: u16, length: usize) -> Result<(), MemoryError> {
        let end = (address as usize).saturating_add(length);
        if end > ADDRESS_SPACE_SIZE {
            return Err(MemoryError::OutOfRange {
                address: end - 1,
                start: 0,
                end: ADDRESS_SPACE_SIZE,
            });
        }
        Ok(())
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, address: u16) -> Result<u8, MemoryError> {
        Ok(self.data[address as usize])
    }

    fn write(&mut self, address: u16, value: u8) -> Result<(), MemoryError> {
        self.data[address as usize] = value;
        Ok(())
    }

    fn read_range(&self, address: u16, length: usize) -> Result<Vec<u8>, MemoryError> {
        Self::check_span(address, length)?;
        let start = address as usize;
        Ok(self.data[start..start + length].to_vec())
    }

    fn write_range(&mut self, address: u16, values: &[u8]) -> Result<(), MemoryError> {
        Self::check_span(address, values.len())?;
        let start = address as usize;
        self.data[start..start + values.len()].copy_from_slice(values);
        Ok(())
    }
}
