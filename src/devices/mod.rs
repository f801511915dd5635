//! Banked memory support for the SM83 core.
//!
//! This module provides the memory model the CPU executes against: a set of
//! independently owned banks (RAM, ROM, I/O ports) composed into one 16-bit
//! address space.
//!
//! # Architecture
//!
//! - **Bank trait**: Bounded, permission-checked storage for one address span
//! - **AddressSpace**: Routes accesses to the bank that owns the address
//! - **Bank implementations**: `MemoryBank` (RAM/ROM) and `IoBank` (port windows)
//!
//! # Example
//!
//! ```rust
//! use libsm83::{AddressSpace, MemoryBank, MemoryBus};
//!
//! let mut memory = AddressSpace::new();
//!
//! // 32KB cartridge ROM at 0x0000-0x7FFF
//! let rom = vec![0x00; 0x8000];
//! memory.register_bank(Box::new(MemoryBank::read_only(0x0000, rom).unwrap())).unwrap();
//!
//! // 8KB work RAM at 0xC000-0xDFFF
//! memory.register_bank(Box::new(MemoryBank::new(0xC000, 0x2000).unwrap())).unwrap();
//!
//! memory.write(0xC000, 0x42).unwrap();
//! assert_eq!(memory.read(0xC000).unwrap(), 0x42);
//! assert!(memory.write(0x0000, 0x42).is_err());
//! ```

use crate::memory::{MemoryBus, MemoryError, ADDRESS_SPACE_SIZE};
use log::debug;

pub mod bank;
pub mod io;

pub use bank::MemoryBank;
pub use io::IoBank;

/// Write capability of a bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Permission {
    /// Reads and writes are both accepted.
    ReadWrite,
    /// Every write is rejected with `PermissionDenied`.
    ReadOnly,
}

impl Permission {
    /// Returns true if writes are accepted.
    pub fn is_writable(self) -> bool {
        matches!(self, Permission::ReadWrite)
    }
}

/// Interface for anything that owns a span of the address space.
///
/// Banks receive absolute addresses. An address outside
/// `[offset(), offset() + size())` must fail with `OutOfRange`; the bounds check
/// always precedes the permission check.
///
/// Peripherals outside this crate (timers, video, audio) plug into the
/// address space by implementing this trait.
///
/// # Examples
///
/// ```rust
/// use libsm83::{Bank, MemoryError, Permission};
///
/// /// A single register that reads back the last value written.
/// struct Latch {
///     address: u16,
///     value: u8,
/// }
///
/// impl Bank for Latch {
///     fn offset(&self) -> u16 { self.address }
///     fn size(&self) -> usize { 1 }
///     fn permission(&self) -> Permission { Permission::ReadWrite }
///
///     fn read(&self, address: u16) -> Result<u8, MemoryError> {
///         self.check_range(address, 1)?;
///         Ok(self.value)
///     }
///
///     fn read_range(&self, address: u16, length: usize) -> Result<Vec<u8>, MemoryError> {
///         self.check_range(address, length)?;
///         Ok(vec![self.value; length])
///     }
///
///     fn write(&mut self, address: u16, value: u8) -> Result<(), MemoryError> {
///         self.check_range(address, 1)?;
///         self.value = value;
///         Ok(())
///     }
///
///     fn write_range(&mut self, address: u16, values: &[u8]) -> Result<(), MemoryError> {
///         self.check_range(address, values.len())?;
///         if let Some(last) = values.last() {
///             self.value = *last;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Bank {
    /// First address owned by the bank.
    fn offset(&self) -> u16;

    /// Number of bytes owned by the bank.
    fn size(&self) -> usize;

    /// Write capability of the bank.
    fn permission(&self) -> Permission;

    /// Read the byte at `address`.
    fn read(&self, address: u16) -> Result<u8, MemoryError>;

    /// Read `length` bytes starting at `address` into an owned buffer.
    fn read_range(&self, address: u16, length: usize) -> Result<Vec<u8>, MemoryError>;

    /// Write `value` at `address`.
    fn write(&mut self, address: u16, value: u8) -> Result<(), MemoryError>;

    /// Write `values` starting at `address`; either every byte lands or none.
    fn write_range(&mut self, address: u16, values: &[u8]) -> Result<(), MemoryError>;

    /// One past the last owned address.
    fn end(&self) -> usize {
        (self.offset() as usize).saturating_add(self.size())
    }

    /// Returns true if `address` lies inside the bank.
    fn contains(&self, address: u16) -> bool {
        let address = address as usize;
        address >= self.offset() as usize && address < self.end()
    }

    /// Verify both endpoints of `[address, address + length)` lie inside the bank.
    ///
    /// A zero-length span is checked as if it were one byte long.
    fn check_range(&self, address: u16, length: usize) -> Result<(), MemoryError> {
        let start = self.offset() as usize;
        let end = self.end();
        let first = address as usize;
        // An overflowing span lands on usize::MAX, which no bank owns
        let last = first.saturating_add(length.saturating_sub(1));

        for candidate in [first, last] {
            if candidate < start || candidate >= end {
                return Err(MemoryError::OutOfRange {
                    address: candidate,
                    start: self.offset(),
                    end,
                });
            }
        }
        Ok(())
    }
}

/// Check that a bank of `size` bytes at `offset` fits the 16-bit space.
pub(crate) fn validate_span(offset: u16, size: usize) -> Result<(), MemoryError> {
    let fits = (offset as usize)
        .checked_add(size)
        .map_or(false, |end| end <= ADDRESS_SPACE_SIZE);
    if size == 0 || !fits {
        return Err(MemoryError::InvalidBank { offset, size });
    }
    Ok(())
}

/// Memory map that routes accesses to registered banks.
///
/// `AddressSpace` implements `MemoryBus` and dispatches each access to the one
/// bank whose span contains the address. Banks never overlap: registration
/// of an overlapping bank fails and leaves the map unchanged.
///
/// # Address Routing
///
/// 1. Find the bank whose span contains the address
/// 2. If none, fail with `UnmappedAddress`
/// 3. Otherwise delegate; the bank's own failures (`PermissionDenied`) propagate
///
/// Range accesses are routed by their first address and must stay within that
/// bank; a span running past the bank's end fails with `OutOfRange`.
pub struct AddressSpace {
    banks: Vec<Box<dyn Bank>>,
}

impl AddressSpace {
    /// Create an empty address space.
    pub fn new() -> Self {
        Self { banks: Vec::new() }
    }

    /// Register a bank.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Bank installed
    /// * `Err(MemoryError::InvalidBank)` - Bank is empty or runs past 0xFFFF
    /// * `Err(MemoryError::Overlap)` - Span intersects an existing bank; nothing installed
    pub fn register_bank(&mut self, bank: Box<dyn Bank>) -> Result<(), MemoryError> {
        validate_span(bank.offset(), bank.size())?;

        let new_start = bank.offset();
        let new_end = bank.end();

        // Ranges [a, b) and [c, d) overlap if a < d and c < b
        for existing in &self.banks {
            if (new_start as usize) < existing.end() && (existing.offset() as usize) < new_end {
                return Err(MemoryError::Overlap {
                    new_start,
                    new_end,
                    existing_start: existing.offset(),
                    existing_end: existing.end(),
                });
            }
        }

        debug!(
            "registered {:?} bank at 0x{:04X}-0x{:04X}",
            bank.permission(),
            new_start,
            new_end - 1
        );

        // Keep banks ordered by offset so iteration follows the memory map
        let position = self
            .banks
            .iter()
            .position(|existing| existing.offset() > new_start)
            .unwrap_or(self.banks.len());
        self.banks.insert(position, bank);
        Ok(())
    }

    /// Returns the bank that owns `address`, if any.
    pub fn bank_at(&self, address: u16) -> Option<&dyn Bank> {
        self.banks
            .iter()
            .find(|bank| bank.contains(address))
            .map(|bank| bank.as_ref())
    }

    fn bank_at_mut(&mut self, address: u16) -> Option<&mut (dyn Bank + 'static)> {
        self.banks
            .iter_mut()
            .find(|bank| bank.contains(address))
            .map(|bank| bank.as_mut())
    }

    fn owner(&self, address: u16) -> Result<&dyn Bank, MemoryError> {
        self.bank_at(address)
            .ok_or(MemoryError::UnmappedAddress { address })
    }

    fn owner_mut(&mut self, address: u16) -> Result<&mut (dyn Bank + 'static), MemoryError> {
        self.bank_at_mut(address)
            .ok_or(MemoryError::UnmappedAddress { address })
    }

    /// Iterate over registered banks in address order.
    pub fn banks(&self) -> impl Iterator<Item = &dyn Bank> {
        self.banks.iter().map(|bank| bank.as_ref())
    }

    /// Number of registered banks.
    pub fn len(&self) -> usize {
        self.banks.len()
    }

    /// Returns true if no bank has been registered.
    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for AddressSpace {
    fn read(&self, address: u16) -> Result<u8, MemoryError> {
        self.owner(address)?.read(address)
    }

    fn write(&mut self, address: u16, value: u8) -> Result<(), MemoryError> {
        self.owner_mut(address)?.write(address, value)
    }

    fn read_range(&self, address: u16, length: usize) -> Result<Vec<u8>, MemoryError> {
        self.owner(address)?.read_range(address, length)
    }

    fn write_range(&mut self, address: u16, values: &[u8]) -> Result<(), MemoryError> {
        self.owner_mut(address)?.write_range(address, values)
    }
}
