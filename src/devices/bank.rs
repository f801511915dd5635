//! Plain memory bank implementation.
//!
//! A single type covers both RAM and ROM: write access is a capability flag on
//! the bank rather than a separate device type.

use super::{Bank, Permission};
use crate::memory::MemoryError;
use log::{debug, warn};

/// Byte-array backed memory bank owning `[offset, offset + size)`.
///
/// Addresses passed to the bank are absolute bus addresses, not offsets into
/// the bank. Every access is bounds-checked first; writes are then checked
/// against the bank's permission.
///
/// # Examples
///
/// ```rust
/// use libsm83::{Bank, MemoryBank, MemoryError};
///
/// let mut bank = MemoryBank::read_only(0x0100, vec![0x11, 0x22, 0x33, 0x44]).unwrap();
///
/// assert_eq!(bank.read(0x0102).unwrap(), 0x33);
/// assert!(matches!(bank.write(0x0102, 0xFF), Err(MemoryError::PermissionDenied { .. })));
/// assert!(matches!(bank.read(0x0104), Err(MemoryError::OutOfRange { .. })));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryBank {
    offset: u16,
    data: Vec<u8>,
    permission: Permission,
}

impl MemoryBank {
    /// Create a zero-filled read-write bank.
    ///
    /// Fails with `InvalidBank` when `size` is zero or the bank would extend
    /// past 0xFFFF.
    pub fn new(offset: u16, size: usize) -> Result<Self, MemoryError> {
        Self::with_data(offset, vec![0; size], Permission::ReadWrite)
    }

    /// Create a read-only bank whose contents are fixed at construction.
    ///
    /// This is the load path for boot ROMs and cartridge banks.
    pub fn read_only(offset: u16, data: Vec<u8>) -> Result<Self, MemoryError> {
        Self::with_data(offset, data, Permission::ReadOnly)
    }

    /// Create a bank from preloaded contents and an explicit permission.
    pub fn with_data(
        offset: u16,
        data: Vec<u8>,
        permission: Permission,
    ) -> Result<Self, MemoryError> {
        super::validate_span(offset, data.len())?;
        Ok(Self {
            offset,
            data,
            permission,
        })
    }

    /// Seal the bank so every subsequent write is rejected.
    ///
    /// Loaders fill a read-write bank with `write_range` and then call this.
    pub fn make_read_only(&mut self) {
        debug!(
            "sealing bank 0x{:04X}-0x{:04X} read-only",
            self.offset,
            self.end() - 1
        );
        self.permission = Permission::ReadOnly;
    }

    fn index(&self, address: usize) -> usize {
        address - self.offset as usize
    }
}

impl Bank for MemoryBank {
    fn offset(&self) -> u16 {
        self.offset
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn permission(&self) -> Permission {
        self.permission
    }

    fn read(&self, address: u16) -> Result<u8, MemoryError> {
        self.check_range(address, 1)?;
        Ok(self.data[self.index(address as usize)])
    }

    fn read_range(&self, address: u16, length: usize) -> Result<Vec<u8>, MemoryError> {
        self.check_range(address, length)?;
        let start = self.index(address as usize);
        Ok(self.data[start..start + length].to_vec())
    }

    fn write(&mut self, address: u16, value: u8) -> Result<(), MemoryError> {
        self.check_range(address, 1)?;
        if !self.permission.is_writable() {
            warn!("rejected write of 0x{:02X} to read-only 0x{:04X}", value, address);
            return Err(MemoryError::PermissionDenied { address });
        }
        let index = self.index(address as usize);
        self.data[index] = value;
        Ok(())
    }

    fn write_range(&mut self, address: u16, values: &[u8]) -> Result<(), MemoryError> {
        self.check_range(address, values.len())?;
        if !self.permission.is_writable() {
            warn!(
                "rejected {}-byte write to read-only 0x{:04X}",
                values.len(),
                address
            );
            return Err(MemoryError::PermissionDenied { address });
        }
        let start = self.index(address as usize);
        self.data[start..start + values.len()].copy_from_slice(values);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_new_is_zeroed() {
        let bank = MemoryBank::new(0xC000, 256).unwrap();
        assert_eq!(bank.size(), 256);
        assert_eq!(bank.end(), 0xC100);
        assert_eq!(bank.permission(), Permission::ReadWrite);

        for address in 0xC000..0xC100u16 {
            assert_eq!(bank.read(address).unwrap(), 0x00);
        }
    }

    #[test]
    fn test_bank_addresses_are_absolute() {
        let mut bank = MemoryBank::new(0x8000, 16).unwrap();

        bank.write(0x8000, 0xAA).unwrap();
        bank.write(0x800F, 0xBB).unwrap();

        assert_eq!(bank.read(0x8000).unwrap(), 0xAA);
        assert_eq!(bank.read(0x800F).unwrap(), 0xBB);
        assert!(bank.read(0x0000).is_err());
        assert!(bank.read(0x8010).is_err());
    }

    #[test]
    fn test_bank_rejects_empty_and_oversized() {
        assert_eq!(
            MemoryBank::new(0x1000, 0).unwrap_err(),
            MemoryError::InvalidBank {
                offset: 0x1000,
                size: 0
            }
        );
        assert!(MemoryBank::new(0xFF00, 0x101).is_err());

        // Exactly reaching the top is fine
        let top = MemoryBank::new(0xFF00, 0x100).unwrap();
        assert_eq!(top.end(), 0x10000);
        assert!(MemoryBank::new(0x0000, 0x10000).is_ok());
    }

    #[test]
    fn test_read_range_returns_copy() {
        let mut bank = MemoryBank::with_data(0x2000, vec![1, 2, 3, 4], Permission::ReadWrite)
            .unwrap();

        let mut copy = bank.read_range(0x2001, 2).unwrap();
        assert_eq!(copy, vec![2, 3]);

        copy[0] = 0xFF;
        assert_eq!(bank.read(0x2001).unwrap(), 2);

        bank.write(0x2001, 9).unwrap();
        assert_eq!(copy, vec![0xFF, 3]);
    }

    #[test]
    fn test_zero_length_range_needs_owned_start() {
        let bank = MemoryBank::new(0x2000, 4).unwrap();
        assert_eq!(bank.read_range(0x2003, 0).unwrap(), Vec::<u8>::new());
        assert!(bank.read_range(0x2004, 0).is_err());
    }

    #[test]
    fn test_make_read_only_after_bulk_load() {
        let mut bank = MemoryBank::new(0x0000, 4).unwrap();
        bank.write_range(0x0000, &[0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
        bank.make_read_only();

        assert_eq!(bank.permission(), Permission::ReadOnly);
        assert_eq!(
            bank.write(0x0001, 0x00),
            Err(MemoryError::PermissionDenied { address: 0x0001 })
        );
        assert_eq!(bank.read_range(0x0000, 4).unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_out_of_range_wins_over_permission() {
        let mut bank = MemoryBank::read_only(0x0100, vec![0; 4]).unwrap();

        assert!(matches!(
            bank.write(0x0104, 0x00),
            Err(MemoryError::OutOfRange { address: 0x0104, .. })
        ));
        assert!(matches!(
            bank.write_range(0x0103, &[0, 0]),
            Err(MemoryError::OutOfRange { address: 0x0104, .. })
        ));
    }
}
