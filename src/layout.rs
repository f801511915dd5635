//! # Memory Layouts
//!
//! Declarative descriptions of a memory map. A `MemoryLayout` lists the banks
//! to create; `build` turns it into a populated `AddressSpace`.
//!
//! With the `serde` feature enabled, layouts can be loaded from JSON:
//!
//! ```json
//! {
//!   "banks": [
//!     { "name": "rom", "offset": 0, "size": 32768, "permission": "ReadOnly" },
//!     { "name": "io", "offset": 65280, "size": 128, "permission": "ReadWrite", "io": true }
//!   ]
//! }
//! ```

use crate::devices::{validate_span, AddressSpace, IoBank, MemoryBank, Permission};
use crate::memory::MemoryError;
use crate::Bank;
use log::debug;

/// One bank of a memory map.
///
/// `io` selects an `IoBank` instead of a `MemoryBank`. I/O banks are always
/// writable, so `permission` only applies to memory banks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BankLayout {
    pub name: String,
    pub offset: u16,
    pub size: usize,
    pub permission: Permission,
    #[cfg_attr(feature = "serde", serde(default))]
    pub io: bool,
}

impl BankLayout {
    /// Describe a RAM or ROM bank.
    pub fn memory(name: &str, offset: u16, size: usize, permission: Permission) -> Self {
        Self {
            name: name.to_string(),
            offset,
            size,
            permission,
            io: false,
        }
    }

    /// Describe a window of I/O ports.
    pub fn io(name: &str, offset: u16, size: usize) -> Self {
        Self {
            name: name.to_string(),
            offset,
            size,
            permission: Permission::ReadWrite,
            io: true,
        }
    }
}

/// An ordered list of banks making up an address space.
///
/// # Examples
///
/// ```
/// use libsm83::{MemoryBus, MemoryLayout};
///
/// let memory = MemoryLayout::dmg()
///     .build(|bank| (bank.name == "rom0").then(|| vec![0x00, 0xC3, 0x50, 0x01]))
///     .unwrap();
///
/// assert_eq!(memory.read(0x0001).unwrap(), 0xC3);
/// assert_eq!(memory.read(0xC000).unwrap(), 0x00);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryLayout {
    pub banks: Vec<BankLayout>,
}

impl MemoryLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bank description.
    pub fn with_bank(mut self, bank: BankLayout) -> Self {
        self.banks.push(bank);
        self
    }

    /// The original Game Boy (DMG) memory map.
    ///
    /// | Range         | Bank  | Access     |
    /// |---------------|-------|------------|
    /// | 0x0000-0x3FFF | rom0  | read-only  |
    /// | 0x4000-0x7FFF | romx  | read-only  |
    /// | 0x8000-0x9FFF | vram  | read-write |
    /// | 0xA000-0xBFFF | sram  | read-write |
    /// | 0xC000-0xDFFF | wram  | read-write |
    /// | 0xFE00-0xFE9F | oam   | read-write |
    /// | 0xFF00-0xFF7F | io    | I/O ports  |
    /// | 0xFF80-0xFFFE | hram  | read-write |
    /// | 0xFFFF        | ie    | I/O port   |
    ///
    /// Echo RAM (0xE000-0xFDFF) and 0xFEA0-0xFEFF are left unmapped.
    pub fn dmg() -> Self {
        use Permission::{ReadOnly, ReadWrite};

        Self {
            banks: vec![
                BankLayout::memory("rom0", 0x0000, 0x4000, ReadOnly),
                BankLayout::memory("romx", 0x4000, 0x4000, ReadOnly),
                BankLayout::memory("vram", 0x8000, 0x2000, ReadWrite),
                BankLayout::memory("sram", 0xA000, 0x2000, ReadWrite),
                BankLayout::memory("wram", 0xC000, 0x2000, ReadWrite),
                BankLayout::memory("oam", 0xFE00, 0x00A0, ReadWrite),
                BankLayout::io("io", 0xFF00, 0x0080),
                BankLayout::memory("hram", 0xFF80, 0x007F, ReadWrite),
                BankLayout::io("ie", 0xFFFF, 0x0001),
            ],
        }
    }

    /// Create every bank and register it in a new address space.
    ///
    /// `preload` is asked for the initial contents of each bank; `None` leaves
    /// the bank zeroed and shorter contents are zero-padded.
    ///
    /// # Errors
    ///
    /// * `InvalidBank` - A bank is empty or runs past 0xFFFF
    /// * `OutOfRange` - Preloaded contents are larger than their bank
    /// * `Overlap` - Two banks claim the same address
    pub fn build<F>(&self, mut preload: F) -> Result<AddressSpace, MemoryError>
    where
        F: FnMut(&BankLayout) -> Option<Vec<u8>>,
    {
        let mut space = AddressSpace::new();

        for layout in &self.banks {
            validate_span(layout.offset, layout.size)?;

            let mut data = preload(layout).unwrap_or_default();
            if data.len() > layout.size {
                return Err(MemoryError::OutOfRange {
                    address: layout.offset as usize + data.len() - 1,
                    start: layout.offset,
                    end: layout.offset as usize + layout.size,
                });
            }
            data.resize(layout.size, 0);

            let bank: Box<dyn Bank> = if layout.io {
                let mut ports = IoBank::new(layout.offset, layout.size)?;
                ports.write_range(layout.offset, &data)?;
                Box::new(ports)
            } else {
                Box::new(MemoryBank::with_data(
                    layout.offset,
                    data,
                    layout.permission,
                )?)
            };

            debug!("layout bank `{}`", layout.name);
            space.register_bank(bank)?;
        }

        Ok(space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBus;

    #[test]
    fn test_dmg_map_is_consistent() {
        let mut space = MemoryLayout::dmg().build(|_| None).unwrap();
        assert_eq!(space.len(), 9);

        assert_eq!(
            space.write(0x0150, 0x01),
            Err(MemoryError::PermissionDenied { address: 0x0150 })
        );
        assert_eq!(
            space.read(0xE000),
            Err(MemoryError::UnmappedAddress { address: 0xE000 })
        );
        assert_eq!(
            space.read(0xFEA0),
            Err(MemoryError::UnmappedAddress { address: 0xFEA0 })
        );
    }

    #[test]
    fn test_preload_fills_and_pads() {
        let space = MemoryLayout::dmg()
            .build(|bank| match bank.name.as_str() {
                "romx" => Some(vec![0xAB, 0xCD]),
                "ie" => Some(vec![0x1F]),
                _ => None,
            })
            .unwrap();

        assert_eq!(space.read_range(0x4000, 3).unwrap(), vec![0xAB, 0xCD, 0x00]);
        assert_eq!(space.read(0xFFFF).unwrap(), 0x1F);
    }

    #[test]
    fn test_oversized_preload_is_rejected() {
        let layout = MemoryLayout::new().with_bank(BankLayout::memory(
            "tiny",
            0xC000,
            2,
            Permission::ReadWrite,
        ));

        let result = layout.build(|_| Some(vec![1, 2, 3]));

        assert_eq!(
            result.err(),
            Some(MemoryError::OutOfRange {
                address: 0xC002,
                start: 0xC000,
                end: 0xC002,
            })
        );
    }

    #[test]
    fn test_overlapping_layout_is_rejected() {
        let layout = MemoryLayout::new()
            .with_bank(BankLayout::memory("a", 0xC000, 0x100, Permission::ReadWrite))
            .with_bank(BankLayout::io("b", 0xC080, 0x100));

        assert!(matches!(
            layout.build(|_| None),
            Err(MemoryError::Overlap { .. })
        ));
    }

    #[test]
    fn test_invalid_bank_is_rejected() {
        let layout = MemoryLayout::new().with_bank(BankLayout::memory(
            "past-end",
            0xFFF0,
            0x20,
            Permission::ReadWrite,
        ));

        assert_eq!(
            layout.build(|_| None).err(),
            Some(MemoryError::InvalidBank {
                offset: 0xFFF0,
                size: 0x20,
            })
        );
    }
}
