//! Integration tests for the banked address space.
//!
//! These tests verify routing, overlap rejection, unmapped addresses, I/O
//! banks and CPU execution against a banked memory map.

use libsm83::{
    AddressSpace, Bank, Cpu, ExecutionError, IoBank, MemoryBank, MemoryBus, MemoryError,
    Permission, Register,
};
use std::cell::RefCell;
use std::rc::Rc;

fn rom_and_wram(rom: Vec<u8>) -> AddressSpace {
    let mut memory = AddressSpace::new();
    memory
        .register_bank(Box::new(MemoryBank::read_only(0x0000, rom).unwrap()))
        .unwrap();
    memory
        .register_bank(Box::new(MemoryBank::new(0xC000, 0x2000).unwrap()))
        .unwrap();
    memory
}

#[test]
fn test_routing_to_rom_and_ram() {
    let mut memory = rom_and_wram(vec![0xAA; 0x100]);

    assert_eq!(memory.read(0x0010).unwrap(), 0xAA);
    memory.write(0xC123, 0x55).unwrap();
    assert_eq!(memory.read(0xC123).unwrap(), 0x55);

    assert_eq!(
        memory.write(0x0010, 0x00),
        Err(MemoryError::PermissionDenied { address: 0x0010 })
    );
    assert_eq!(
        memory.read(0x8000),
        Err(MemoryError::UnmappedAddress { address: 0x8000 })
    );
}

#[test]
fn test_overlapping_registration_leaves_map_unchanged() {
    let mut memory = rom_and_wram(vec![0x00; 0x100]);

    let result = memory.register_bank(Box::new(MemoryBank::new(0x0080, 0x100).unwrap()));

    assert_eq!(
        result,
        Err(MemoryError::Overlap {
            new_start: 0x0080,
            new_end: 0x0180,
            existing_start: 0x0000,
            existing_end: 0x0100,
        })
    );
    assert_eq!(memory.len(), 2);
    assert_eq!(
        memory.read(0x0150),
        Err(MemoryError::UnmappedAddress { address: 0x0150 })
    );
}

#[test]
fn test_range_routed_by_start_address() {
    let mut memory = rom_and_wram(vec![0x01, 0x02, 0x03, 0x04]);

    assert_eq!(memory.read_range(0x0001, 3).unwrap(), vec![0x02, 0x03, 0x04]);
    assert!(matches!(
        memory.read_range(0x0002, 4),
        Err(MemoryError::OutOfRange { .. })
    ));
    assert_eq!(
        memory.read_range(0x0004, 1),
        Err(MemoryError::UnmappedAddress { address: 0x0004 })
    );
}

#[test]
fn test_io_bank_observer_sees_cpu_writes() {
    let written = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&written);

    let mut ports = IoBank::new(0xFF00, 0x80).unwrap();
    ports.set_write_observer(move |address, value| sink.borrow_mut().push((address, value)));

    // LD A,$81 ; LDH ($02),A
    let mut rom = vec![0x00; 0x200];
    rom[0x100..0x104].copy_from_slice(&[0x3E, 0x81, 0xE0, 0x02]);

    let mut memory = rom_and_wram(rom);
    memory.register_bank(Box::new(ports)).unwrap();

    let mut cpu = Cpu::with_standard_set(memory).unwrap();
    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(*written.borrow(), vec![(0xFF02, 0x81)]);
    assert_eq!(cpu.memory().read(0xFF02).unwrap(), 0x81);
    assert_eq!(cpu.cycles(), 20);
}

#[test]
fn test_cpu_store_to_rom_faults_without_side_effects() {
    // LD A,$42 ; LD ($0000),A
    let mut rom = vec![0x00; 0x200];
    rom[0x100..0x105].copy_from_slice(&[0x3E, 0x42, 0xEA, 0x00, 0x00]);

    let mut cpu = Cpu::with_standard_set(rom_and_wram(rom)).unwrap();
    cpu.step().unwrap();

    let result = cpu.step();

    assert_eq!(
        result,
        Err(ExecutionError::Memory(MemoryError::PermissionDenied { address: 0x0000 }))
    );
    assert_eq!(cpu.pc(), 0x0102);
    assert_eq!(cpu.cycles(), 8);
    assert_eq!(cpu.registers().get(Register::A), 0x42);
    assert_eq!(cpu.memory().read(0x0000).unwrap(), 0x00);
}

#[test]
fn test_fetch_from_unmapped_address() {
    let memory = AddressSpace::new();
    let mut cpu = Cpu::with_standard_set(memory).unwrap();

    assert_eq!(
        cpu.step(),
        Err(ExecutionError::Memory(MemoryError::UnmappedAddress { address: 0x0100 }))
    );
    assert_eq!(cpu.pc(), 0x0100);
}

/// Peripheral with a caller-chosen span that stores nothing
struct Window {
    offset: u16,
    size: usize,
}

impl Bank for Window {
    fn offset(&self) -> u16 {
        self.offset
    }

    fn size(&self) -> usize {
        self.size
    }

    fn permission(&self) -> Permission {
        Permission::ReadWrite
    }

    fn read(&self, address: u16) -> Result<u8, MemoryError> {
        self.check_range(address, 1)?;
        Ok(0xFF)
    }

    fn read_range(&self, address: u16, length: usize) -> Result<Vec<u8>, MemoryError> {
        self.check_range(address, length)?;
        Ok(vec![0xFF; length])
    }

    fn write(&mut self, address: u16, _value: u8) -> Result<(), MemoryError> {
        self.check_range(address, 1)
    }

    fn write_range(&mut self, address: u16, values: &[u8]) -> Result<(), MemoryError> {
        self.check_range(address, values.len())
    }
}

#[test]
fn test_register_rejects_empty_external_bank() {
    let mut memory = AddressSpace::new();

    let result = memory.register_bank(Box::new(Window {
        offset: 0xFF10,
        size: 0,
    }));

    assert_eq!(
        result,
        Err(MemoryError::InvalidBank {
            offset: 0xFF10,
            size: 0,
        })
    );
    assert!(memory.is_empty());
}

#[test]
fn test_register_rejects_external_bank_past_top() {
    let mut memory = AddressSpace::new();

    for size in [0x11, usize::MAX] {
        let result = memory.register_bank(Box::new(Window {
            offset: 0xFFF0,
            size,
        }));
        assert_eq!(
            result,
            Err(MemoryError::InvalidBank {
                offset: 0xFFF0,
                size,
            })
        );
    }

    assert!(memory
        .register_bank(Box::new(Window {
            offset: 0xFFF0,
            size: 0x10,
        }))
        .is_ok());
    assert_eq!(memory.read(0xFFFF).unwrap(), 0xFF);
}

#[test]
fn test_huge_range_through_address_space() {
    let mut memory = rom_and_wram(vec![0x00; 0x100]);

    assert!(matches!(
        memory.read_range(0xC000, usize::MAX),
        Err(MemoryError::OutOfRange { address: usize::MAX, .. })
    ));
    assert!(matches!(
        memory.read_range(0x00FF, usize::MAX),
        Err(MemoryError::OutOfRange { .. })
    ));
    memory.write(0xC000, 0x12).unwrap();
    assert_eq!(memory.read(0xC000).unwrap(), 0x12);
}
