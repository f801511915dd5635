//! Memory-mapped I/O port window.
//!
//! Provides a read-write bank for hardware registers (the DMG's 0xFF00 page)
//! with a callback interface so host peripherals can react to port writes.

use super::{Bank, Permission};
use crate::memory::MemoryError;
use log::trace;

/// Window of memory-mapped I/O ports.
///
/// Each port reads back the last value written to it. When a write observer is
/// installed, it is invoked with `(address, value)` after every accepted byte,
/// in address order for range writes. This is the hook timers, serial links
/// and the joypad use to see what the CPU stores into their registers.
///
/// # Examples
///
/// ```rust
/// use libsm83::{Bank, IoBank};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let written = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&written);
///
/// let mut ports = IoBank::new(0xFF00, 0x80).unwrap();
/// ports.set_write_observer(move |address, value| sink.borrow_mut().push((address, value)));
///
/// ports.write(0xFF01, b'A').unwrap();
/// assert_eq!(ports.read(0xFF01).unwrap(), b'A');
/// assert_eq!(*written.borrow(), vec![(0xFF01, b'A')]);
/// ```
pub struct IoBank {
    offset: u16,
    ports: Vec<u8>,
    on_write: Option<Box<dyn FnMut(u16, u8)>>,
}

impl IoBank {
    /// Create a port window of `size` registers starting at `offset`, all zero.
    pub fn new(offset: u16, size: usize) -> Result<Self, MemoryError> {
        super::validate_span(offset, size)?;
        Ok(Self {
            offset,
            ports: vec![0; size],
            on_write: None,
        })
    }

    /// Install the observer called after each accepted port write.
    pub fn set_write_observer<F>(&mut self, observer: F)
    where
        F: FnMut(u16, u8) + 'static,
    {
        self.on_write = Some(Box::new(observer));
    }

    /// Remove the write observer.
    pub fn clear_write_observer(&mut self) {
        self.on_write = None;
    }

    fn notify(&mut self, address: u16, value: u8) {
        trace!("port 0x{:04X} <- 0x{:02X}", address, value);
        if let Some(observer) = self.on_write.as_mut() {
            observer(address, value);
        }
    }
}

impl Bank for IoBank {
    fn offset(&self) -> u16 {
        self.offset
    }

    fn size(&self) -> usize {
        self.ports.len()
    }

    fn permission(&self) -> Permission {
        Permission::ReadWrite
    }

    fn read(&self, address: u16) -> Result<u8, MemoryError> {
        self.check_range(address, 1)?;
        Ok(self.ports[(address - self.offset) as usize])
    }

    fn read_range(&self, address: u16, length: usize) -> Result<Vec<u8>, MemoryError> {
        self.check_range(address, length)?;
        let start = (address - self.offset) as usize;
        Ok(self.ports[start..start + length].to_vec())
    }

    fn write(&mut self, address: u16, value: u8) -> Result<(), MemoryError> {
        self.check_range(address, 1)?;
        self.ports[(address - self.offset) as usize] = value;
        self.notify(address, value);
        Ok(())
    }

    fn write_range(&mut self, address: u16, values: &[u8]) -> Result<(), MemoryError> {
        self.check_range(address, values.len())?;
        let start = (address - self.offset) as usize;
        self.ports[start..start + values.len()].copy_from_slice(values);
        for (i, value) in values.iter().enumerate() {
            self.notify(address + i as u16, *value);
        }
        Ok(())
    }
}
