//! # Execution Context
//!
//! The object every instruction acts upon. It bundles the register file with
//! the memory bus and exposes the addressing-mode primitives instructions are
//! written in terms of, so each opcode's operation is a single call.
//!
//! Operand-consuming primitives (`load_from_value`, `load_from_absolute`, ...)
//! read the bytes following the opcode at PC and advance PC past them.

use crate::memory::{MemoryBus, MemoryError};
use crate::registers::{ExtendedRegister, Flag, Register, Registers};

/// Base address of the high page used by port-style addressing.
pub const HIGH_PAGE: u16 = 0xFF00;

/// Addressing-mode primitives over a register file and a memory bus.
///
/// Implementors only supply access to the registers and the bus; every
/// primitive is provided on top of those four accessors. The trait is object
/// safe so the static instruction table can hold plain function pointers
/// taking `&mut dyn ExecutionContext`.
pub trait ExecutionContext {
    /// The register file.
    fn registers(&self) -> &Registers;

    /// Mutable access to the register file.
    fn registers_mut(&mut self) -> &mut Registers;

    /// The memory bus.
    fn bus(&self) -> &dyn MemoryBus;

    /// Mutable access to the memory bus.
    fn bus_mut(&mut self) -> &mut dyn MemoryBus;

    /// Reads the byte at PC and advances PC by one.
    fn fetch_byte(&mut self) -> Result<u8, MemoryError> {
        let value = self.bus().read(self.registers().pc())?;
        self.registers_mut().increment_extended(ExtendedRegister::PC);
        Ok(value)
    }

    /// Reads a little-endian word at PC (low byte first) and advances PC by two.
    fn fetch_word(&mut self) -> Result<u16, MemoryError> {
        let low = self.fetch_byte()?;
        let high = self.fetch_byte()?;
        Ok(u16::from_le_bytes([low, high]))
    }

    /// `destination <- source`
    fn load_from_register(
        &mut self,
        source: Register,
        destination: Register,
    ) -> Result<(), MemoryError> {
        let value = self.registers().get(source);
        self.registers_mut().set(destination, value);
        Ok(())
    }

    /// `destination <- (pair)`
    fn load_from_address(
        &mut self,
        destination: Register,
        pair: ExtendedRegister,
    ) -> Result<(), MemoryError> {
        let address = self.registers().get_extended(pair);
        let value = self.bus().read(address)?;
        self.registers_mut().set(destination, value);
        Ok(())
    }

    /// `destination <- (nn)` where `nn` follows the opcode.
    fn load_from_absolute(&mut self, destination: Register) -> Result<(), MemoryError> {
        let address = self.fetch_word()?;
        let value = self.bus().read(address)?;
        self.registers_mut().set(destination, value);
        Ok(())
    }

    /// `destination <- (base + offset)`
    fn load_from_port(
        &mut self,
        destination: Register,
        offset: Register,
        base: u16,
    ) -> Result<(), MemoryError> {
        let address = base.wrapping_add(self.registers().get(offset) as u16);
        let value = self.bus().read(address)?;
        self.registers_mut().set(destination, value);
        Ok(())
    }

    /// `destination <- (base + n)` where `n` follows the opcode.
    fn load_from_immediate_port(
        &mut self,
        destination: Register,
        base: u16,
    ) -> Result<(), MemoryError> {
        let address = base.wrapping_add(self.fetch_byte()? as u16);
        let value = self.bus().read(address)?;
        self.registers_mut().set(destination, value);
        Ok(())
    }

    /// `destination <- n` where `n` follows the opcode.
    fn load_from_value(&mut self, destination: Register) -> Result<(), MemoryError> {
        let value = self.fetch_byte()?;
        self.registers_mut().set(destination, value);
        Ok(())
    }

    /// `(pair) <- source`
    fn put_to_address(
        &mut self,
        source: Register,
        pair: ExtendedRegister,
    ) -> Result<(), MemoryError> {
        let address = self.registers().get_extended(pair);
        let value = self.registers().get(source);
        self.bus_mut().write(address, value)
    }

    /// `(nn) <- source` where `nn` follows the opcode.
    fn put_to_absolute(&mut self, source: Register) -> Result<(), MemoryError> {
        let address = self.fetch_word()?;
        let value = self.registers().get(source);
        self.bus_mut().write(address, value)
    }

    /// `(base + offset) <- source`
    fn put_to_port(
        &mut self,
        source: Register,
        offset: Register,
        base: u16,
    ) -> Result<(), MemoryError> {
        let address = base.wrapping_add(self.registers().get(offset) as u16);
        let value = self.registers().get(source);
        self.bus_mut().write(address, value)
    }

    /// `(base + n) <- source` where `n` follows the opcode.
    fn put_to_immediate_port(&mut self, source: Register, base: u16) -> Result<(), MemoryError> {
        let address = base.wrapping_add(self.fetch_byte()? as u16);
        let value = self.registers().get(source);
        self.bus_mut().write(address, value)
    }

    /// `(pair) <- n` where `n` follows the opcode.
    fn put_value_to_address(&mut self, pair: ExtendedRegister) -> Result<(), MemoryError> {
        let value = self.fetch_byte()?;
        let address = self.registers().get_extended(pair);
        self.bus_mut().write(address, value)
    }

    /// `destination <- nn` where `nn` follows the opcode.
    fn load_word_from_value(&mut self, destination: ExtendedRegister) -> Result<(), MemoryError> {
        let value = self.fetch_word()?;
        self.registers_mut().set_extended(destination, value);
        Ok(())
    }

    /// `(nn) <- source` as a little-endian word, where `nn` follows the opcode.
    fn put_word_to_absolute(&mut self, source: ExtendedRegister) -> Result<(), MemoryError> {
        let address = self.fetch_word()?;
        let value = self.registers().get_extended(source);
        self.bus_mut().write_range(address, &value.to_le_bytes())
    }

    /// `destination <- source` between 16-bit registers.
    fn load_extended_from_extended(
        &mut self,
        source: ExtendedRegister,
        destination: ExtendedRegister,
    ) -> Result<(), MemoryError> {
        let value = self.registers().get_extended(source);
        self.registers_mut().set_extended(destination, value);
        Ok(())
    }

    /// Pushes a 16-bit register: SP drops by two and the word lands at the new
    /// SP, low byte first. SP is only updated once the write succeeded.
    fn push_word(&mut self, source: ExtendedRegister) -> Result<(), MemoryError> {
        let sp = self.registers().sp().wrapping_sub(2);
        let value = self.registers().get_extended(source);
        self.bus_mut().write_range(sp, &value.to_le_bytes())?;
        self.registers_mut().set_extended(ExtendedRegister::SP, sp);
        Ok(())
    }

    /// Pops a 16-bit register from SP, then raises SP by two.
    fn pop_word(&mut self, destination: ExtendedRegister) -> Result<(), MemoryError> {
        let sp = self.registers().sp();
        let value = self.bus().read_word(sp)?;
        let registers = self.registers_mut();
        registers.set_extended(destination, value);
        registers.set_extended(ExtendedRegister::SP, sp.wrapping_add(2));
        Ok(())
    }

    /// `destination <- SP + e` where `e` is a signed byte following the opcode.
    ///
    /// Z and N are cleared; H and C report carries out of bits 3 and 7 of the
    /// unsigned low-byte addition.
    fn load_stack_offset(&mut self, destination: ExtendedRegister) -> Result<(), MemoryError> {
        let displacement = self.fetch_byte()?;
        let sp = self.registers().sp();
        let result = sp.wrapping_add(displacement as i8 as u16);

        let half_carry = (sp & 0x000F) + (displacement as u16 & 0x000F) > 0x000F;
        let carry = (sp & 0x00FF) + displacement as u16 > 0x00FF;

        let registers = self.registers_mut();
        registers.set_extended(destination, result);
        registers.set_flag(Flag::Z, false);
        registers.set_flag(Flag::N, false);
        registers.set_flag(Flag::H, half_carry);
        registers.set_flag(Flag::C, carry);
        Ok(())
    }
}

/// Register file and memory bus owned together by one CPU.
///
/// # Examples
///
/// ```
/// use libsm83::{Context, ExecutionContext, ExtendedRegister, FlatMemory, MemoryBus, Register};
///
/// let mut ctx = Context::new(FlatMemory::new());
/// ctx.memory_mut().write(0x1000, 0x5C).unwrap();
/// ctx.registers_mut().set_extended(ExtendedRegister::HL, 0x1000);
///
/// ctx.load_from_address(Register::A, ExtendedRegister::HL).unwrap();
/// assert_eq!(ctx.registers().get(Register::A), 0x5C);
/// ```
pub struct Context<M: MemoryBus> {
    registers: Registers,
    memory: M,
}

impl<M: MemoryBus> Context<M> {
    /// Create a context with zeroed registers.
    pub fn new(memory: M) -> Self {
        Self::with_registers(Registers::default(), memory)
    }

    /// Create a context starting from the given register state.
    pub fn with_registers(registers: Registers, memory: M) -> Self {
        Self { registers, memory }
    }

    /// The concrete memory implementation.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutable access to the concrete memory implementation.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consume the context, returning its memory.
    pub fn into_memory(self) -> M {
        self.memory
    }
}

impl<M: MemoryBus> ExecutionContext for Context<M> {
    fn registers(&self) -> &Registers {
        &self.registers
    }

    fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    fn bus(&self) -> &dyn MemoryBus {
        &self.memory
    }

    fn bus_mut(&mut self) -> &mut dyn MemoryBus {
        &mut self.memory
    }
}
