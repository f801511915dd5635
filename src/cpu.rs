//! # CPU Execution
//!
//! This module contains the `Cpu` struct: an execution context, the dispatch
//! table it executes from, and the cycle counter.
//!
//! ## Execution Model
//!
//! The CPU executes instructions via:
//! - `step()`: Execute one instruction
//! - `run_for_cycles()`: Execute until a cycle budget is exhausted
//!
//! Each step fetches the opcode at PC, advances PC past it, looks the opcode
//! up and runs the instruction. Operand bytes are consumed by the addressing
//! primitives, so PC ends up past the whole instruction. A step is atomic: if
//! anything fails, the register file (PC included) is restored and the cycle
//! counter is left alone.

use crate::context::{Context, ExecutionContext};
use crate::instructions::InstructionSet;
use crate::registers::Registers;
use crate::{ExecutionError, MemoryBus};
use log::{trace, warn};

/// SM83 CPU state and execution loop.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation
///
/// # Examples
///
/// ```
/// use libsm83::{Cpu, FlatMemory};
///
/// let cpu = Cpu::with_standard_set(FlatMemory::new()).unwrap();
///
/// // Starts where the DMG boot ROM leaves off
/// assert_eq!(cpu.pc(), 0x0100);
/// assert_eq!(cpu.registers().sp(), 0xFFFE);
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct Cpu<M: MemoryBus> {
    context: Context<M>,
    instructions: InstructionSet,
    cycles: u64,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a CPU in the post-boot register state.
    pub fn new(memory: M, instructions: InstructionSet) -> Self {
        Self::with_registers(Registers::post_boot(), memory, instructions)
    }

    /// Creates a CPU starting from an explicit register state.
    pub fn with_registers(registers: Registers, memory: M, instructions: InstructionSet) -> Self {
        Self {
            context: Context::with_registers(registers, memory),
            instructions,
            cycles: 0,
        }
    }

    /// Creates a CPU running the instruction set shipped with this crate.
    ///
    /// Fails if the instruction set cannot be built.
    pub fn with_standard_set(memory: M) -> Result<Self, ExecutionError> {
        Ok(Self::new(memory, InstructionSet::standard()?))
    }

    /// Executes one instruction.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the instruction executed; its cycles have been added
    /// - `Err(ExecutionError::UnimplementedOpcode(opcode))` if the opcode has no instruction
    /// - `Err(ExecutionError::Memory(_))` if a memory access failed
    ///
    /// On error the register file is rolled back to its state before the step.
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        let snapshot = *self.context.registers();

        let result = self.execute_next();
        if result.is_err() {
            *self.context.registers_mut() = snapshot;
        }
        result
    }

    fn execute_next(&mut self) -> Result<(), ExecutionError> {
        let pc = self.context.registers().pc();
        let opcode = self.context.fetch_byte()?;

        let instruction = match self.instructions.get(opcode) {
            Some(instruction) => *instruction,
            None => {
                warn!("unimplemented opcode 0x{:02X} at 0x{:04X}", opcode, pc);
                return Err(ExecutionError::UnimplementedOpcode(opcode));
            }
        };

        trace!(
            "0x{:04X}: {:<12} ({} cycles)",
            pc,
            instruction.mnemonic,
            instruction.cycles
        );
        instruction.execute(&mut self.context)?;

        self.cycles += instruction.cycles as u64;
        Ok(())
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Returns the number of cycles actually consumed, which may overshoot the
    /// budget by up to one instruction.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Total clock cycles executed since creation.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Program counter.
    pub fn pc(&self) -> u16 {
        self.context.registers().pc()
    }

    /// The register file.
    pub fn registers(&self) -> &Registers {
        self.context.registers()
    }

    /// Mutable access to the register file.
    pub fn registers_mut(&mut self) -> &mut Registers {
        self.context.registers_mut()
    }

    /// The memory bus.
    pub fn memory(&self) -> &M {
        self.context.memory()
    }

    /// Mutable access to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        self.context.memory_mut()
    }

    /// The execution context instructions run against.
    pub fn context_mut(&mut self) -> &mut Context<M> {
        &mut self.context
    }

    /// The dispatch table.
    pub fn instructions(&self) -> &InstructionSet {
        &self.instructions
    }
}
