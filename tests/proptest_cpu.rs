//! Property-based tests for CPU and register invariants.
//!
//! These tests use proptest to verify that every instruction in the standard
//! set honours its declared size and cycle cost, and that register pairs
//! always agree with their halves.

use libsm83::{
    Cpu, ExtendedRegister, FlatMemory, InstructionSet, MemoryBus, Register, Registers,
};
use proptest::prelude::*;

/// Get all opcodes defined by the standard instruction set
fn implemented_opcodes() -> Vec<u8> {
    InstructionSet::standard()
        .unwrap()
        .iter()
        .map(|instruction| instruction.opcode)
        .collect()
}

/// Registers with arbitrary contents and SP/HL/BC/DE pointing into work RAM
fn arbitrary_registers() -> impl Strategy<Value = Registers> {
    (
        any::<(u8, u8)>(),
        0xC000u16..0xDF00,
        0xC000u16..0xDF00,
        0xC000u16..0xDF00,
        0xC002u16..0xDF00,
    )
        .prop_map(|((a, f), bc, de, hl, sp)| {
            let mut regs = Registers::default();
            regs.set(Register::A, a);
            regs.set(Register::F, f);
            regs.set_extended(ExtendedRegister::BC, bc);
            regs.set_extended(ExtendedRegister::DE, de);
            regs.set_extended(ExtendedRegister::HL, hl);
            regs.set_extended(ExtendedRegister::SP, sp);
            regs.set_extended(ExtendedRegister::PC, 0x0200);
            regs
        })
}

proptest! {
    /// Every defined instruction advances PC by its size and adds its cycles
    #[test]
    fn prop_pc_and_cycles_follow_table(
        opcode in prop::sample::select(implemented_opcodes()),
        // Keeps LD (nn),SP clear of the top of memory
        operands in (any::<u8>(), 0x00u8..0xFF),
        regs in arbitrary_registers(),
    ) {
        let set = InstructionSet::standard().unwrap();
        let instruction = *set.get(opcode).unwrap();

        let mut memory = FlatMemory::new();
        memory.write_range(0x0200, &[opcode, operands.0, operands.1]).unwrap();
        let mut cpu = Cpu::with_registers(regs, memory, set);

        cpu.step().unwrap();

        prop_assert_eq!(cpu.pc(), 0x0200 + instruction.size() as u16);
        prop_assert_eq!(cpu.cycles(), instruction.cycles as u64);
    }

    /// Register-to-register loads copy the source and touch nothing else
    #[test]
    fn prop_ld_r_r_copies(opcode in 0x40u8..0x80, regs in arbitrary_registers()) {
        // Operand field encoding; slot 6 is (HL)
        const ORDER: [Option<Register>; 8] = [
            Some(Register::B), Some(Register::C), Some(Register::D), Some(Register::E),
            Some(Register::H), Some(Register::L), None, Some(Register::A),
        ];
        let source = ORDER[(opcode & 0x07) as usize];
        let destination = ORDER[((opcode >> 3) & 0x07) as usize];
        prop_assume!(source.is_some() && destination.is_some());
        let (source, destination) = (source.unwrap(), destination.unwrap());

        let mut memory = FlatMemory::new();
        memory.write(0x0200, opcode).unwrap();
        let mut cpu = Cpu::with_standard_set(memory).unwrap();
        *cpu.registers_mut() = regs;

        cpu.step().unwrap();

        let mut expected = regs;
        expected.set(destination, regs.get(source));
        expected.set_extended(ExtendedRegister::PC, 0x0201);
        prop_assert_eq!(*cpu.registers(), expected);
    }

    /// Pairs always equal (high << 8) | low
    #[test]
    fn prop_pairs_compose(high in any::<u8>(), low in any::<u8>()) {
        let pairs = [
            (ExtendedRegister::BC, Register::B, Register::C),
            (ExtendedRegister::DE, Register::D, Register::E),
            (ExtendedRegister::HL, Register::H, Register::L),
        ];

        for (pair, h, l) in pairs {
            let mut regs = Registers::default();
            regs.set(h, high);
            regs.set(l, low);
            prop_assert_eq!(regs.get_extended(pair), u16::from_be_bytes([high, low]));

            regs.set_extended(pair, u16::from_be_bytes([low, high]));
            prop_assert_eq!(regs.get(h), low);
            prop_assert_eq!(regs.get(l), high);
        }
    }

    /// The low nibble of F is always zero
    #[test]
    fn prop_flag_low_nibble_is_zero(value in any::<u8>(), word in any::<u16>()) {
        let mut regs = Registers::default();

        regs.set(Register::F, value);
        prop_assert_eq!(regs.get(Register::F) & 0x0F, 0);

        regs.set_extended(ExtendedRegister::AF, word);
        prop_assert_eq!(regs.get_extended(ExtendedRegister::AF) & 0x000F, 0);
    }

    /// PUSH then POP of any pair restores it and SP
    #[test]
    fn prop_push_pop_restores(value in any::<u16>(), sp in 0xC002u16..0xE000) {
        // PUSH DE ; POP BC
        let mut memory = FlatMemory::new();
        memory.write_range(0x0200, &[0xD5, 0xC1]).unwrap();

        let mut regs = Registers::default();
        regs.set_extended(ExtendedRegister::PC, 0x0200);
        regs.set_extended(ExtendedRegister::SP, sp);
        regs.set_extended(ExtendedRegister::DE, value);

        let mut cpu = Cpu::with_registers(regs, memory, InstructionSet::standard().unwrap());
        cpu.step().unwrap();
        cpu.step().unwrap();

        prop_assert_eq!(cpu.registers().get_extended(ExtendedRegister::BC), value);
        prop_assert_eq!(cpu.registers().sp(), sp);
    }
}
