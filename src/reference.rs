//! Reference interpreter
//!
//! One instruction per step, driven by the same decode/ALU/control tables
//! as the pipeline. Operand reads are latched before any effect lands, and
//! memory write-back precedes ALU write-back, matching the pipeline's
//! write-back stage.

use crate::alu;
use crate::control;
use crate::control::AddressSource;
use crate::control::MemoryAccess;
use crate::control::PcSource;
use crate::control::StoreSource;
use crate::cpu::MachineState;
use crate::instruction::Inst;

/// Executes one instruction
pub fn step(machine: &mut MachineState) {
    let word = machine.mem[machine.pc as usize] as u16;
    machine.pc = machine.pc.wrapping_add(1);

    let inst = Inst::decode(word);
    let val_a = machine.reg[inst.rnuma as usize];
    let val_b = machine.reg[inst.rnumb as usize];
    let val_c = machine.reg[inst.rnumc as usize];

    let alu_result = alu::eval(inst.op, val_a, val_b, val_c, inst.data, machine.pc);

    let address = match control::address_source(inst.op) {
        AddressSource::AluResult => alu_result as u16,
        AddressSource::ValA => val_a as u16,
    };
    let mut mem_value = 0;
    match control::memory_access(inst.op) {
        MemoryAccess::Read => mem_value = machine.mem[address as usize],
        MemoryAccess::Write => {
            machine.mem[address as usize] = match control::store_source(inst.op) {
                StoreSource::ValA => val_a,
                StoreSource::ValC => val_c,
                StoreSource::ValP => machine.pc as i16,
            };
        }
        MemoryAccess::None => {}
    }

    if control::memory_write_back(inst.op) {
        machine.reg[inst.rnumc as usize] = mem_value;
    }
    if control::alu_write_back(inst.op) {
        machine.reg[control::dest_field(&inst) as usize] = alu_result;
    }

    match control::pc_source(inst.op) {
        PcSource::Sequential => {}
        PcSource::AluResult => machine.pc = alu_result as u16,
        PcSource::MemValue => machine.pc = mem_value as u16,
        PcSource::ValC => machine.pc = val_c as u16,
    }
}

/// Runs the reference for the given number of instruction steps
pub fn run(machine: &mut MachineState, steps: u64) {
    for _ in 0..steps {
        if machine.policy.verbose {
            eprintln!(
                "[VERBOSE] Step {}: pc = {}",
                machine.history.step_count, machine.pc
            );
        }
        machine.update_step_count(1);
        step(machine);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::SimPolicy;

    fn make_machine() -> MachineState {
        MachineState::make(SimPolicy::default())
    }

    #[test]
    fn test_immediate_round_trip() {
        let mut machine = make_machine();
        machine.mem[0] = 0xF212u16 as i16; // immhigh r2, 0x12
        machine.mem[1] = 0xE234u16 as i16; // immlow  r2, 0x34
        step(&mut machine);
        step(&mut machine);
        assert_eq!(machine.reg[2], 0x1234);
        assert_eq!(machine.pc, 2);
    }

    #[test]
    fn test_stack_discipline() {
        let mut machine = make_machine();
        machine.reg[7] = 32;
        machine.reg[3] = 5;
        machine.mem[0] = 0x03F7u16 as i16; // push r3 via r7
        machine.mem[1] = 0x04E7u16 as i16; // pop r4 via r7
        step(&mut machine);
        assert_eq!(machine.reg[7], 31);
        assert_eq!(machine.mem[31], 5);
        step(&mut machine);
        assert_eq!(machine.reg[4], 5);
        assert_eq!(machine.reg[7], 32);
    }

    #[test]
    fn test_call_then_return() {
        let mut machine = make_machine();
        machine.reg[1] = 50; // target
        machine.reg[7] = 32; // stack pointer
        machine.mem[0] = 0x0137u16 as i16; // call r1 via r7
        machine.mem[50] = 0x0047u16 as i16; // return via r7

        step(&mut machine);
        assert_eq!(machine.pc, 50);
        assert_eq!(machine.reg[7], 31);
        // The pushed return address is the already-incremented pc
        assert_eq!(machine.mem[31], 1);

        step(&mut machine);
        assert_eq!(machine.pc, 1);
        assert_eq!(machine.reg[7], 32);
    }

    #[test]
    fn test_jump_taken_and_not_taken() {
        let mut machine = make_machine();
        machine.reg[1] = 1;
        machine.reg[2] = 40;
        machine.mem[0] = 0x0152u16 as i16; // jump to r2 when r1
        step(&mut machine);
        assert_eq!(machine.pc, 40);

        let mut machine = make_machine();
        machine.reg[1] = 0;
        machine.reg[2] = 40;
        machine.mem[0] = 0x0152u16 as i16;
        step(&mut machine);
        assert_eq!(machine.pc, 1);
    }

    #[test]
    fn test_branch_is_pc_relative() {
        let mut machine = make_machine();
        machine.reg[1] = 1;
        machine.reg[2] = 10;
        machine.mem[0] = 0x0162u16 as i16; // branch by r2 when r1
        step(&mut machine);
        // Offset is added to the incremented pc
        assert_eq!(machine.pc, 11);
    }

    #[test]
    fn test_ldmem_and_stmem() {
        let mut machine = make_machine();
        machine.reg[1] = 100;
        machine.mem[100] = 77;
        machine.mem[0] = 0x0511u16 as i16; // ldmem r5 <- mem[r1]
        machine.mem[1] = 0x0521u16 as i16; // stmem mem[r5] <- r1
        step(&mut machine);
        assert_eq!(machine.reg[5], 77);
        step(&mut machine);
        assert_eq!(machine.mem[77], 100);
    }

    #[test]
    fn test_pc_wraps() {
        let mut machine = make_machine();
        machine.pc = 0xFFFF;
        step(&mut machine);
        assert_eq!(machine.pc, 0);
    }

    #[test]
    fn test_reserved_words_are_noops() {
        let mut machine = make_machine();
        machine.mem[0] = 0x0070u16 as i16;
        machine.mem[1] = 0x0080u16 as i16;
        step(&mut machine);
        step(&mut machine);
        assert_eq!(machine.pc, 2);
        assert!(machine.reg.iter().all(|&r| r == 0));
    }
}
