//! 5 stages of the pipelined model

use super::pipeline::PipelineState;
use crate::alu;
use crate::control;
use crate::control::AddressSource;
use crate::control::MemoryAccess;
use crate::control::PcSource;
use crate::control::StoreSource;
use crate::cpu::MachineState;
use crate::instruction::Inst;

/// Fetch stage.
/// Selects the fetch pc off the write-back occupant, reads one word and
/// advances the pc; a reserved7 word in decode injects a bubble instead.
pub fn fetch(
    machine: &mut MachineState,
    current_state: &PipelineState,
    next_state: &mut PipelineState,
) {
    let w = &current_state.write_back;
    let selected = match control::pc_source(w.inst.op) {
        PcSource::Sequential => current_state.fetch.pc,
        PcSource::AluResult => w.alu_result as u16,
        PcSource::MemValue => w.mem_value as u16,
        PcSource::ValC => w.val_c as u16,
    };

    if control::bubble_insert(current_state.decode.inst.op) {
        // No fetch and no pc advance this cycle; a redirect still lands
        next_state.decode.inst = Inst::default();
        next_state.decode.val_p = selected;
        next_state.fetch.pc = selected;
        machine.pc = selected;
        machine.update_bubble_count(1);
        if machine.policy.verbose {
            eprintln!("[VERBOSE] Inserting bubble; pc held at {}", selected);
        }
        return;
    }

    let word = machine.mem[selected as usize] as u16;
    let next_pc = selected.wrapping_add(1);
    next_state.decode.inst = Inst::decode(word);
    next_state.decode.val_p = next_pc;
    next_state.fetch.pc = next_pc;
    machine.pc = next_pc;
}

/// Decode stage.
/// Reads the register file; on a reported hazard the matching operand is
/// patched with the ALU result execute computed this cycle. valC is never
/// patched.
pub fn decode(
    machine: &MachineState,
    current_state: &PipelineState,
    next_state: &mut PipelineState,
    bypass: Option<i16>,
) {
    let inst = current_state.decode.inst;

    let val_a = match bypass {
        Some(value) if current_state.alu_hazard_a() => value,
        _ => machine.reg[inst.rnuma as usize],
    };
    let val_b = match bypass {
        Some(value) if current_state.alu_hazard_b() => value,
        _ => machine.reg[inst.rnumb as usize],
    };
    let val_c = machine.reg[inst.rnumc as usize];

    next_state.execute.inst = inst;
    next_state.execute.val_a = val_a;
    next_state.execute.val_b = val_b;
    next_state.execute.val_c = val_c;
    next_state.execute.val_p = current_state.decode.val_p;
}

/// Execute stage.
/// Returns the ALU result so the caller can hand it to decode for
/// forwarding.
pub fn execute(current_state: &PipelineState, next_state: &mut PipelineState) -> i16 {
    let e = &current_state.execute;
    let alu_result = alu::eval(e.inst.op, e.val_a, e.val_b, e.val_c, e.inst.data, e.val_p);

    next_state.memory.inst = e.inst;
    next_state.memory.alu_result = alu_result;
    next_state.memory.val_c = e.val_c;
    next_state.memory.val_a = e.val_a;
    next_state.memory.val_p = e.val_p;
    alu_result
}

/// Memory stage
pub fn memory_access(
    machine: &mut MachineState,
    current_state: &PipelineState,
    next_state: &mut PipelineState,
) {
    let m = &current_state.memory;
    let address = match control::address_source(m.inst.op) {
        AddressSource::AluResult => m.alu_result as u16,
        AddressSource::ValA => m.val_a as u16,
    };

    let mut mem_value = 0;
    match control::memory_access(m.inst.op) {
        MemoryAccess::Read => mem_value = machine.mem[address as usize],
        MemoryAccess::Write => {
            machine.mem[address as usize] = match control::store_source(m.inst.op) {
                StoreSource::ValA => m.val_a,
                StoreSource::ValC => m.val_c,
                StoreSource::ValP => m.val_p as i16,
            };
        }
        MemoryAccess::None => {}
    }

    next_state.write_back.inst = m.inst;
    next_state.write_back.alu_result = m.alu_result;
    next_state.write_back.mem_value = mem_value;
    next_state.write_back.val_c = m.val_c;
}

/// Write-back stage.
/// Memory write-back lands first, then the ALU result, so a pop with
/// rnumc == rnuma is left holding the updated pointer.
pub fn write_back(machine: &mut MachineState, current_state: &PipelineState) {
    let w = &current_state.write_back;
    if control::memory_write_back(w.inst.op) {
        machine.reg[w.inst.rnumc as usize] = w.mem_value;
    }
    if control::alu_write_back(w.inst.op) {
        machine.reg[control::dest_field(&w.inst) as usize] = w.alu_result;
    }
}
