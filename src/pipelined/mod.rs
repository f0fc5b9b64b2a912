//! Pipelined model
//!
//! One call to `step` is one clock: every stage evaluates against the
//! current pipeline registers and fills the next ones, which then swap in
//! atomically. Stages run write_back first and fetch last, which gives
//! write-before-read register file semantics and lets decode pick up the
//! ALU result execute produced in the same cycle.

use crate::cpu::MachineState;
use crate::pipelined::pipeline::PipelineState;

pub mod pipeline;
pub mod stages;

/// Advances the pipeline by one clock cycle
pub fn step(machine: &mut MachineState, state: &mut PipelineState) {
    let mut next_state = PipelineState::default();

    if machine.policy.verbose {
        eprintln!(
            "[VERBOSE] Cycle {}: decode holds {}; pc = {}",
            machine.history.cycle_count,
            state.decode.inst.op.mnemonic(),
            machine.pc,
        );
    }
    machine.update_cycle_count(1);

    stages::write_back(machine, state);
    stages::memory_access(machine, state, &mut next_state);
    let alu_result = stages::execute(state, &mut next_state);

    // The hazard unit only reports; the forwarding decision is wired here
    let bypass = if state.alu_hazard() { Some(alu_result) } else { None };
    stages::decode(machine, state, &mut next_state, bypass);
    stages::fetch(machine, state, &mut next_state);

    *state = next_state;
}

/// Runs the pipeline for the given number of clock cycles
pub fn run(machine: &mut MachineState, cycles: u64) {
    let mut state = PipelineState::default();
    for _ in 0..cycles {
        step(machine, &mut state);
    }
}
