//! The equivalence harness
//!
//! Seeds two machines from one image, runs the reference for n instruction
//! steps and the pipeline for p clock cycles, then compares the final
//! architectural states.

use crate::cpu::MachineState;
use crate::cpu::SimPolicy;
use crate::equivalence;
use crate::error::SimulatorResult;
use crate::loader;
use crate::loader::MemoryImage;
use crate::pipelined;
use crate::reference;

/// Outcome of an equivalence run
pub struct RunReport {
    /// Reference machine after its steps
    pub reference: MachineState,
    /// Pipelined machine after its cycles
    pub pipelined: MachineState,
    /// Reference instruction steps executed
    pub steps: u64,
    /// Pipeline clock cycles executed
    pub cycles: u64,
    /// Bubbles the pipeline injected
    pub bubbles: u64,
}

/// Runs both models over an image file and checks equivalence
pub fn run(
    image_path: &str,
    steps: u64,
    cycles: u64,
    policy: SimPolicy,
) -> SimulatorResult<RunReport> {
    let image = loader::load_image(image_path)?;
    run_loaded(&image, steps, cycles, policy)
}

/// Runs both models over a parsed image and checks equivalence
pub fn run_loaded(
    image: &MemoryImage,
    steps: u64,
    cycles: u64,
    policy: SimPolicy,
) -> SimulatorResult<RunReport> {
    let mut ref_machine = MachineState::make(policy);
    image.apply(&mut ref_machine);
    let mut pipe_machine = ref_machine.clone();

    reference::run(&mut ref_machine, steps);
    pipelined::run(&mut pipe_machine, cycles);

    if policy.verbose {
        ref_machine.dump("Reference");
        pipe_machine.dump("Pipeline");
    }
    if policy.history {
        eprintln!("[HISTORY] # reference steps = {}", ref_machine.history.step_count);
        eprintln!("[HISTORY] # pipeline cycles = {}", pipe_machine.history.cycle_count);
        eprintln!("[HISTORY] # bubbles injected = {}", pipe_machine.history.bubble_count);
    }

    equivalence::compare(&ref_machine, &pipe_machine)?;

    Ok(RunReport {
        steps: ref_machine.history.step_count,
        cycles: pipe_machine.history.cycle_count,
        bubbles: pipe_machine.history.bubble_count,
        reference: ref_machine,
        pipelined: pipe_machine,
    })
}
