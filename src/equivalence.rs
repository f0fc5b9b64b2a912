//! Equivalence checking between the two models

use thiserror::Error;

use crate::cpu::MachineState;
use crate::cpu::MEM_SIZE;
use crate::cpu::NUM_REGS;

/// First architectural difference between the two models
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Divergence {
    #[error("pc is {reference} in the reference, {pipelined} in the pipeline")]
    Pc { reference: u16, pipelined: u16 },

    #[error("reg[{index}] is {reference} in the reference, {pipelined} in the pipeline")]
    Register { index: usize, reference: i16, pipelined: i16 },

    #[error("mem[{address}] is {reference} in the reference, {pipelined} in the pipeline")]
    Memory { address: usize, reference: i16, pipelined: i16 },
}

/// Compares pc, then registers in order, then memory in order.
/// Reports the first difference and looks no further.
pub fn compare(reference: &MachineState, pipelined: &MachineState) -> Result<(), Divergence> {
    if reference.pc != pipelined.pc {
        return Err(Divergence::Pc { reference: reference.pc, pipelined: pipelined.pc });
    }
    for index in 0..NUM_REGS {
        if reference.reg[index] != pipelined.reg[index] {
            return Err(Divergence::Register {
                index,
                reference: reference.reg[index],
                pipelined: pipelined.reg[index],
            });
        }
    }
    for address in 0..MEM_SIZE {
        if reference.mem[address] != pipelined.mem[address] {
            return Err(Divergence::Memory {
                address,
                reference: reference.mem[address],
                pipelined: pipelined.mem[address],
            });
        }
    }
    Ok(())
}

/// Counts every differing component; the convergence eval plots this
pub fn divergence_count(reference: &MachineState, pipelined: &MachineState) -> usize {
    let mut count = usize::from(reference.pc != pipelined.pc);
    count += (0..NUM_REGS).filter(|&i| reference.reg[i] != pipelined.reg[i]).count();
    count += (0..MEM_SIZE).filter(|&a| reference.mem[a] != pipelined.mem[a]).count();
    count
}
