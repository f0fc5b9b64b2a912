pub mod alu;
pub mod control;
pub mod cpu;
pub mod instruction;
pub mod loader;
pub mod run_wrapper;

pub mod equivalence;

pub mod pipelined;
pub mod reference;

pub mod error;
