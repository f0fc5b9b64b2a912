//! Pipeline state

use crate::control;
use crate::instruction::Inst;

/// Pipeline state = 5 per-stage registers.
/// The all-default state is a pipe full of bubbles.
#[derive(Clone, Copy, Default)]
pub struct PipelineState {
    pub fetch: FetchRegister,
    pub decode: DecodeRegister,
    pub execute: ExecuteRegister,
    pub memory: MemoryRegister,
    pub write_back: WriteBackRegister,
}

impl PipelineState {
    /// Raw ALU hazard between the execute occupant (producer) and the
    /// decode occupant (consumer)
    pub fn alu_hazard(&self) -> bool {
        control::alu_hazard(&self.execute.inst, &self.decode.inst)
    }

    /// The rnuma read must be patched with the forwarded ALU result
    pub fn alu_hazard_a(&self) -> bool {
        control::alu_write_back(self.execute.inst.op)
            && control::alu_write_back(self.decode.inst.op)
            && self.decode.inst.rnuma == control::dest_field(&self.execute.inst)
    }

    /// The rnumb read must be patched with the forwarded ALU result
    pub fn alu_hazard_b(&self) -> bool {
        control::alu_write_back(self.execute.inst.op)
            && control::alu_write_back(self.decode.inst.op)
            && self.decode.inst.rnumb == control::dest_field(&self.execute.inst)
    }
}

/// Fetch register
#[derive(Clone, Copy, Default)]
pub struct FetchRegister {
    /// Next fetch address
    pub pc: u16,
}

/// Decode register
#[derive(Clone, Copy, Default)]
pub struct DecodeRegister {
    /// Resident instruction
    pub inst: Inst,

    /// pc of the following word, travels with the instruction
    pub val_p: u16,
}

/// Execute register
#[derive(Clone, Copy, Default)]
pub struct ExecuteRegister {
    /// Resident instruction
    pub inst: Inst,

    /// rnumc register read
    pub val_c: i16,
    /// rnumb register read
    pub val_b: i16,
    /// rnuma register read
    pub val_a: i16,

    pub val_p: u16,
}

/// Memory register
#[derive(Clone, Copy, Default)]
pub struct MemoryRegister {
    /// Resident instruction
    pub inst: Inst,

    /// ALU result
    pub alu_result: i16,

    pub val_c: i16,
    pub val_a: i16,
    pub val_p: u16,
}

/// Write-back register
#[derive(Clone, Copy, Default)]
pub struct WriteBackRegister {
    /// Resident instruction
    pub inst: Inst,

    /// ALU result
    pub alu_result: i16,
    /// Loaded memory value
    pub mem_value: i16,

    pub val_c: i16,
}
