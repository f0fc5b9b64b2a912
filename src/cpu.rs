//! Architectural machine state shared by both models

/// Words of addressable memory
pub const MEM_SIZE: usize = 1 << 16;
/// General purpose register count
pub const NUM_REGS: usize = 16;

/// Cells shown by the debug dump
const DUMP_WINDOW: usize = 48;

/// One machine: pc, register file, word-addressed memory.
/// The harness owns two of these and never shares them.
#[derive(Clone)]
pub struct MachineState {
    /// Program counter
    pub pc: u16,
    /// General purpose registers
    pub reg: [i16; NUM_REGS],
    /// Word-addressed memory, zeroed at reset
    pub mem: Box<[i16; MEM_SIZE]>,

    /// Simulation policy
    pub policy: SimPolicy,
    /// Run counters
    pub history: History,
}

impl MachineState {
    pub fn make(policy: SimPolicy) -> Self {
        Self {
            pc: 0,
            reg: [0; NUM_REGS],
            mem: Box::new([0; MEM_SIZE]),
            policy,
            history: History::default(),
        }
    }

    /// Increments history step count (reference model)
    pub fn update_step_count(&mut self, value: u64) {
        self.history.step_count += value;
    }

    /// Increments history cycle count (pipelined model)
    pub fn update_cycle_count(&mut self, value: u64) {
        self.history.cycle_count += value;
    }

    /// Increments history bubble count
    pub fn update_bubble_count(&mut self, value: u64) {
        self.history.bubble_count += value;
    }

    /// Dumps registers and the low memory window to stderr
    pub fn dump(&self, label: &str) {
        eprintln!("[VERBOSE] {} state: pc = {}", label, self.pc);
        for base in (0..NUM_REGS).step_by(4) {
            let cells: Vec<String> = (base..base + 4)
                .map(|i| format!("reg[{:2}] = {:6}", i, self.reg[i]))
                .collect();
            eprintln!("[VERBOSE]   {}", cells.join("  "));
        }
        for base in (0..DUMP_WINDOW).step_by(8) {
            let cells: Vec<String> =
                self.mem[base..base + 8].iter().map(|v| format!("{:6}", v)).collect();
            eprintln!("[VERBOSE]   mem[{:2}..{:2}] = {}", base, base + 8, cells.join(" "));
        }
    }
}

/// Simulation policy
#[derive(Clone, Copy, Default)]
pub struct SimPolicy {
    pub verbose: bool,
    pub history: bool,
}

/// Run counters
#[derive(Clone, Copy, Default)]
pub struct History {
    pub step_count: u64,
    pub cycle_count: u64,
    pub bubble_count: u64,
}
