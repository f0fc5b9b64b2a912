//! Instruction representation
//!
//! A word is `fn:4 | rnumc:4 | rnumb:4 | rnuma:4`. The top nibble selects
//! the ALU family; when it is zero the rnumb nibble sub-keys the opcode.
//! Decoding is total, so there is no invalid-instruction error path.

/// All-zero word; decodes as a plain noop and doubles as the bubble filler
pub(crate) const NOP_WORD: u16 = 0x0000;

/// Decoded instruction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inst {
    /// Raw 16-bit word
    pub word: u16,
    /// Effective opcode
    pub op: Opcode,
    /// Result register field
    pub rnumc: u16,
    /// Second operand register field; sub-opcode when the top nibble is 0
    pub rnumb: u16,
    /// First operand register field
    pub rnuma: u16,
    /// 8-bit immediate, the rnumb:rnuma byte
    pub data: u16,
}

impl Inst {
    pub fn decode(word: u16) -> Self {
        let funct = (word >> 12) & 0xF;
        let rnumb = (word >> 4) & 0xF;
        Self {
            word,
            op: Opcode::from_fields(funct, rnumb),
            rnumc: (word >> 8) & 0xF,
            rnumb,
            rnuma: word & 0xF,
            data: word & 0x00FF,
        }
    }
}

impl Default for Inst {
    fn default() -> Self {
        Self::decode(NOP_WORD)
    }
}

/// The 31 effective opcodes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Opcode {
    // fn = 0, keyed on rnumb
    #[default]
    Nop,
    Ldmem,
    Stmem,
    Call,
    Return,
    Jump,
    Branch,
    Reserved7,
    Reserved8,
    Not,
    Neg,
    Cnot,
    Popcount,
    Bitrev,
    Pop,
    Push,
    // fn = 1..=15
    Add,
    Sub,
    Mul,
    Div,
    Xor,
    And,
    Or,
    ShiftLeft,
    ShiftRight,
    LessThan,
    LessEq,
    Cmove,
    Cadd,
    ImmLow,
    ImmHigh,
}

impl Opcode {
    pub fn from_fields(funct: u16, rnumb: u16) -> Self {
        use Opcode::*;
        match funct & 0xF {
            0 => match rnumb & 0xF {
                0 => Nop,
                1 => Ldmem,
                2 => Stmem,
                3 => Call,
                4 => Return,
                5 => Jump,
                6 => Branch,
                7 => Reserved7,
                8 => Reserved8,
                9 => Not,
                10 => Neg,
                11 => Cnot,
                12 => Popcount,
                13 => Bitrev,
                14 => Pop,
                15 => Push,
                _ => unreachable!(),
            },
            1 => Add,
            2 => Sub,
            3 => Mul,
            4 => Div,
            5 => Xor,
            6 => And,
            7 => Or,
            8 => ShiftLeft,
            9 => ShiftRight,
            10 => LessThan,
            11 => LessEq,
            12 => Cmove,
            13 => Cadd,
            14 => ImmLow,
            15 => ImmHigh,
            _ => unreachable!(),
        }
    }

    /// Assembly-style name, for traces and divergence reports
    pub fn mnemonic(&self) -> &'static str {
        use Opcode::*;
        match self {
            Nop => "noop",
            Ldmem => "ldmem",
            Stmem => "stmem",
            Call => "call",
            Return => "return",
            Jump => "jump",
            Branch => "branch",
            Reserved7 => "reserved7",
            Reserved8 => "reserved8",
            Not => "not",
            Neg => "neg",
            Cnot => "cnot",
            Popcount => "popcount",
            Bitrev => "bitrev",
            Pop => "pop",
            Push => "push",
            Add => "add",
            Sub => "sub",
            Mul => "mul",
            Div => "div",
            Xor => "xor",
            And => "and",
            Or => "or",
            ShiftLeft => "sleft",
            ShiftRight => "sright",
            LessThan => "lt",
            LessEq => "lteq",
            Cmove => "cmove",
            Cadd => "cadd",
            ImmLow => "immlow",
            ImmHigh => "immhigh",
        }
    }
}
