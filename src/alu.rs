//! Shared ALU table
//!
//! One total function consumed by both the reference interpreter and the
//! execute stage of the pipeline, so the two models cannot drift apart.

use crate::instruction::Opcode;

/// Evaluates the ALU for one instruction.
///
/// `val_a`/`val_b`/`val_c` are the register-file reads of rnuma/rnumb/rnumc,
/// `data` is the 8-bit immediate and `val_p` the already-incremented pc.
/// All arithmetic wraps; division by zero yields 0.
pub fn eval(op: Opcode, val_a: i16, val_b: i16, val_c: i16, data: u16, val_p: u16) -> i16 {
    use Opcode::*;
    match op {
        Nop | Reserved7 | Reserved8 => 0,

        // Memory and stack opcodes compute their address arithmetic here
        Ldmem => val_a,
        Stmem => val_c,
        Call | Push => val_a.wrapping_sub(1),
        Return | Pop => val_a.wrapping_add(1),

        // Control transfers resolve the taken/not-taken pc
        Jump => {
            if val_c != 0 {
                val_a
            } else {
                val_p as i16
            }
        }
        Branch => {
            if val_c != 0 {
                val_a.wrapping_add(val_p as i16)
            } else {
                val_p as i16
            }
        }

        Not => !val_a,
        Neg => val_a.wrapping_neg(),
        Cnot => (val_a == 0) as i16,
        Popcount => (val_a as u16).count_ones() as i16,
        Bitrev => (val_a as u16).reverse_bits() as i16,

        Add => val_b.wrapping_add(val_a),
        Sub => val_b.wrapping_sub(val_a),
        Mul => val_b.wrapping_mul(val_a),
        Div => {
            if val_a == 0 {
                0
            } else {
                val_b.wrapping_div(val_a)
            }
        }
        Xor => val_b ^ val_a,
        And => val_b & val_a,
        Or => val_b | val_a,
        ShiftLeft => val_b.wrapping_shl((val_a & 0xF) as u32),
        ShiftRight => val_b >> (val_a & 0xF),
        LessThan => (val_b < val_a) as i16,
        LessEq => (val_b <= val_a) as i16,

        Cmove => {
            if val_b != 0 {
                val_a
            } else {
                val_c
            }
        }
        Cadd => {
            if val_b != 0 {
                val_a.wrapping_add(val_c)
            } else {
                val_c
            }
        }
        ImmLow => (val_c & !0xFF) | data as i16,
        ImmHigh => ((data << 8) | (val_c as u16 & 0x00FF)) as i16,
    }
}
