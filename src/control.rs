//! Control signal tables
//!
//! Stateless functions keyed by opcode. Both models derive every side effect
//! (memory traffic, write-backs, pc redirects) from these tables.

use crate::instruction::Inst;
use crate::instruction::Opcode;

/// Where the next fetch pc comes from, driven by the write-back occupant
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum PcSource {
    #[default]
    Sequential,
    AluResult,
    MemValue,
    ValC,
}

/// Memory traffic for the memory stage
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum MemoryAccess {
    #[default]
    None,
    Read,
    Write,
}

/// Which value addresses memory
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum AddressSource {
    #[default]
    AluResult,
    ValA,
}

/// Which value a memory write stores
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum StoreSource {
    #[default]
    ValA,
    ValC,
    ValP,
}

/// Which register field names the ALU write-back destination
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum DestRegister {
    #[default]
    RnumC,
    RnumA,
}

pub fn pc_source(op: Opcode) -> PcSource {
    use Opcode::*;
    match op {
        Call => PcSource::ValC,
        Return => PcSource::MemValue,
        Jump | Branch => PcSource::AluResult,
        _ => PcSource::Sequential,
    }
}

pub fn memory_access(op: Opcode) -> MemoryAccess {
    use Opcode::*;
    match op {
        Ldmem | Return | Pop => MemoryAccess::Read,
        Stmem | Call | Push => MemoryAccess::Write,
        _ => MemoryAccess::None,
    }
}

pub fn address_source(op: Opcode) -> AddressSource {
    use Opcode::*;
    match op {
        Return | Pop => AddressSource::ValA,
        _ => AddressSource::AluResult,
    }
}

pub fn store_source(op: Opcode) -> StoreSource {
    use Opcode::*;
    match op {
        Push => StoreSource::ValC,
        Call => StoreSource::ValP,
        _ => StoreSource::ValA,
    }
}

/// call/return/pop/push write their updated stack pointer back through rnuma
pub fn dest_register(op: Opcode) -> DestRegister {
    use Opcode::*;
    match op {
        Call | Return | Pop | Push => DestRegister::RnumA,
        _ => DestRegister::RnumC,
    }
}

/// True when the ALU result is committed to the register file.
/// Note call/return/pop/push are enabled (stack pointer update) while
/// ldmem is not (its write-back is the loaded value, not the address).
pub fn alu_write_back(op: Opcode) -> bool {
    use Opcode::*;
    !matches!(op, Nop | Ldmem | Stmem | Jump | Branch | Reserved7 | Reserved8)
}

/// True when the loaded memory value is committed, always through rnumc.
/// pop enables both write-backs: memory value to rnumc, pointer to rnuma.
pub fn memory_write_back(op: Opcode) -> bool {
    use Opcode::*;
    matches!(op, Ldmem | Pop)
}

/// A reserved7 word in decode makes the fetch stage insert one bubble
pub fn bubble_insert(op: Opcode) -> bool {
    op == Opcode::Reserved7
}

/// The register the write-back stage will update with the ALU result
pub fn dest_field(inst: &Inst) -> u16 {
    match dest_register(inst.op) {
        DestRegister::RnumA => inst.rnuma,
        DestRegister::RnumC => inst.rnumc,
    }
}

/// Raw read-after-write hazard between the execute occupant (producer) and
/// the decode occupant (consumer).
///
/// The field comparison is raw: a fn=0 consumer's rnumb is a sub-opcode, so
/// a match there is a spurious positive, and the forwarded operand is simply
/// unused. The caller decides what to do with the report.
pub fn alu_hazard(producer: &Inst, consumer: &Inst) -> bool {
    alu_write_back(producer.op)
        && alu_write_back(consumer.op)
        && (consumer.rnuma == dest_field(producer) || consumer.rnumb == dest_field(producer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Inst;
    use crate::instruction::Opcode::*;

    #[test]
    fn test_pc_source_per_opcode() {
        assert_eq!(pc_source(Call), PcSource::ValC);
        assert_eq!(pc_source(Return), PcSource::MemValue);
        assert_eq!(pc_source(Jump), PcSource::AluResult);
        assert_eq!(pc_source(Branch), PcSource::AluResult);
        assert_eq!(pc_source(Add), PcSource::Sequential);
        assert_eq!(pc_source(Nop), PcSource::Sequential);
    }

    #[test]
    fn test_memory_traffic() {
        for op in [Ldmem, Return, Pop] {
            assert_eq!(memory_access(op), MemoryAccess::Read);
        }
        for op in [Stmem, Call, Push] {
            assert_eq!(memory_access(op), MemoryAccess::Write);
        }
        for op in [Nop, Add, Jump, ImmLow, Reserved7] {
            assert_eq!(memory_access(op), MemoryAccess::None);
        }
    }

    #[test]
    fn test_address_and_store_sources() {
        assert_eq!(address_source(Return), AddressSource::ValA);
        assert_eq!(address_source(Pop), AddressSource::ValA);
        assert_eq!(address_source(Ldmem), AddressSource::AluResult);
        assert_eq!(address_source(Push), AddressSource::AluResult);

        assert_eq!(store_source(Stmem), StoreSource::ValA);
        assert_eq!(store_source(Push), StoreSource::ValC);
        assert_eq!(store_source(Call), StoreSource::ValP);
    }

    #[test]
    fn test_write_back_enables() {
        for op in [Nop, Ldmem, Stmem, Jump, Branch, Reserved7, Reserved8] {
            assert!(!alu_write_back(op));
        }
        for op in [Call, Return, Pop, Push, Add, Div, Cmove, ImmHigh] {
            assert!(alu_write_back(op));
        }
        assert!(memory_write_back(Ldmem));
        assert!(memory_write_back(Pop));
        assert!(!memory_write_back(Return));
        assert!(!memory_write_back(Add));
    }

    #[test]
    fn test_dest_register_selector() {
        for op in [Call, Return, Pop, Push] {
            assert_eq!(dest_register(op), DestRegister::RnumA);
        }
        for op in [Add, ImmLow, Ldmem, Cmove] {
            assert_eq!(dest_register(op), DestRegister::RnumC);
        }
    }

    #[test]
    fn test_hazard_on_matching_operand() {
        // add r5, r1, r2 in execute; add r6, r5, r3 in decode reads r5
        let producer = Inst::decode(0x1512);
        let consumer = Inst::decode(0x1653);
        assert!(alu_hazard(&producer, &consumer));

        // Same consumer reading via rnuma
        let consumer = Inst::decode(0x1635);
        assert!(alu_hazard(&producer, &consumer));

        // Consumer reads other registers
        let consumer = Inst::decode(0x1643);
        assert!(!alu_hazard(&producer, &consumer));
    }

    #[test]
    fn test_hazard_requires_both_enables() {
        // stmem never writes a register, so it cannot produce
        let producer = Inst::decode(0x0521);
        let consumer = Inst::decode(0x1655);
        assert_eq!(producer.op, Stmem);
        assert!(!alu_hazard(&producer, &consumer));

        // jump reads registers but has no ALU write-back, so it cannot consume
        let producer = Inst::decode(0x1512);
        let consumer = Inst::decode(0x0155);
        assert_eq!(consumer.op, Jump);
        assert!(!alu_hazard(&producer, &consumer));
    }

    #[test]
    fn test_hazard_stack_dest_resolves_via_rnuma() {
        // push r3 with pointer r7 writes r7, not r3
        let producer = Inst::decode(0x03F7);
        assert_eq!(producer.op, Push);
        let consumer = Inst::decode(0x1657);
        assert!(alu_hazard(&producer, &consumer));
        let consumer = Inst::decode(0x1653);
        assert!(!alu_hazard(&producer, &consumer));

        // pop r4 with pointer r7: same destination rule
        let producer = Inst::decode(0x04E7);
        assert_eq!(producer.op, Pop);
        let consumer = Inst::decode(0x1657);
        assert!(alu_hazard(&producer, &consumer));
    }
}
