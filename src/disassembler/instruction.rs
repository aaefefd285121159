use strum::{Display, EnumString};

use crate::{metadata::index::PoolIndex, Error::UnknownArrayType, Result};

/// Primitive element types of the `newarray` instruction.
///
/// The instruction's one-byte operand selects the element type through a fixed
/// code table; codes outside the table are a decode error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ArrayType {
    /// Code 4
    Boolean,
    /// Code 5
    Char,
    /// Code 6
    Float,
    /// Code 7
    Double,
    /// Code 8
    Byte,
    /// Code 9
    Short,
    /// Code 10
    Int,
    /// Code 11
    Long,
}

impl ArrayType {
    /// Map a `newarray` type code to its element type.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownArrayType`] for codes outside 4..=11.
    pub fn from_code(code: u8) -> Result<ArrayType> {
        match code {
            4 => Ok(ArrayType::Boolean),
            5 => Ok(ArrayType::Char),
            6 => Ok(ArrayType::Float),
            7 => Ok(ArrayType::Double),
            8 => Ok(ArrayType::Byte),
            9 => Ok(ArrayType::Short),
            10 => Ok(ArrayType::Int),
            11 => Ok(ArrayType::Long),
            _ => Err(UnknownArrayType(code)),
        }
    }
}

/// Decoded operand fields of a `tableswitch` instruction.
///
/// All offsets are relative to the instruction's own byte offset; the jump table
/// covers the contiguous key range `low..=high` in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSwitch {
    /// Branch offset taken when the key is outside `low..=high`
    pub default_offset: i32,
    /// Smallest key covered by the jump table
    pub low: i32,
    /// Largest key covered by the jump table
    pub high: i32,
    /// One branch offset per key, `high - low + 1` entries
    pub offsets: Vec<i32>,
}

/// Decoded operand fields of a `lookupswitch` instruction.
///
/// Pairs are kept in input order; the decoder does not require or enforce
/// sortedness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSwitch {
    /// Branch offset taken when no key matches
    pub default_offset: i32,
    /// `(match, offset)` pairs in input order
    pub pairs: Vec<(i32, i32)>,
}

/// The operand payload of one decoded instruction.
///
/// Every instruction carries zero or one payload; multi-field instructions
/// (`iinc`, `invokeinterface`, the switches, `multianewarray`) use the composite
/// variants. Branch offsets are stored exactly as encoded - relative to the
/// owning instruction's byte offset - and never converted to absolute targets;
/// that computation (`instruction.offset + offset`) belongs to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// No operand bytes
    None,
    /// A branch offset, relative to the instruction's own offset
    Offset(i32),
    /// An index into the method's local variable array
    LocalIndex(u16),
    /// A pool index expected to resolve to a class reference
    TypeIndex(PoolIndex),
    /// An immediate integer literal
    IntLiteral(i64),
    /// A pool index expected to resolve to a field reference
    FieldRef(PoolIndex),
    /// A pool index expected to resolve to a method reference
    MethodRef(PoolIndex),
    /// A pool index expected to resolve to a dynamic call site
    CallSiteRef(PoolIndex),
    /// A pool index expected to resolve to a loadable constant
    ConstantRef(PoolIndex),
    /// The element type of a `newarray` instruction
    ArrayType(ArrayType),
    /// `iinc`: local slot plus signed increment
    Iinc {
        /// Index of the local variable to increment
        local: u16,
        /// Signed amount to add
        increment: i8,
    },
    /// `invokeinterface`: method reference plus argument count
    InvokeInterface {
        /// Pool index of the interface method reference
        method: PoolIndex,
        /// Argument slot count, including the receiver
        count: u8,
    },
    /// `tableswitch` jump table
    TableSwitch(TableSwitch),
    /// `lookupswitch` match pairs
    LookupSwitch(LookupSwitch),
    /// `multianewarray`: component class plus dimension count
    MultiNewArray {
        /// Pool index of the array class reference
        type_index: PoolIndex,
        /// Number of dimensions to allocate
        dimensions: u8,
    },
}

/// One decoded bytecode instruction.
///
/// Offsets are byte offsets within the owning method's code array; they are
/// unique, strictly increasing, and assigned once during the forward scan -
/// never re-computed or mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Byte offset of the opcode within the code array
    pub offset: usize,
    /// The raw opcode byte
    pub opcode: u8,
    /// The opcode's mnemonic, usable as a documentation lookup key
    pub mnemonic: &'static str,
    /// The decoded operand payload, [`Operand::None`] for bare opcodes
    pub operand: Operand,
}

impl Instruction {
    /// Absolute branch target for offset-carrying operands.
    ///
    /// Returns `None` for instructions whose operand is not a relative offset.
    /// The addition may produce a target outside the method's code array for
    /// malformed input; callers are expected to bounds-check against their code
    /// length.
    #[must_use]
    pub fn branch_target(&self) -> Option<i64> {
        match &self.operand {
            Operand::Offset(offset) => Some(self.offset as i64 + i64::from(*offset)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_type_codes() {
        assert_eq!(ArrayType::from_code(4).unwrap(), ArrayType::Boolean);
        assert_eq!(ArrayType::from_code(11).unwrap(), ArrayType::Long);
        assert!(matches!(ArrayType::from_code(3), Err(UnknownArrayType(3))));
        assert!(matches!(
            ArrayType::from_code(12),
            Err(UnknownArrayType(12))
        ));
    }

    #[test]
    fn array_type_names() {
        assert_eq!(ArrayType::Int.to_string(), "int");
        assert_eq!(ArrayType::Boolean.to_string(), "boolean");
    }

    #[test]
    fn branch_target_is_callers_computation() {
        let instruction = Instruction {
            offset: 5,
            opcode: 0x99,
            mnemonic: "ifeq",
            operand: Operand::Offset(-3),
        };

        assert_eq!(instruction.branch_target(), Some(2));
    }

    #[test]
    fn branch_target_none_for_other_operands() {
        let instruction = Instruction {
            offset: 0,
            opcode: 0x10,
            mnemonic: "bipush",
            operand: Operand::IntLiteral(5),
        };

        assert_eq!(instruction.branch_target(), None);
    }
}
