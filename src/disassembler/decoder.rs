//! Bytecode instruction decoding.
//!
//! This module provides the core decoding engine that turns a method's raw code bytes
//! into structured [`crate::disassembler::Instruction`] values. Decoding is a single
//! forward pass: read the opcode byte at the current offset, look up its
//! [`crate::disassembler::OperandRule`] in the table, consume exactly the bytes the
//! rule requires, and emit the instruction. There is no second pass and no offset
//! rewriting.
//!
//! # Key Components
//!
//! - [`crate::disassembler::decoder::decode_instruction`] - Decode one instruction
//! - [`crate::disassembler::decoder::decode_stream`] - Decode a complete code array
//!
//! # Alignment
//!
//! The switch instructions align their operands to a 4-byte boundary measured from
//! the start of the code array. The parser handed to these functions must therefore
//! span exactly the code array, with position 0 at its first byte; a parser over a
//! larger enclosing buffer would make the alignment computation wrong.
//!
//! # Usage Examples
//!
//! ```rust
//! use cafescope::{disassembler::{decode_stream, Operand}, Parser};
//!
//! let code = [0x00, 0xb1]; // nop, return
//! let mut parser = Parser::new(&code);
//! let instructions = decode_stream(&mut parser)?;
//!
//! assert_eq!(instructions.len(), 2);
//! assert_eq!(instructions[0].offset, 0);
//! assert_eq!(instructions[1].offset, 1);
//! assert_eq!(instructions[1].mnemonic, "return");
//! # Ok::<(), cafescope::Error>(())
//! ```

use crate::{
    disassembler::{
        instruction::{ArrayType, Instruction, LookupSwitch, Operand, TableSwitch},
        opcodes::{OperandRule, OPCODES},
    },
    Error::{UnknownOpcode, WideUnsupported},
    Parser, Result,
};

fn read_pool_index_wide(parser: &mut Parser) -> Result<crate::metadata::index::PoolIndex> {
    Ok(parser.read_be::<u16>()?.into())
}

fn decode_operand(parser: &mut Parser, rule: OperandRule, offset: usize) -> Result<Operand> {
    match rule {
        OperandRule::None => Ok(Operand::None),
        OperandRule::LocalSlot => Ok(Operand::LocalIndex(u16::from(parser.read_be::<u8>()?))),
        OperandRule::ByteLiteral => Ok(Operand::IntLiteral(i64::from(parser.read_be::<u8>()?))),
        OperandRule::ShortLiteral => Ok(Operand::IntLiteral(i64::from(parser.read_be::<u16>()?))),
        OperandRule::ConstantPoolByte => Ok(Operand::ConstantRef(
            u16::from(parser.read_be::<u8>()?).into(),
        )),
        OperandRule::ConstantPoolWide => Ok(Operand::ConstantRef(read_pool_index_wide(parser)?)),
        OperandRule::FieldIndex => Ok(Operand::FieldRef(read_pool_index_wide(parser)?)),
        OperandRule::MethodIndex => Ok(Operand::MethodRef(read_pool_index_wide(parser)?)),
        OperandRule::TypeIndex => Ok(Operand::TypeIndex(read_pool_index_wide(parser)?)),
        OperandRule::InterfaceMethod => {
            let method = read_pool_index_wide(parser)?;
            let count = parser.read_be::<u8>()?;

            let reserved = parser.read_be::<u8>()?;
            if reserved != 0 {
                return Err(malformed_error!(
                    "invokeinterface at offset {} has nonzero reserved byte {}",
                    offset,
                    reserved
                ));
            }

            Ok(Operand::InvokeInterface { method, count })
        }
        OperandRule::CallSite => {
            let call_site = read_pool_index_wide(parser)?;

            for _ in 0..2 {
                let reserved = parser.read_be::<u8>()?;
                if reserved != 0 {
                    return Err(malformed_error!(
                        "invokedynamic at offset {} has nonzero reserved byte {}",
                        offset,
                        reserved
                    ));
                }
            }

            Ok(Operand::CallSiteRef(call_site))
        }
        OperandRule::Branch => Ok(Operand::Offset(i32::from(parser.read_be::<i16>()?))),
        OperandRule::BranchWide => Ok(Operand::Offset(parser.read_be::<i32>()?)),
        OperandRule::LocalIncrement => Ok(Operand::Iinc {
            local: u16::from(parser.read_be::<u8>()?),
            increment: parser.read_be::<i8>()?,
        }),
        OperandRule::NewArrayType => Ok(Operand::ArrayType(ArrayType::from_code(
            parser.read_be::<u8>()?,
        )?)),
        OperandRule::TableSwitch => {
            parser.align4()?;

            let default_offset = parser.read_be::<i32>()?;
            let low = parser.read_be::<i32>()?;
            let high = parser.read_be::<i32>()?;
            if high < low {
                return Err(malformed_error!(
                    "tableswitch at offset {} has high {} below low {}",
                    offset,
                    high,
                    low
                ));
            }

            // high - low + 1 jump offsets, one per key in the covered range
            let count = (i64::from(high) - i64::from(low) + 1) as usize;
            let mut offsets = Vec::with_capacity(count);
            for _ in 0..count {
                offsets.push(parser.read_be::<i32>()?);
            }

            Ok(Operand::TableSwitch(TableSwitch {
                default_offset,
                low,
                high,
                offsets,
            }))
        }
        OperandRule::LookupSwitch => {
            parser.align4()?;

            let default_offset = parser.read_be::<i32>()?;
            let npairs = parser.read_be::<u32>()?;

            let mut pairs = Vec::with_capacity(npairs as usize);
            for _ in 0..npairs {
                let key = parser.read_be::<i32>()?;
                let target = parser.read_be::<i32>()?;
                pairs.push((key, target));
            }

            Ok(Operand::LookupSwitch(LookupSwitch {
                default_offset,
                pairs,
            }))
        }
        OperandRule::MultiNewArray => Ok(Operand::MultiNewArray {
            type_index: read_pool_index_wide(parser)?,
            dimensions: parser.read_be::<u8>()?,
        }),
        OperandRule::Wide => Err(WideUnsupported(offset)),
    }
}

/// Decode a single instruction from the parser's current position.
///
/// Reads the opcode byte, looks up its operand rule, consumes exactly the bytes
/// that rule requires, and returns the typed instruction. Branch operands keep
/// their raw relative value; absolute targets are the caller's computation.
///
/// # Arguments
/// * `parser` - A parser over the method's code array, positioned at an opcode
///
/// # Errors
/// Returns [`crate::Error::UnknownOpcode`] for opcode bytes outside the defined
/// instruction set, [`crate::Error::WideUnsupported`] for the `wide` prefix,
/// [`crate::Error::UnknownArrayType`] for invalid `newarray` codes,
/// [`crate::Error::Malformed`] for nonzero reserved bytes, and
/// [`crate::Error::OutOfBounds`] if operand bytes are truncated.
///
/// # Examples
///
/// ```rust
/// use cafescope::{disassembler::{decode_instruction, Operand}, Parser};
///
/// let code = [0x10, 0x05]; // bipush 5
/// let mut parser = Parser::new(&code);
/// let instruction = decode_instruction(&mut parser)?;
///
/// assert_eq!(instruction.mnemonic, "bipush");
/// assert_eq!(instruction.operand, Operand::IntLiteral(5));
/// # Ok::<(), cafescope::Error>(())
/// ```
pub fn decode_instruction(parser: &mut Parser) -> Result<Instruction> {
    let offset = parser.pos();
    let opcode = parser.read_be::<u8>()?;

    let spec = &OPCODES[usize::from(opcode)];
    if !spec.is_defined() {
        return Err(UnknownOpcode { opcode, offset });
    }

    let operand = decode_operand(parser, spec.rule, offset)?;

    Ok(Instruction {
        offset,
        opcode,
        mnemonic: spec.mnemonic,
        operand,
    })
}

/// Decode a complete code array into a linear instruction list.
///
/// Performs exactly one forward pass from the parser's current position to the end
/// of its buffer. Offsets in the result are strictly increasing and unique.
///
/// # Arguments
/// * `parser` - A parser spanning exactly the method's code array
///
/// # Errors
/// Propagates the first error from [`decode_instruction`]; a failed decode aborts
/// the remaining stream, since continuing would desynchronize all later offsets.
pub fn decode_stream(parser: &mut Parser) -> Result<Vec<Instruction>> {
    let mut instructions = Vec::new();

    while parser.has_more_data() {
        instructions.push(decode_instruction(parser)?);
    }

    Ok(instructions)
}
