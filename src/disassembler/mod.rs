//! Bytecode disassembler and instruction decoding engine.
//!
//! This module turns the raw code bytes of a method into a linear list of typed
//! instructions. It covers the complete one-byte instruction set (0x00 through 0xc9)
//! through a static table that maps every opcode to a mnemonic and an operand rule.
//!
//! # Key Types
//! - [`Instruction`] - One decoded instruction: offset, opcode, mnemonic, operand
//! - [`Operand`] - Typed operand payloads, including the composite switch records
//! - [`OpcodeSpec`] / [`OperandRule`] - The table entries driving the decoder
//!
//! # Main Functions
//! - [`decode_instruction`] - Decode a single instruction
//! - [`decode_stream`] - Decode a complete code array in one forward pass
//!
//! # Example
//! ```rust
//! use cafescope::{disassembler::decode_stream, Parser};
//!
//! let code = [0x10, 0x2a, 0xac]; // bipush 42, ireturn
//! let mut parser = Parser::new(&code);
//! let instructions = decode_stream(&mut parser)?;
//! assert_eq!(instructions[0].mnemonic, "bipush");
//! assert_eq!(instructions[1].mnemonic, "ireturn");
//! # Ok::<(), cafescope::Error>(())
//! ```

mod decoder;
mod instruction;
mod opcodes;

pub use decoder::{decode_instruction, decode_stream};
pub use instruction::{ArrayType, Instruction, LookupSwitch, Operand, TableSwitch};
pub use opcodes::{OpcodeSpec, OperandRule, OPCODES};
