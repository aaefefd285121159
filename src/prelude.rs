//! # cafescope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! traits from the cafescope library. Import this module to get quick access to
//! the essential types for class file analysis.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all cafescope operations
pub use crate::Error;

/// The result type used throughout cafescope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Main entry point for class file analysis
pub use crate::metadata::class::{Field, JavaClass, Method};

/// Low-level file and parsing utilities
pub use crate::{File, Parser};

// ================================================================================================
// Metadata System
// ================================================================================================

/// Constant pool access and entries
pub use crate::metadata::pool::{ConstantPool, ConstantPoolEntry};

/// The 1-based constant pool index
pub use crate::metadata::index::PoolIndex;

/// Access flag sets
pub use crate::metadata::access::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags};

/// Decoded attributes
pub use crate::metadata::attributes::{
    Attribute, CodeAttribute, ExceptionTableEntry, LocalVariable,
};

/// Descriptor grammars and their value trees
pub use crate::metadata::descriptor::{
    parse_field_descriptor, parse_method_descriptor, BaseType, FieldType, MethodType,
};

/// Reference resolution into symbolic values
pub use crate::metadata::resolver::{
    resolve_class_path, resolve_constant, resolve_field_ref, resolve_method_ref,
    resolve_name_and_type, resolve_utf8, ConstantValue, MemberDescriptor, MemberRef, NameAndType,
};

// ================================================================================================
// Disassembler
// ================================================================================================

/// Instruction decoding and the opcode table
pub use crate::disassembler::{
    decode_instruction, decode_stream, ArrayType, Instruction, LookupSwitch, Operand, OperandRule,
    TableSwitch, OPCODES,
};
