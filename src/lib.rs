// Copyright 2026 The cafescope Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # cafescope
//!
//! A cross-platform framework for parsing and disassembling JVM class files.
//! Built in pure Rust, `cafescope` decodes the complete binary layout of a class
//! file - constant pool, declarations, attributes - and disassembles method
//! bytecode into typed instruction lists, without requiring a JVM.
//!
//! ## Features
//!
//! - **Complete structural decoding** - Header, constant pool, fields, methods and
//!   attributes, with unknown attributes preserved losslessly
//! - **Exhaustive disassembly** - Every defined one-byte opcode with typed operands,
//!   including the variable-length switch instructions
//! - **Descriptor grammars** - Recursive field and method type signatures parsed
//!   into value trees
//! - **On-demand resolution** - Constant-pool indices resolve lazily into class
//!   paths, member references and literals
//! - **Memory safe** - Bounds-checked reads everywhere; malformed input produces
//!   typed errors, never panics
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cafescope::prelude::*;
//! use std::path::Path;
//!
//! let class = JavaClass::from_file(Path::new("Example.class"))?;
//! println!("class {}", class.this_class.join("."));
//!
//! for method in &class.methods {
//!     println!("  {}{}", method.name, method.descriptor);
//!     for instruction in &method.instructions {
//!         println!("    {:>4}: {}", instruction.offset, instruction.mnemonic);
//!     }
//! }
//! # Ok::<(), cafescope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `cafescope` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`metadata`] - Class file structure, constant pool, attributes, resolution
//! - [`disassembler`] - Bytecode instruction decoding
//! - [`file`] - Input handling and the low-level byte cursor
//! - [`Error`] and [`Result`] - Error handling
//!
//! Data flows strictly upward: raw bytes are decoded into the structural
//! [`metadata::classfile::ClassFile`], whose attribute blobs are decoded by
//! [`metadata::attributes`], whose `Code` payloads are disassembled by
//! [`disassembler`], and [`metadata::class::JavaClass`] assembles the fully
//! resolved view on top. Constant-pool indices are the only cross-references;
//! [`metadata::resolver`] turns them into symbolic values on demand.
//!
//! ## Concurrency
//!
//! The crate is purely synchronous with no shared mutable state: every decode
//! takes an input buffer and returns an independent owned tree. Decoding many
//! class files from parallel threads is safe by construction.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Structural problems abort
//! the decode; per-method disassembly failures are contained in the assembled
//! method (see [`metadata::class::Method::code_error`]); unknown attributes and
//! access-flag bits are preserved rather than rejected.

#[macro_use]
pub(crate) mod error;

/// Input handling and low-level binary reading.
///
/// Provides the [`file::File`] input abstraction (memory-mapped or owned buffer)
/// and the [`Parser`] byte cursor that every decoder in this crate reads through.
pub mod file;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use cafescope::prelude::*;
///
/// let class = JavaClass::from_file("Example.class".as_ref())?;
/// println!("{} methods", class.methods.len());
/// # Ok::<(), cafescope::Error>(())
/// ```
pub mod prelude;

/// Bytecode disassembler covering the complete one-byte instruction set.
///
/// # Key Types
///
/// - [`disassembler::Instruction`] - A decoded instruction with typed operand
/// - [`disassembler::Operand`] - Operand payloads, from branch offsets to switch tables
/// - [`disassembler::OPCODES`] - The static opcode table
///
/// # Main Functions
///
/// - [`disassembler::decode_instruction`] - Decode a single instruction
/// - [`disassembler::decode_stream`] - Decode a complete code array
///
/// # Examples
///
/// ```rust
/// use cafescope::{disassembler::decode_stream, Parser};
///
/// let code = [0x00, 0xb1]; // nop, return
/// let mut parser = Parser::new(&code);
/// let instructions = decode_stream(&mut parser)?;
///
/// assert_eq!(instructions[0].mnemonic, "nop");
/// # Ok::<(), cafescope::Error>(())
/// ```
pub mod disassembler;

/// Class file structure, constant pool, attributes and reference resolution.
///
/// # Key Components
///
/// - [`metadata::class::JavaClass`] - Main entry point: the fully assembled view
/// - [`metadata::classfile::ClassFile`] - The raw structural decode
/// - [`metadata::pool::ConstantPool`] - The 1-indexed constant table
/// - [`metadata::attributes`] - Typed attribute decoding with lossless passthrough
/// - [`metadata::descriptor`] - Field and method type signature grammars
/// - [`metadata::resolver`] - Pool-index resolution into symbolic values
///
/// # Examples
///
/// ```rust,no_run
/// use cafescope::metadata::class::JavaClass;
///
/// let data = std::fs::read("Example.class")?;
/// let class = JavaClass::from_buffer(&data)?;
/// println!("class {}", class.this_class.join("."));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod metadata;

/// `cafescope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is
/// always [`Error`]. Used consistently throughout the crate for all fallible
/// operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `cafescope` Error type
///
/// The main error type for all operations in this crate. Provides detailed error
/// information for structural decoding, reference resolution and disassembly.
pub use error::Error;

/// Main entry point for working with class files.
///
/// See [`metadata::class::JavaClass`] for the fully assembled view.
pub use metadata::class::JavaClass;

/// Low-level cursor for reading big-endian class file data.
///
/// See [`file::parser::Parser`] for sequential bounds-checked reads.
pub use file::parser::Parser;

/// Input file abstraction over memory-mapped and in-memory buffers.
pub use file::File;
