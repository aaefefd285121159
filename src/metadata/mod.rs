//! Class file metadata: structure, constant pool, attributes and resolution.
//!
//! This module contains every layer between raw bytes and the assembled class view:
//!
//! - [`classfile`] - The fixed top-level layout (header, members, raw attributes)
//! - [`pool`] - The tagged constant pool with its two-slot long/double rule
//! - [`index`] - The 1-based [`index::PoolIndex`] used for all cross-references
//! - [`access`] - Class/field/method access flag sets
//! - [`attributes`] - Typed attribute decoding with lossless unknown passthrough
//! - [`descriptor`] - Field and method type signature grammars
//! - [`resolver`] - Pool-index resolution into symbolic values
//! - [`class`] - [`class::JavaClass`], the fully assembled entry point

pub mod access;
pub mod attributes;
pub mod class;
pub mod classfile;
pub mod descriptor;
pub mod index;
pub mod pool;
pub mod resolver;
