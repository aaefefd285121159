//! Constant pool decoding and access.
//!
//! The constant pool is the 1-indexed table of literals and symbolic references that
//! every other structure in a class file points into. This module decodes the tagged
//! entry stream into [`crate::metadata::pool::ConstantPoolEntry`] values and wraps
//! them in a [`crate::metadata::pool::ConstantPool`] that enforces the 1-based
//! indexing rule.
//!
//! # The two-slot rule
//!
//! `long` and `double` entries occupy two consecutive pool slots. The decoder mirrors
//! this by injecting exactly one phantom [`ConstantPoolEntry::Unknown`] placeholder
//! after each such entry, without consuming any input, and advancing the logical entry
//! counter by one extra step. Preserving this exactly is load-bearing: dropping the
//! phantom shifts every subsequent index and silently corrupts all later resolution.
//!
//! # Usage Examples
//!
//! ```rust
//! use cafescope::{metadata::pool::{ConstantPool, ConstantPoolEntry}, Parser};
//!
//! // count = 2 -> one entry: a Utf8 "Hi"
//! let data = [0x01, 0x00, 0x02, b'H', b'i'];
//! let mut parser = Parser::new(&data);
//! let pool = ConstantPool::parse(&mut parser, 2)?;
//!
//! match pool.get(1.into())? {
//!     ConstantPoolEntry::Utf8(s) => assert_eq!(s, "Hi"),
//!     _ => unreachable!(),
//! }
//! # Ok::<(), cafescope::Error>(())
//! ```

use crate::{
    metadata::index::PoolIndex,
    Error::{PoolIndexOutOfRange, PoolTypeMismatch},
    Parser, Result,
};

/// Constant pool entry tags, as stored in the one-byte tag field of each entry.
mod tag {
    pub const UTF8: u8 = 1;
    pub const INTEGER: u8 = 3;
    pub const FLOAT: u8 = 4;
    pub const LONG: u8 = 5;
    pub const DOUBLE: u8 = 6;
    pub const CLASS: u8 = 7;
    pub const STRING: u8 = 8;
    pub const FIELD_REF: u8 = 9;
    pub const METHOD_REF: u8 = 10;
    pub const INTERFACE_METHOD_REF: u8 = 11;
    pub const NAME_AND_TYPE: u8 = 12;
    pub const METHOD_HANDLE: u8 = 15;
    pub const METHOD_TYPE: u8 = 16;
    pub const DYNAMIC: u8 = 17;
    pub const INVOKE_DYNAMIC: u8 = 18;
    pub const MODULE: u8 = 19;
    pub const PACKAGE: u8 = 20;
}

/// One decoded constant pool entry.
///
/// This is a closed union over every tag the format defines. Entries whose payload
/// this decoder does not model (`Dynamic`, `InvokeDynamic`, `Module`, `Package`)
/// still consume their exact payload size so the stream stays synchronized; their
/// variants carry no data. Tags outside the defined table decode to
/// [`ConstantPoolEntry::Unknown`], which is also the phantom placeholder that
/// follows every `Long` and `Double` entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantPoolEntry {
    /// Modified UTF-8 text, referenced by name, descriptor and string entries.
    Utf8(String),
    /// A 32-bit integer literal.
    Integer(i32),
    /// A 32-bit IEEE-754 float literal.
    Float(f32),
    /// A 64-bit integer literal, assembled from two big-endian 32-bit halves.
    Long(u64),
    /// A 64-bit IEEE-754 double literal.
    Double(f64),
    /// Reference to a class; the index points at the Utf8 binary name.
    ClassRef(PoolIndex),
    /// Reference to a string literal; the index points at the Utf8 payload.
    StringRef(PoolIndex),
    /// Reference to a field: owning class + name-and-type.
    FieldRef {
        /// Index of the [`ConstantPoolEntry::ClassRef`] owning the field
        class: PoolIndex,
        /// Index of the [`ConstantPoolEntry::NameAndType`] describing the field
        name_and_type: PoolIndex,
    },
    /// Reference to a method: owning class + name-and-type.
    MethodRef {
        /// Index of the [`ConstantPoolEntry::ClassRef`] owning the method
        class: PoolIndex,
        /// Index of the [`ConstantPoolEntry::NameAndType`] describing the method
        name_and_type: PoolIndex,
    },
    /// Reference to an interface method: owning interface + name-and-type.
    InterfaceMethodRef {
        /// Index of the [`ConstantPoolEntry::ClassRef`] owning the method
        class: PoolIndex,
        /// Index of the [`ConstantPoolEntry::NameAndType`] describing the method
        name_and_type: PoolIndex,
    },
    /// A name paired with a field or method descriptor.
    NameAndType {
        /// Index of the Utf8 entry holding the simple name
        name: PoolIndex,
        /// Index of the Utf8 entry holding the type descriptor
        descriptor: PoolIndex,
    },
    /// A method handle: reference kind byte + index of the referenced member.
    MethodHandle {
        /// The reference kind (1..=9)
        kind: u8,
        /// Index of the referenced field/method entry
        index: PoolIndex,
    },
    /// A method type; the index points at the Utf8 method descriptor.
    MethodType(PoolIndex),
    /// A dynamically-computed constant. Payload is skipped, not modeled.
    Dynamic,
    /// A dynamically-computed call site. Payload is skipped, not modeled.
    InvokeDynamic,
    /// A module declaration. Payload is skipped, not modeled.
    Module,
    /// A package declaration. Payload is skipped, not modeled.
    Package,
    /// An unrecognized tag, or the phantom slot after a `Long`/`Double` entry.
    Unknown,
}

impl ConstantPoolEntry {
    /// A short human-readable name for this entry's kind, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ConstantPoolEntry::Utf8(_) => "utf8",
            ConstantPoolEntry::Integer(_) => "integer",
            ConstantPoolEntry::Float(_) => "float",
            ConstantPoolEntry::Long(_) => "long",
            ConstantPoolEntry::Double(_) => "double",
            ConstantPoolEntry::ClassRef(_) => "class reference",
            ConstantPoolEntry::StringRef(_) => "string reference",
            ConstantPoolEntry::FieldRef { .. } => "field reference",
            ConstantPoolEntry::MethodRef { .. } => "method reference",
            ConstantPoolEntry::InterfaceMethodRef { .. } => "interface method reference",
            ConstantPoolEntry::NameAndType { .. } => "name-and-type",
            ConstantPoolEntry::MethodHandle { .. } => "method handle",
            ConstantPoolEntry::MethodType(_) => "method type",
            ConstantPoolEntry::Dynamic => "dynamic",
            ConstantPoolEntry::InvokeDynamic => "invoke-dynamic",
            ConstantPoolEntry::Module => "module",
            ConstantPoolEntry::Package => "package",
            ConstantPoolEntry::Unknown => "unknown",
        }
    }
}

fn parse_entry(parser: &mut Parser) -> Result<ConstantPoolEntry> {
    let tag_byte = parser.read_be::<u8>()?;
    match tag_byte {
        tag::UTF8 => {
            let size = parser.read_be::<u16>()?;
            let string = parser.read_string_utf8(size as usize)?;
            Ok(ConstantPoolEntry::Utf8(string.to_string()))
        }
        tag::INTEGER => Ok(ConstantPoolEntry::Integer(parser.read_be::<i32>()?)),
        tag::FLOAT => Ok(ConstantPoolEntry::Float(parser.read_be::<f32>()?)),
        tag::LONG => Ok(ConstantPoolEntry::Long(parser.read_u64_halves()?)),
        tag::DOUBLE => Ok(ConstantPoolEntry::Double(parser.read_be::<f64>()?)),
        tag::CLASS => Ok(ConstantPoolEntry::ClassRef(parser.read_be::<u16>()?.into())),
        tag::STRING => Ok(ConstantPoolEntry::StringRef(
            parser.read_be::<u16>()?.into(),
        )),
        tag::FIELD_REF => Ok(ConstantPoolEntry::FieldRef {
            class: parser.read_be::<u16>()?.into(),
            name_and_type: parser.read_be::<u16>()?.into(),
        }),
        tag::METHOD_REF => Ok(ConstantPoolEntry::MethodRef {
            class: parser.read_be::<u16>()?.into(),
            name_and_type: parser.read_be::<u16>()?.into(),
        }),
        tag::INTERFACE_METHOD_REF => Ok(ConstantPoolEntry::InterfaceMethodRef {
            class: parser.read_be::<u16>()?.into(),
            name_and_type: parser.read_be::<u16>()?.into(),
        }),
        tag::NAME_AND_TYPE => Ok(ConstantPoolEntry::NameAndType {
            name: parser.read_be::<u16>()?.into(),
            descriptor: parser.read_be::<u16>()?.into(),
        }),
        tag::METHOD_HANDLE => Ok(ConstantPoolEntry::MethodHandle {
            kind: parser.read_be::<u8>()?,
            index: parser.read_be::<u16>()?.into(),
        }),
        tag::METHOD_TYPE => Ok(ConstantPoolEntry::MethodType(
            parser.read_be::<u16>()?.into(),
        )),
        tag::DYNAMIC => {
            parser.skip(4)?;
            Ok(ConstantPoolEntry::Dynamic)
        }
        tag::INVOKE_DYNAMIC => {
            parser.skip(4)?;
            Ok(ConstantPoolEntry::InvokeDynamic)
        }
        tag::MODULE => {
            parser.skip(2)?;
            Ok(ConstantPoolEntry::Module)
        }
        tag::PACKAGE => {
            parser.skip(2)?;
            Ok(ConstantPoolEntry::Package)
        }
        _ => Ok(ConstantPoolEntry::Unknown),
    }
}

/// The decoded constant pool of one class file.
///
/// Wraps the entry list and enforces 1-based indexing: `get(i)` addresses the
/// `i`-th logical slot, index 0 is always invalid. At most `count - 1` slots are
/// addressable for a declared pool count of `count`.
#[derive(Debug, Clone)]
pub struct ConstantPool {
    entries: Vec<ConstantPoolEntry>,
}

impl ConstantPool {
    /// Decode a constant pool from the parser's current position.
    ///
    /// Reads `count - 1` logical slots. `Long` and `Double` entries produce their
    /// phantom follow-up slot as described in the module documentation.
    ///
    /// # Arguments
    /// * `parser` - Cursor positioned at the first entry's tag byte
    /// * `count` - The declared pool count (one more than the number of slots)
    ///
    /// # Errors
    /// Returns an error if any entry is truncated or carries invalid UTF-8.
    pub fn parse(parser: &mut Parser, count: u16) -> Result<ConstantPool> {
        let slots = usize::from(count.saturating_sub(1));

        let mut entries = Vec::with_capacity(slots);
        while entries.len() < slots {
            let entry = parse_entry(parser)?;
            let double_width = matches!(
                entry,
                ConstantPoolEntry::Long(_) | ConstantPoolEntry::Double(_)
            );

            entries.push(entry);
            if double_width {
                entries.push(ConstantPoolEntry::Unknown);
            }
        }

        Ok(ConstantPool { entries })
    }

    /// Number of addressable slots in this pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the pool holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the entry at a 1-based pool index.
    ///
    /// # Errors
    /// Returns [`crate::Error::PoolIndexOutOfRange`] for index 0 and for indices
    /// beyond the last slot. The phantom slot after a `Long`/`Double` is addressable
    /// (it exists) but resolves as [`ConstantPoolEntry::Unknown`], which every typed
    /// resolver rejects.
    pub fn get(&self, index: PoolIndex) -> Result<&ConstantPoolEntry> {
        if index.is_null() {
            return Err(PoolIndexOutOfRange(index));
        }

        match self.entries.get(usize::from(index.value()) - 1) {
            Some(entry) => Ok(entry),
            None => Err(PoolIndexOutOfRange(index)),
        }
    }

    /// Look up an entry and require it to be a specific kind.
    ///
    /// Helper shared by the resolvers; returns [`crate::Error::PoolTypeMismatch`]
    /// with the expected and found kind names when the tag differs.
    pub(crate) fn expect<'a, T>(
        &'a self,
        index: PoolIndex,
        expected: &'static str,
        matcher: impl FnOnce(&'a ConstantPoolEntry) -> Option<T>,
    ) -> Result<T> {
        let entry = self.get(index)?;
        match matcher(entry) {
            Some(value) => Ok(value),
            None => Err(PoolTypeMismatch {
                index,
                expected,
                found: entry.kind(),
            }),
        }
    }

    /// Iterate over all slots in pool order, including phantom placeholders.
    pub fn iter(&self) -> impl Iterator<Item = &ConstantPoolEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_entry() {
        let data = [0x01, 0x00, 0x05, b'H', b'e', b'l', b'l', b'o'];
        let mut parser = Parser::new(&data);
        let pool = ConstantPool::parse(&mut parser, 2).unwrap();

        assert_eq!(pool.len(), 1);
        assert_eq!(
            pool.get(1.into()).unwrap(),
            &ConstantPoolEntry::Utf8("Hello".to_string())
        );
    }

    #[test]
    fn long_injects_phantom_slot() {
        // count = 4 -> three slots: Long (two slots) + Integer
        #[rustfmt::skip]
        let data = [
            0x05, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02,
            0x03, 0x00, 0x00, 0x00, 0x2A,
        ];
        let mut parser = Parser::new(&data);
        let pool = ConstantPool::parse(&mut parser, 4).unwrap();

        assert_eq!(pool.len(), 3);
        assert_eq!(
            pool.get(1.into()).unwrap(),
            &ConstantPoolEntry::Long(0x0000_0001_0000_0002)
        );
        assert_eq!(pool.get(2.into()).unwrap(), &ConstantPoolEntry::Unknown);
        assert_eq!(pool.get(3.into()).unwrap(), &ConstantPoolEntry::Integer(42));
    }

    #[test]
    fn double_injects_phantom_slot() {
        let mut data = vec![0x06];
        data.extend_from_slice(&1.5_f64.to_be_bytes());

        let mut parser = Parser::new(&data);
        let pool = ConstantPool::parse(&mut parser, 3).unwrap();

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(1.into()).unwrap(), &ConstantPoolEntry::Double(1.5));
        assert_eq!(pool.get(2.into()).unwrap(), &ConstantPoolEntry::Unknown);
    }

    #[test]
    fn addressable_entries_bounded_by_count() {
        // Pool count N yields at most N - 1 addressable slots.
        let data = [0x03, 0x00, 0x00, 0x00, 0x01, 0x03, 0x00, 0x00, 0x00, 0x02];
        let mut parser = Parser::new(&data);
        let pool = ConstantPool::parse(&mut parser, 3).unwrap();

        assert_eq!(pool.len(), 2);
        assert!(pool.get(0.into()).is_err());
        assert!(pool.get(3.into()).is_err());
    }

    #[test]
    fn references() {
        #[rustfmt::skip]
        let data = [
            0x07, 0x00, 0x03,             // ClassRef -> #3
            0x0C, 0x00, 0x04, 0x00, 0x05, // NameAndType -> #4, #5
            0x0A, 0x00, 0x01, 0x00, 0x02, // MethodRef -> #1, #2
        ];
        let mut parser = Parser::new(&data);
        let pool = ConstantPool::parse(&mut parser, 4).unwrap();

        assert_eq!(
            pool.get(1.into()).unwrap(),
            &ConstantPoolEntry::ClassRef(3.into())
        );
        assert_eq!(
            pool.get(2.into()).unwrap(),
            &ConstantPoolEntry::NameAndType {
                name: 4.into(),
                descriptor: 5.into(),
            }
        );
        assert_eq!(
            pool.get(3.into()).unwrap(),
            &ConstantPoolEntry::MethodRef {
                class: 1.into(),
                name_and_type: 2.into(),
            }
        );
    }

    #[test]
    fn unknown_tag() {
        let data = [0x63];
        let mut parser = Parser::new(&data);
        let pool = ConstantPool::parse(&mut parser, 2).unwrap();

        assert_eq!(pool.get(1.into()).unwrap(), &ConstantPoolEntry::Unknown);
    }

    #[test]
    fn truncated_entry_fails() {
        let data = [0x03, 0x00];
        let mut parser = Parser::new(&data);
        assert!(ConstantPool::parse(&mut parser, 2).is_err());
    }
}
