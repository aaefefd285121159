//! Raw top-level class file structure.
//!
//! This module decodes the fixed outer layout of a class file: header, constant pool,
//! declaration indices, member records and attribute blobs. Everything at this layer
//! stays in index form - names, descriptors and attribute contents are resolved by the
//! layers above ([`crate::metadata::attributes`], [`crate::metadata::resolver`],
//! [`crate::metadata::class`]).
//!
//! # Layout
//!
//! ```text
//! magic (u32) | minor (u16) | major (u16)
//! constant_pool_count (u16) | constant pool entries
//! access_flags (u16) | this_class (u16) | super_class (u16)
//! interfaces_count (u16) | interface indices
//! fields_count (u16) | field_info records
//! methods_count (u16) | method_info records
//! attributes_count (u16) | attribute_info records
//! ```
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use cafescope::metadata::classfile::ClassFile;
//!
//! let data = std::fs::read("Example.class")?;
//! let class_file = ClassFile::parse(&data)?;
//! println!(
//!     "version {}.{}, {} methods",
//!     class_file.major_version,
//!     class_file.minor_version,
//!     class_file.methods.len()
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{
    metadata::{
        access::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags},
        index::PoolIndex,
        pool::ConstantPool,
    },
    Error::InvalidMagic,
    Parser, Result,
};

/// The four magic bytes every class file starts with.
pub const CLASS_MAGIC: u32 = 0xCAFE_BABE;

/// A raw, not-yet-decoded attribute: its name index and opaque payload.
///
/// The payload stays untouched at this layer. Attribute decoding
/// ([`crate::metadata::attributes::decode_attribute`]) resolves the name through the
/// constant pool and interprets the bytes, preserving unknown attributes losslessly.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeInfo {
    /// Pool index of the Utf8 entry naming this attribute
    pub name_index: PoolIndex,
    /// The attribute payload, exactly `attribute_length` bytes
    pub data: Vec<u8>,
}

/// A raw field record: flags plus name/descriptor indices and raw attributes.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    /// Declared access flags
    pub access_flags: FieldAccessFlags,
    /// Pool index of the Utf8 entry holding the field name
    pub name_index: PoolIndex,
    /// Pool index of the Utf8 entry holding the field descriptor
    pub descriptor_index: PoolIndex,
    /// Attributes attached to this field, still raw
    pub attributes: Vec<AttributeInfo>,
}

/// A raw method record: flags plus name/descriptor indices and raw attributes.
#[derive(Debug, Clone)]
pub struct MethodInfo {
    /// Declared access flags
    pub access_flags: MethodAccessFlags,
    /// Pool index of the Utf8 entry holding the method name
    pub name_index: PoolIndex,
    /// Pool index of the Utf8 entry holding the method descriptor
    pub descriptor_index: PoolIndex,
    /// Attributes attached to this method, still raw
    pub attributes: Vec<AttributeInfo>,
}

/// The decoded top-level structure of one class file.
///
/// Owns the constant pool and every member record. All cross-references are stored
/// as [`PoolIndex`] values and resolved lazily by callers.
#[derive(Debug, Clone)]
pub struct ClassFile {
    /// The magic number, always [`CLASS_MAGIC`]
    pub magic: u32,
    /// Minor format version
    pub minor_version: u16,
    /// Major format version
    pub major_version: u16,
    /// The constant pool shared by all structures in this file
    pub constant_pool: ConstantPool,
    /// Declared access flags of the class itself
    pub access_flags: ClassAccessFlags,
    /// Pool index of this class's `ClassRef` entry
    pub this_class: PoolIndex,
    /// Pool index of the superclass's `ClassRef` entry (0 only for `java/lang/Object`)
    pub super_class: PoolIndex,
    /// Pool indices of the directly implemented interfaces, in declaration order
    pub interfaces: Vec<PoolIndex>,
    /// Declared fields, in declaration order
    pub fields: Vec<FieldInfo>,
    /// Declared methods, in declaration order
    pub methods: Vec<MethodInfo>,
    /// Attributes attached to the class itself, still raw
    pub attributes: Vec<AttributeInfo>,
}

/// Decode one raw attribute record: name index, length, and exactly `length` bytes.
pub(crate) fn parse_attribute_info(parser: &mut Parser) -> Result<AttributeInfo> {
    let name_index = parser.read_be::<u16>()?.into();
    let length = parser.read_be::<u32>()?;
    let data = parser.read_bytes(length as usize)?.to_vec();

    Ok(AttributeInfo { name_index, data })
}

fn parse_attribute_list(parser: &mut Parser) -> Result<Vec<AttributeInfo>> {
    let count = parser.read_be::<u16>()?;
    let mut attributes = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        attributes.push(parse_attribute_info(parser)?);
    }

    Ok(attributes)
}

fn parse_field_info(parser: &mut Parser) -> Result<FieldInfo> {
    Ok(FieldInfo {
        access_flags: FieldAccessFlags::from_bits_retain(parser.read_be::<u16>()?),
        name_index: parser.read_be::<u16>()?.into(),
        descriptor_index: parser.read_be::<u16>()?.into(),
        attributes: parse_attribute_list(parser)?,
    })
}

fn parse_method_info(parser: &mut Parser) -> Result<MethodInfo> {
    Ok(MethodInfo {
        access_flags: MethodAccessFlags::from_bits_retain(parser.read_be::<u16>()?),
        name_index: parser.read_be::<u16>()?.into(),
        descriptor_index: parser.read_be::<u16>()?.into(),
        attributes: parse_attribute_list(parser)?,
    })
}

impl ClassFile {
    /// Decode the fixed top-level layout from a byte buffer.
    ///
    /// # Arguments
    /// * `data` - The complete class file image
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidMagic`] if the input does not start with
    /// `0xCAFEBABE`, or a structural error if any record is truncated or malformed.
    pub fn parse(data: &[u8]) -> Result<ClassFile> {
        let mut parser = Parser::new(data);

        let magic = parser.read_be::<u32>()?;
        if magic != CLASS_MAGIC {
            return Err(InvalidMagic(magic));
        }

        let minor_version = parser.read_be::<u16>()?;
        let major_version = parser.read_be::<u16>()?;

        let constant_pool_count = parser.read_be::<u16>()?;
        let constant_pool = ConstantPool::parse(&mut parser, constant_pool_count)?;

        let access_flags = ClassAccessFlags::from_bits_retain(parser.read_be::<u16>()?);
        let this_class = parser.read_be::<u16>()?.into();
        let super_class = parser.read_be::<u16>()?.into();

        let interfaces_count = parser.read_be::<u16>()?;
        let mut interfaces = Vec::with_capacity(usize::from(interfaces_count));
        for _ in 0..interfaces_count {
            interfaces.push(parser.read_be::<u16>()?.into());
        }

        let fields_count = parser.read_be::<u16>()?;
        let mut fields = Vec::with_capacity(usize::from(fields_count));
        for _ in 0..fields_count {
            fields.push(parse_field_info(&mut parser)?);
        }

        let methods_count = parser.read_be::<u16>()?;
        let mut methods = Vec::with_capacity(usize::from(methods_count));
        for _ in 0..methods_count {
            methods.push(parse_method_info(&mut parser)?);
        }

        let attributes = parse_attribute_list(&mut parser)?;

        Ok(ClassFile {
            magic,
            minor_version,
            major_version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
        })
    }
}
