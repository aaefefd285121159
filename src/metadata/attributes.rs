//! Decoding of named attribute blobs.
//!
//! Attributes are length-prefixed sidecar blobs attached to classes, fields, methods
//! and other attributes. This module resolves each blob's name through the constant
//! pool and dispatches to the matching decoder: `ConstantValue`, `Code` (which
//! recursively decodes its own nested attribute list), and `LocalVariableTable`.
//! Every other name is preserved losslessly as [`Attribute::Unknown`], carrying the
//! untouched raw bytes - unknown attributes are data, not errors.
//!
//! The code bytes inside a `Code` attribute are *not* disassembled at this layer;
//! that happens during class assembly ([`crate::metadata::class`]), which feeds them
//! through [`crate::disassembler::decode_stream`].
//!
//! # Usage Examples
//!
//! ```rust
//! use cafescope::{
//!     metadata::{attributes::{decode_attribute, Attribute}, classfile::AttributeInfo,
//!                pool::ConstantPool},
//!     Parser,
//! };
//!
//! // Pool: #1 Utf8 "Whatever"
//! let pool_data = [0x01, 0x00, 0x08, b'W', b'h', b'a', b't', b'e', b'v', b'e', b'r'];
//! let mut parser = Parser::new(&pool_data);
//! let pool = ConstantPool::parse(&mut parser, 2)?;
//!
//! let info = AttributeInfo { name_index: 1.into(), data: vec![0xAB, 0xCD] };
//! match decode_attribute(&info, &pool)? {
//!     Attribute::Unknown { name, data } => {
//!         assert_eq!(name, "Whatever");
//!         assert_eq!(data, vec![0xAB, 0xCD]);
//!     }
//!     _ => unreachable!(),
//! }
//! # Ok::<(), cafescope::Error>(())
//! ```

use crate::{
    metadata::{
        classfile::{parse_attribute_info, AttributeInfo},
        descriptor::{parse_field_descriptor, FieldType},
        pool::ConstantPool,
        resolver::{resolve_class_path, resolve_constant, resolve_utf8, ConstantValue},
    },
    Parser, Result,
};

/// One row of a method's exception table.
///
/// Offsets are byte offsets into the owning method's code array. A missing catch
/// type means the handler catches everything (the encoding uses pool index 0).
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionTableEntry {
    /// Start of the protected region (inclusive)
    pub start_pc: u16,
    /// End of the protected region (exclusive)
    pub end_pc: u16,
    /// Offset of the handler's first instruction
    pub handler_pc: u16,
    /// Class path of the caught exception type; `None` catches all
    pub catch_type: Option<Vec<String>>,
}

/// One row of a `LocalVariableTable` attribute, with name and type resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalVariable {
    /// First code offset at which the variable has a value
    pub start_pc: u16,
    /// Length of the code range the variable covers
    pub length: u16,
    /// The variable's source name
    pub name: String,
    /// The variable's declared type
    pub descriptor: FieldType,
    /// Index into the local variable array
    pub slot: u16,
}

/// The decoded body of a `Code` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeAttribute {
    /// Maximum operand stack depth
    pub max_stack: u16,
    /// Number of local variable slots
    pub max_locals: u16,
    /// The raw bytecode, kept undecoded at this layer
    pub code: Vec<u8>,
    /// Exception handler rows, in table order
    pub exception_table: Vec<ExceptionTableEntry>,
    /// Nested attributes, decoded through the same dispatcher
    pub attributes: Vec<Attribute>,
}

/// A decoded attribute.
///
/// The closed set of understood attributes plus the lossless `Unknown` passthrough.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    /// The constant initializer of a `static final` field.
    ConstantValue(ConstantValue),
    /// A method body: stack/local limits, raw code, handlers, nested attributes.
    Code(CodeAttribute),
    /// Debug names and types for local variable slots.
    LocalVariableTable(Vec<LocalVariable>),
    /// Any attribute this decoder does not understand, preserved byte-for-byte.
    Unknown {
        /// The attribute's resolved name
        name: String,
        /// The raw payload, untouched
        data: Vec<u8>,
    },
}

fn decode_constant_value(parser: &mut Parser, pool: &ConstantPool) -> Result<Attribute> {
    let index = parser.read_be::<u16>()?.into();

    // resolve_constant enforces the allowed entry kinds: integer, float, long,
    // double, string reference. Anything else is a tag error.
    Ok(Attribute::ConstantValue(resolve_constant(pool, index)?))
}

fn decode_code(parser: &mut Parser, pool: &ConstantPool) -> Result<Attribute> {
    let max_stack = parser.read_be::<u16>()?;
    let max_locals = parser.read_be::<u16>()?;

    let code_length = parser.read_be::<u32>()?;
    let code = parser.read_bytes(code_length as usize)?.to_vec();

    let exception_table_length = parser.read_be::<u16>()?;
    let mut exception_table = Vec::with_capacity(usize::from(exception_table_length));
    for _ in 0..exception_table_length {
        let start_pc = parser.read_be::<u16>()?;
        let end_pc = parser.read_be::<u16>()?;
        let handler_pc = parser.read_be::<u16>()?;
        let catch_type_index: crate::metadata::index::PoolIndex = parser.read_be::<u16>()?.into();

        let catch_type = if catch_type_index.is_null() {
            None
        } else {
            Some(resolve_class_path(pool, catch_type_index)?)
        };

        exception_table.push(ExceptionTableEntry {
            start_pc,
            end_pc,
            handler_pc,
            catch_type,
        });
    }

    let attribute_count = parser.read_be::<u16>()?;
    let mut attributes = Vec::with_capacity(usize::from(attribute_count));
    for _ in 0..attribute_count {
        let info = parse_attribute_info(parser)?;
        attributes.push(decode_attribute(&info, pool)?);
    }

    Ok(Attribute::Code(CodeAttribute {
        max_stack,
        max_locals,
        code,
        exception_table,
        attributes,
    }))
}

fn decode_local_variable_table(parser: &mut Parser, pool: &ConstantPool) -> Result<Attribute> {
    let count = parser.read_be::<u16>()?;

    let mut entries = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        let start_pc = parser.read_be::<u16>()?;
        let length = parser.read_be::<u16>()?;
        let name = resolve_utf8(pool, parser.read_be::<u16>()?.into())?.to_string();
        let descriptor = parse_field_descriptor(resolve_utf8(pool, parser.read_be::<u16>()?.into())?)?;
        let slot = parser.read_be::<u16>()?;

        entries.push(LocalVariable {
            start_pc,
            length,
            name,
            descriptor,
            slot,
        });
    }

    Ok(Attribute::LocalVariableTable(entries))
}

/// Decode one raw attribute, dispatching on its resolved name.
///
/// # Arguments
/// * `info` - The raw attribute (name index + payload bytes)
/// * `pool` - The owning class file's constant pool
///
/// # Errors
/// Returns an error if the name index does not resolve to a Utf8 entry, or if a
/// recognized attribute's payload is truncated or fails resolution. Unrecognized
/// attribute names never fail; they decode to [`Attribute::Unknown`].
pub fn decode_attribute(info: &AttributeInfo, pool: &ConstantPool) -> Result<Attribute> {
    let name = resolve_utf8(pool, info.name_index)?;
    let mut parser = Parser::new(&info.data);

    match name {
        "ConstantValue" => decode_constant_value(&mut parser, pool),
        "Code" => decode_code(&mut parser, pool),
        "LocalVariableTable" => decode_local_variable_table(&mut parser, pool),
        _ => Ok(Attribute::Unknown {
            name: name.to_string(),
            data: info.data.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn utf8_entry(text: &str) -> Vec<u8> {
        let mut bytes = vec![0x01, 0x00, text.len() as u8];
        bytes.extend_from_slice(text.as_bytes());
        bytes
    }

    fn build_pool(data: &[u8], count: u16) -> ConstantPool {
        let mut parser = Parser::new(data);
        ConstantPool::parse(&mut parser, count).unwrap()
    }

    #[test]
    fn constant_value_integer() {
        // #1 "ConstantValue", #2 Integer 7
        let mut data = utf8_entry("ConstantValue");
        data.extend_from_slice(&[0x03, 0x00, 0x00, 0x00, 0x07]);
        let pool = build_pool(&data, 3);

        let info = AttributeInfo {
            name_index: 1.into(),
            data: vec![0x00, 0x02],
        };
        assert_eq!(
            decode_attribute(&info, &pool).unwrap(),
            Attribute::ConstantValue(ConstantValue::Integer(7))
        );
    }

    #[test]
    fn constant_value_rejects_utf8_target() {
        // #1 "ConstantValue", #2 Utf8 "oops" - a utf8 entry is not a legal constant
        let mut data = utf8_entry("ConstantValue");
        data.extend(utf8_entry("oops"));
        let pool = build_pool(&data, 3);

        let info = AttributeInfo {
            name_index: 1.into(),
            data: vec![0x00, 0x02],
        };
        assert!(matches!(
            decode_attribute(&info, &pool),
            Err(Error::PoolTypeMismatch { .. })
        ));
    }

    #[test]
    fn code_attribute_with_catch_all() {
        // #1 "Code"
        let data = utf8_entry("Code");
        let pool = build_pool(&data, 2);

        #[rustfmt::skip]
        let payload = vec![
            0x00, 0x02,             // max_stack
            0x00, 0x01,             // max_locals
            0x00, 0x00, 0x00, 0x02, // code length
            0x00, 0xb1,             // nop, return
            0x00, 0x01,             // one exception row
            0x00, 0x00,             // start_pc
            0x00, 0x02,             // end_pc
            0x00, 0x02,             // handler_pc
            0x00, 0x00,             // catch type 0 = catch-all
            0x00, 0x00,             // nested attributes
        ];

        let info = AttributeInfo {
            name_index: 1.into(),
            data: payload,
        };
        let Attribute::Code(code) = decode_attribute(&info, &pool).unwrap() else {
            panic!("expected Code attribute");
        };

        assert_eq!(code.max_stack, 2);
        assert_eq!(code.max_locals, 1);
        assert_eq!(code.code, vec![0x00, 0xb1]);
        assert_eq!(code.exception_table.len(), 1);
        assert_eq!(code.exception_table[0].catch_type, None);
        assert!(code.attributes.is_empty());
    }

    #[test]
    fn code_attribute_nested_unknown() {
        // #1 "Code", #2 "MysteryAttr"
        let mut data = utf8_entry("Code");
        data.extend(utf8_entry("MysteryAttr"));
        let pool = build_pool(&data, 3);

        #[rustfmt::skip]
        let payload = vec![
            0x00, 0x01,             // max_stack
            0x00, 0x00,             // max_locals
            0x00, 0x00, 0x00, 0x01, // code length
            0xb1,                   // return
            0x00, 0x00,             // no exceptions
            0x00, 0x01,             // one nested attribute
            0x00, 0x02,             // name -> #2
            0x00, 0x00, 0x00, 0x02, // length
            0xBE, 0xEF,             // payload
        ];

        let info = AttributeInfo {
            name_index: 1.into(),
            data: payload,
        };
        let Attribute::Code(code) = decode_attribute(&info, &pool).unwrap() else {
            panic!("expected Code attribute");
        };

        assert_eq!(
            code.attributes,
            vec![Attribute::Unknown {
                name: "MysteryAttr".to_string(),
                data: vec![0xBE, 0xEF],
            }]
        );
    }

    #[test]
    fn exception_row_with_class() {
        // #1 "Code", #2 Utf8 class name, #3 ClassRef -> #2
        let mut data = utf8_entry("Code");
        data.extend(utf8_entry("java/lang/Exception"));
        data.extend_from_slice(&[0x07, 0x00, 0x02]);
        let pool = build_pool(&data, 4);

        #[rustfmt::skip]
        let payload = vec![
            0x00, 0x01,
            0x00, 0x00,
            0x00, 0x00, 0x00, 0x01,
            0xb1,
            0x00, 0x01,             // one exception row
            0x00, 0x00,
            0x00, 0x01,
            0x00, 0x01,
            0x00, 0x03,             // catch type -> #3
            0x00, 0x00,
        ];

        let info = AttributeInfo {
            name_index: 1.into(),
            data: payload,
        };
        let Attribute::Code(code) = decode_attribute(&info, &pool).unwrap() else {
            panic!("expected Code attribute");
        };

        assert_eq!(
            code.exception_table[0].catch_type,
            Some(vec![
                "java".to_string(),
                "lang".to_string(),
                "Exception".to_string(),
            ])
        );
    }

    #[test]
    fn local_variable_table() {
        // #1 "LocalVariableTable", #2 "count", #3 "I"
        let mut data = utf8_entry("LocalVariableTable");
        data.extend(utf8_entry("count"));
        data.extend(utf8_entry("I"));
        let pool = build_pool(&data, 4);

        #[rustfmt::skip]
        let payload = vec![
            0x00, 0x01,             // one row
            0x00, 0x00,             // start_pc
            0x00, 0x08,             // length
            0x00, 0x02,             // name -> #2
            0x00, 0x03,             // descriptor -> #3
            0x00, 0x01,             // slot
        ];

        let info = AttributeInfo {
            name_index: 1.into(),
            data: payload,
        };
        let Attribute::LocalVariableTable(entries) = decode_attribute(&info, &pool).unwrap()
        else {
            panic!("expected LocalVariableTable");
        };

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "count");
        assert_eq!(entries[0].slot, 1);
        assert_eq!(
            entries[0].descriptor,
            FieldType::Base(crate::metadata::descriptor::BaseType::Int)
        );
    }

    #[test]
    fn unknown_attribute_is_lossless() {
        let data = utf8_entry("RuntimeVisibleAnnotations");
        let pool = build_pool(&data, 2);

        let payload = vec![0x01, 0x02, 0x03, 0x04];
        let info = AttributeInfo {
            name_index: 1.into(),
            data: payload.clone(),
        };

        assert_eq!(
            decode_attribute(&info, &pool).unwrap(),
            Attribute::Unknown {
                name: "RuntimeVisibleAnnotations".to_string(),
                data: payload,
            }
        );
    }

    #[test]
    fn truncated_code_attribute_fails() {
        let data = utf8_entry("Code");
        let pool = build_pool(&data, 2);

        let info = AttributeInfo {
            name_index: 1.into(),
            data: vec![0x00, 0x01, 0x00],
        };
        assert!(matches!(
            decode_attribute(&info, &pool),
            Err(Error::OutOfBounds)
        ));
    }
}
