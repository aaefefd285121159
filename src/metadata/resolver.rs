//! Resolution of constant-pool indices into directly usable values.
//!
//! Decoded structures store [`crate::metadata::index::PoolIndex`] cross-references;
//! the functions in this module turn those indices into symbolic values: UTF-8 text,
//! class paths, name-and-type pairs with parsed descriptors, member references, and
//! literal constants. Each function fails fast with a typed error when an index is
//! out of range or the entry at it has an unexpected tag - including indices landing
//! on the phantom slot that follows a `long`/`double` entry.
//!
//! These resolvers serve two consumers: external renderers resolving instruction
//! operands on demand, and the class assembly step
//! ([`crate::metadata::class::JavaClass`]), which uses them to resolve declarations
//! and synthesize default argument names.
//!
//! # Usage Examples
//!
//! ```rust
//! use cafescope::{metadata::{pool::ConstantPool, resolver}, Parser};
//!
//! // #1: Utf8 "java/lang/Object", #2: ClassRef -> #1
//! let data = [
//!     0x01, 0x00, 0x10,
//!     b'j', b'a', b'v', b'a', b'/', b'l', b'a', b'n', b'g', b'/',
//!     b'O', b'b', b'j', b'e', b'c', b't',
//!     0x07, 0x00, 0x01,
//! ];
//! let mut parser = Parser::new(&data);
//! let pool = ConstantPool::parse(&mut parser, 3)?;
//!
//! let path = resolver::resolve_class_path(&pool, 2.into())?;
//! assert_eq!(path, vec!["java", "lang", "Object"]);
//! # Ok::<(), cafescope::Error>(())
//! ```

use crate::{
    metadata::{
        descriptor::{parse_field_descriptor, parse_method_descriptor, FieldType, MethodType},
        index::PoolIndex,
        pool::{ConstantPool, ConstantPoolEntry},
    },
    Result,
};

/// A parsed descriptor that is either a field type or a method type.
///
/// Name-and-type entries do not state which grammar their descriptor uses; it is
/// determined by the leading character (`(` starts a method descriptor).
#[derive(Debug, Clone, PartialEq)]
pub enum MemberDescriptor {
    /// The descriptor was a field type signature.
    Field(FieldType),
    /// The descriptor was a method type signature.
    Method(MethodType),
}

/// A resolved name-and-type entry: simple name plus parsed descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct NameAndType {
    /// The member's simple name
    pub name: String,
    /// The member's parsed type descriptor
    pub descriptor: MemberDescriptor,
}

/// A resolved field/method reference: owning class path plus name-and-type.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRef {
    /// Path segments of the owning class's binary name
    pub class_path: Vec<String>,
    /// The referenced member's name and parsed descriptor
    pub name_and_type: NameAndType,
}

/// A resolved literal constant.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    /// 32-bit integer literal
    Integer(i32),
    /// 32-bit float literal
    Float(f32),
    /// 64-bit long literal
    Long(u64),
    /// 64-bit double literal
    Double(f64),
    /// String literal, resolved through its Utf8 entry
    String(String),
}

/// Resolve an index to the text of a Utf8 entry.
///
/// # Errors
/// Returns [`crate::Error::PoolIndexOutOfRange`] or
/// [`crate::Error::PoolTypeMismatch`] if the index is invalid or the entry is not
/// a Utf8 entry.
pub fn resolve_utf8<'a>(pool: &'a ConstantPool, index: PoolIndex) -> Result<&'a str> {
    pool.expect(index, "utf8", |entry| match entry {
        ConstantPoolEntry::Utf8(s) => Some(s.as_str()),
        _ => None,
    })
}

/// Resolve an index to a class path: follows a `ClassRef` to its Utf8 binary name
/// and splits it on `/` into segments.
///
/// # Errors
/// Fails if the index does not address a `ClassRef`, or its name index does not
/// address a Utf8 entry.
pub fn resolve_class_path(pool: &ConstantPool, index: PoolIndex) -> Result<Vec<String>> {
    let name_index = pool.expect(index, "class reference", |entry| match entry {
        ConstantPoolEntry::ClassRef(name_index) => Some(*name_index),
        _ => None,
    })?;

    let binary_name = resolve_utf8(pool, name_index)?;
    Ok(binary_name.split('/').map(str::to_string).collect())
}

/// Resolve an index to a name-and-type pair, parsing the descriptor.
///
/// The descriptor is parsed as a method type iff it starts with `(`, otherwise as
/// a field type.
///
/// # Errors
/// Fails if the index does not address a `NameAndType`, either referenced Utf8
/// entry is missing, or the descriptor is malformed.
pub fn resolve_name_and_type(pool: &ConstantPool, index: PoolIndex) -> Result<NameAndType> {
    let (name_index, descriptor_index) =
        pool.expect(index, "name-and-type", |entry| match entry {
            ConstantPoolEntry::NameAndType { name, descriptor } => Some((*name, *descriptor)),
            _ => None,
        })?;

    let name = resolve_utf8(pool, name_index)?.to_string();
    let descriptor_text = resolve_utf8(pool, descriptor_index)?;

    let descriptor = if descriptor_text.starts_with('(') {
        MemberDescriptor::Method(parse_method_descriptor(descriptor_text)?)
    } else {
        MemberDescriptor::Field(parse_field_descriptor(descriptor_text)?)
    };

    Ok(NameAndType { name, descriptor })
}

/// Resolve an index to a field reference: owning class path plus name-and-type.
///
/// # Errors
/// Fails if the index does not address a `FieldRef`, or any of its components
/// fail to resolve.
pub fn resolve_field_ref(pool: &ConstantPool, index: PoolIndex) -> Result<MemberRef> {
    let (class, name_and_type) = pool.expect(index, "field reference", |entry| match entry {
        ConstantPoolEntry::FieldRef {
            class,
            name_and_type,
        } => Some((*class, *name_and_type)),
        _ => None,
    })?;

    Ok(MemberRef {
        class_path: resolve_class_path(pool, class)?,
        name_and_type: resolve_name_and_type(pool, name_and_type)?,
    })
}

/// Resolve an index to a method reference: owning class path plus name-and-type.
///
/// Accepts both `MethodRef` and `InterfaceMethodRef` entries - `invokeinterface`
/// operands reference the latter but resolve through the same path.
///
/// # Errors
/// Fails if the index does not address a method reference of either kind, or any
/// of its components fail to resolve.
pub fn resolve_method_ref(pool: &ConstantPool, index: PoolIndex) -> Result<MemberRef> {
    let (class, name_and_type) = pool.expect(index, "method reference", |entry| match entry {
        ConstantPoolEntry::MethodRef {
            class,
            name_and_type,
        }
        | ConstantPoolEntry::InterfaceMethodRef {
            class,
            name_and_type,
        } => Some((*class, *name_and_type)),
        _ => None,
    })?;

    Ok(MemberRef {
        class_path: resolve_class_path(pool, class)?,
        name_and_type: resolve_name_and_type(pool, name_and_type)?,
    })
}

/// Resolve an index to a literal constant value.
///
/// Valid targets are the numeric entries and string references; any other entry
/// kind is a resolution error. This is the validation path for `ConstantValue`
/// attributes and for `ldc`-family operands.
///
/// # Errors
/// Fails if the index does not address a numeric or string entry, or a string
/// reference's payload index does not address a Utf8 entry.
pub fn resolve_constant(pool: &ConstantPool, index: PoolIndex) -> Result<ConstantValue> {
    enum Raw {
        Value(ConstantValue),
        StringPayload(PoolIndex),
    }

    let raw = pool.expect(index, "numeric or string constant", |entry| match entry {
        ConstantPoolEntry::Integer(value) => Some(Raw::Value(ConstantValue::Integer(*value))),
        ConstantPoolEntry::Float(value) => Some(Raw::Value(ConstantValue::Float(*value))),
        ConstantPoolEntry::Long(value) => Some(Raw::Value(ConstantValue::Long(*value))),
        ConstantPoolEntry::Double(value) => Some(Raw::Value(ConstantValue::Double(*value))),
        ConstantPoolEntry::StringRef(payload) => Some(Raw::StringPayload(*payload)),
        _ => None,
    })?;

    match raw {
        Raw::Value(value) => Ok(value),
        Raw::StringPayload(payload) => Ok(ConstantValue::String(
            resolve_utf8(pool, payload)?.to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::descriptor::{BaseType, FieldType},
        Error, Parser,
    };

    fn build_pool(data: &[u8], count: u16) -> ConstantPool {
        let mut parser = Parser::new(data);
        ConstantPool::parse(&mut parser, count).unwrap()
    }

    fn utf8_entry(text: &str) -> Vec<u8> {
        let mut bytes = vec![0x01, 0x00, text.len() as u8];
        bytes.extend_from_slice(text.as_bytes());
        bytes
    }

    #[test]
    fn class_path_resolution() {
        let mut data = utf8_entry("java/lang/Object");
        data.extend_from_slice(&[0x07, 0x00, 0x01]);

        let pool = build_pool(&data, 3);
        assert_eq!(
            resolve_class_path(&pool, 2.into()).unwrap(),
            vec!["java", "lang", "Object"]
        );
    }

    #[test]
    fn utf8_tag_mismatch() {
        let data = [0x03, 0x00, 0x00, 0x00, 0x01];
        let pool = build_pool(&data, 2);

        assert!(matches!(
            resolve_utf8(&pool, 1.into()),
            Err(Error::PoolTypeMismatch {
                expected: "utf8",
                found: "integer",
                ..
            })
        ));
    }

    #[test]
    fn name_and_type_field_descriptor() {
        let mut data = utf8_entry("value");
        data.extend(utf8_entry("I"));
        data.extend_from_slice(&[0x0C, 0x00, 0x01, 0x00, 0x02]);

        let pool = build_pool(&data, 4);
        let resolved = resolve_name_and_type(&pool, 3.into()).unwrap();
        assert_eq!(resolved.name, "value");
        assert_eq!(
            resolved.descriptor,
            MemberDescriptor::Field(FieldType::Base(BaseType::Int))
        );
    }

    #[test]
    fn name_and_type_method_descriptor() {
        let mut data = utf8_entry("main");
        data.extend(utf8_entry("()V"));
        data.extend_from_slice(&[0x0C, 0x00, 0x01, 0x00, 0x02]);

        let pool = build_pool(&data, 4);
        let resolved = resolve_name_and_type(&pool, 3.into()).unwrap();
        assert!(matches!(resolved.descriptor, MemberDescriptor::Method(_)));
    }

    #[test]
    fn method_ref_resolution() {
        // #1 utf8 class name, #2 ClassRef, #3 utf8 method name, #4 utf8 descriptor,
        // #5 NameAndType, #6 MethodRef
        let mut data = utf8_entry("java/io/PrintStream");
        data.extend_from_slice(&[0x07, 0x00, 0x01]);
        data.extend(utf8_entry("println"));
        data.extend(utf8_entry("(I)V"));
        data.extend_from_slice(&[0x0C, 0x00, 0x03, 0x00, 0x04]);
        data.extend_from_slice(&[0x0A, 0x00, 0x02, 0x00, 0x05]);

        let pool = build_pool(&data, 7);
        let resolved = resolve_method_ref(&pool, 6.into()).unwrap();
        assert_eq!(resolved.class_path, vec!["java", "io", "PrintStream"]);
        assert_eq!(resolved.name_and_type.name, "println");
    }

    #[test]
    fn interface_method_ref_resolves_as_method() {
        let mut data = utf8_entry("java/util/List");
        data.extend_from_slice(&[0x07, 0x00, 0x01]);
        data.extend(utf8_entry("size"));
        data.extend(utf8_entry("()I"));
        data.extend_from_slice(&[0x0C, 0x00, 0x03, 0x00, 0x04]);
        data.extend_from_slice(&[0x0B, 0x00, 0x02, 0x00, 0x05]);

        let pool = build_pool(&data, 7);
        assert!(resolve_method_ref(&pool, 6.into()).is_ok());
    }

    #[test]
    fn constant_literals() {
        let mut data = utf8_entry("hello");
        data.extend_from_slice(&[0x08, 0x00, 0x01]); // StringRef -> #1
        data.extend_from_slice(&[0x03, 0x00, 0x00, 0x00, 0x2A]); // Integer 42

        let pool = build_pool(&data, 4);
        assert_eq!(
            resolve_constant(&pool, 2.into()).unwrap(),
            ConstantValue::String("hello".to_string())
        );
        assert_eq!(
            resolve_constant(&pool, 3.into()).unwrap(),
            ConstantValue::Integer(42)
        );
    }

    #[test]
    fn constant_rejects_utf8() {
        let data = utf8_entry("not a literal");
        let pool = build_pool(&data, 2);

        assert!(matches!(
            resolve_constant(&pool, 1.into()),
            Err(Error::PoolTypeMismatch { .. })
        ));
    }

    #[test]
    fn phantom_slot_is_a_resolution_error() {
        // Long at #1 occupies #1 and #2; resolving #2 must fail.
        let data = [0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07];
        let pool = build_pool(&data, 3);

        assert!(matches!(
            resolve_constant(&pool, 2.into()),
            Err(Error::PoolTypeMismatch {
                found: "unknown",
                ..
            })
        ));
    }

    #[test]
    fn out_of_range_indices() {
        let data = utf8_entry("x");
        let pool = build_pool(&data, 2);

        assert!(matches!(
            resolve_utf8(&pool, 0.into()),
            Err(Error::PoolIndexOutOfRange(_))
        ));
        assert!(matches!(
            resolve_utf8(&pool, 9.into()),
            Err(Error::PoolIndexOutOfRange(_))
        ));
    }
}
