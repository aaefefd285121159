//! Fully assembled class view.
//!
//! [`JavaClass`] is the main entry point of the crate: it runs the raw structural
//! decode ([`crate::metadata::classfile::ClassFile`]), then resolves every
//! declaration through the constant pool - class paths, member names, parsed
//! descriptors, decoded attributes - and disassembles each method's bytecode into
//! its instruction list.
//!
//! # Per-method error containment
//!
//! A structural error in the outer layout aborts the whole decode. A failure while
//! disassembling one method's code does not: the assembled [`Method`] keeps its
//! decoded attributes and records the failure in [`Method::code_error`], leaving
//! the rest of the class usable.
//!
//! # Local variable names
//!
//! When a method carries a `LocalVariableTable` debug attribute, its rows provide
//! the slot names. Without one, default names are synthesized: slot 0 is `this`
//! (typed as a reference to the declaring class) for instance methods, and each
//! parameter gets `arg0`, `arg1`, ... in order. `long` and `double` parameters,
//! which occupy two slots at runtime, still get a single synthesized name; the
//! synthesized table is a naming aid, not a slot-accurate model.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use cafescope::metadata::class::JavaClass;
//! use std::path::Path;
//!
//! let class = JavaClass::from_file(Path::new("Example.class"))?;
//! println!("class {}", class.this_class.join("."));
//! for method in &class.methods {
//!     println!("  {} {} - {} instructions", method.name, method.descriptor,
//!         method.instructions.len());
//! }
//! # Ok::<(), cafescope::Error>(())
//! ```

use std::{collections::BTreeMap, path::Path};

use crate::{
    disassembler::{decode_stream, Instruction},
    file::File,
    metadata::{
        access::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags},
        attributes::{decode_attribute, Attribute, CodeAttribute, LocalVariable},
        classfile::{ClassFile, FieldInfo, MethodInfo},
        descriptor::{
            parse_field_descriptor, parse_method_descriptor, FieldType, MethodType,
        },
        pool::ConstantPool,
        resolver::{resolve_class_path, resolve_utf8},
    },
    Error, Parser, Result,
};

/// A fully resolved field declaration.
#[derive(Debug)]
pub struct Field {
    /// Declared access flags
    pub access_flags: FieldAccessFlags,
    /// The field's name
    pub name: String,
    /// The field's parsed type
    pub descriptor: FieldType,
    /// Decoded attributes (`ConstantValue` for constants, `Unknown` otherwise)
    pub attributes: Vec<Attribute>,
}

/// A fully resolved method declaration, with disassembled bytecode.
#[derive(Debug)]
pub struct Method {
    /// Declared access flags
    pub access_flags: MethodAccessFlags,
    /// The method's name (`<init>` for constructors)
    pub name: String,
    /// The method's parsed signature
    pub descriptor: MethodType,
    /// All decoded attributes, including the `Code` attribute itself
    pub attributes: Vec<Attribute>,
    /// The disassembled instruction list; empty for `abstract`/`native` methods
    /// and for methods whose code failed to decode
    pub instructions: Vec<Instruction>,
    /// Local variable info keyed by slot index: debug-table rows when present,
    /// synthesized `this`/`argN` names otherwise
    pub local_variables: BTreeMap<u16, LocalVariable>,
    /// The error that aborted this method's disassembly, if any
    pub code_error: Option<Error>,
}

impl Method {
    /// The method's decoded `Code` attribute, if it has a body.
    #[must_use]
    pub fn code_attribute(&self) -> Option<&CodeAttribute> {
        self.attributes.iter().find_map(|attribute| match attribute {
            Attribute::Code(code) => Some(code),
            _ => None,
        })
    }

    /// Returns `true` if this method has no `this` receiver.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::STATIC)
    }
}

/// A fully assembled class: every index resolved, every method disassembled.
///
/// Construction consumes an input buffer and produces an independent owned tree;
/// nothing in the result borrows from the input.
#[derive(Debug)]
pub struct JavaClass {
    /// Minor format version
    pub minor_version: u16,
    /// Major format version
    pub major_version: u16,
    /// Declared access flags of the class
    pub access_flags: ClassAccessFlags,
    /// Path segments of this class's binary name
    pub this_class: Vec<String>,
    /// Path segments of the superclass; `None` only for `java/lang/Object`
    pub super_class: Option<Vec<String>>,
    /// Resolved paths of the directly implemented interfaces
    pub interfaces: Vec<Vec<String>>,
    /// Resolved field declarations
    pub fields: Vec<Field>,
    /// Resolved method declarations
    pub methods: Vec<Method>,
    /// Decoded class-level attributes
    pub attributes: Vec<Attribute>,
    /// The constant pool, kept for on-demand operand resolution
    pub constant_pool: ConstantPool,
}

fn assemble_field(info: &FieldInfo, pool: &ConstantPool) -> Result<Field> {
    let name = resolve_utf8(pool, info.name_index)?.to_string();
    let descriptor = parse_field_descriptor(resolve_utf8(pool, info.descriptor_index)?)?;

    let mut attributes = Vec::with_capacity(info.attributes.len());
    for attribute in &info.attributes {
        attributes.push(decode_attribute(attribute, pool)?);
    }

    Ok(Field {
        access_flags: info.access_flags,
        name,
        descriptor,
        attributes,
    })
}

/// Synthesize default slot names when no debug table is available.
///
/// Slot 0 is `this` for instance methods; each declared parameter claims the next
/// slot with an `argN` name. Wide parameters are deliberately given one slot.
fn synthesize_local_variables(
    method_flags: MethodAccessFlags,
    descriptor: &MethodType,
    this_class: &[String],
    code_length: usize,
) -> BTreeMap<u16, LocalVariable> {
    let length = code_length.min(usize::from(u16::MAX)) as u16;

    let mut variables = BTreeMap::new();
    let mut slot: u16 = 0;

    if !method_flags.contains(MethodAccessFlags::STATIC) {
        variables.insert(
            slot,
            LocalVariable {
                start_pc: 0,
                length,
                name: "this".to_string(),
                descriptor: FieldType::Reference(this_class.to_vec()),
                slot,
            },
        );
        slot += 1;
    }

    for (parameter_index, parameter) in descriptor.parameters.iter().enumerate() {
        variables.insert(
            slot,
            LocalVariable {
                start_pc: 0,
                length,
                name: format!("arg{parameter_index}"),
                descriptor: parameter.clone(),
                slot,
            },
        );
        slot += 1;
    }

    variables
}

fn assemble_method(info: &MethodInfo, pool: &ConstantPool, this_class: &[String]) -> Result<Method> {
    let name = resolve_utf8(pool, info.name_index)?.to_string();
    let descriptor = parse_method_descriptor(resolve_utf8(pool, info.descriptor_index)?)?;

    let mut attributes = Vec::with_capacity(info.attributes.len());
    for attribute in &info.attributes {
        attributes.push(decode_attribute(attribute, pool)?);
    }

    let mut instructions = Vec::new();
    let mut local_variables = BTreeMap::new();
    let mut code_error = None;

    let code = attributes.iter().find_map(|attribute| match attribute {
        Attribute::Code(code) => Some(code),
        _ => None,
    });

    if let Some(code) = code {
        let mut parser = Parser::new(&code.code);
        match decode_stream(&mut parser) {
            Ok(decoded) => instructions = decoded,
            Err(error) => code_error = Some(error),
        }

        let debug_table = code.attributes.iter().find_map(|attribute| match attribute {
            Attribute::LocalVariableTable(entries) => Some(entries),
            _ => None,
        });

        local_variables = match debug_table {
            Some(entries) => entries
                .iter()
                .map(|variable| (variable.slot, variable.clone()))
                .collect(),
            None => synthesize_local_variables(
                info.access_flags,
                &descriptor,
                this_class,
                code.code.len(),
            ),
        };
    }

    Ok(Method {
        access_flags: info.access_flags,
        name,
        descriptor,
        attributes,
        instructions,
        local_variables,
        code_error,
    })
}

impl JavaClass {
    /// Decode and assemble a class from a byte buffer.
    ///
    /// # Arguments
    /// * `data` - The complete class file image
    ///
    /// # Errors
    /// Returns an error for structural problems (bad magic, truncated records) and
    /// for resolution failures in declarations. Per-method disassembly failures are
    /// contained in [`Method::code_error`] instead.
    pub fn from_buffer(data: &[u8]) -> Result<JavaClass> {
        let class_file = ClassFile::parse(data)?;
        let pool = &class_file.constant_pool;

        let this_class = resolve_class_path(pool, class_file.this_class)?;

        let super_class = if class_file.super_class.is_null() {
            None
        } else {
            Some(resolve_class_path(pool, class_file.super_class)?)
        };

        let mut interfaces = Vec::with_capacity(class_file.interfaces.len());
        for interface in &class_file.interfaces {
            interfaces.push(resolve_class_path(pool, *interface)?);
        }

        let mut fields = Vec::with_capacity(class_file.fields.len());
        for field in &class_file.fields {
            fields.push(assemble_field(field, pool)?);
        }

        let mut methods = Vec::with_capacity(class_file.methods.len());
        for method in &class_file.methods {
            methods.push(assemble_method(method, pool, &this_class)?);
        }

        let mut attributes = Vec::with_capacity(class_file.attributes.len());
        for attribute in &class_file.attributes {
            attributes.push(decode_attribute(attribute, pool)?);
        }

        Ok(JavaClass {
            minor_version: class_file.minor_version,
            major_version: class_file.major_version,
            access_flags: class_file.access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
            constant_pool: class_file.constant_pool,
        })
    }

    /// Load, decode and assemble a class file from disk.
    ///
    /// The file is memory-mapped for the duration of the decode; the result owns
    /// all of its data.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] for I/O failures, plus everything
    /// [`JavaClass::from_buffer`] can return.
    pub fn from_file(path: &Path) -> Result<JavaClass> {
        let file = File::from_file(path)?;
        JavaClass::from_buffer(file.data())
    }

    /// Decode and assemble a class from an owned buffer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] for an empty buffer, plus everything
    /// [`JavaClass::from_buffer`] can return.
    pub fn from_mem(data: Vec<u8>) -> Result<JavaClass> {
        let file = File::from_mem(data)?;
        JavaClass::from_buffer(file.data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::descriptor::BaseType;

    #[test]
    fn synthesized_instance_locals() {
        let this_class = vec!["com".to_string(), "example".to_string(), "Box".to_string()];
        let descriptor = MethodType {
            parameters: vec![
                FieldType::Base(BaseType::Int),
                FieldType::Base(BaseType::Double),
            ],
            return_type: FieldType::Base(BaseType::Void),
        };

        let variables = synthesize_local_variables(
            MethodAccessFlags::PUBLIC,
            &descriptor,
            &this_class,
            16,
        );

        assert_eq!(variables.len(), 3);
        assert_eq!(variables[&0].name, "this");
        assert_eq!(
            variables[&0].descriptor,
            FieldType::Reference(this_class.clone())
        );
        assert_eq!(variables[&1].name, "arg0");
        // wide double parameter still claims a single synthesized slot
        assert_eq!(variables[&2].name, "arg1");
        assert_eq!(variables[&2].descriptor, FieldType::Base(BaseType::Double));
    }

    #[test]
    fn synthesized_static_locals_skip_this() {
        let descriptor = MethodType {
            parameters: vec![FieldType::Base(BaseType::Long)],
            return_type: FieldType::Base(BaseType::Void),
        };

        let variables = synthesize_local_variables(
            MethodAccessFlags::PUBLIC | MethodAccessFlags::STATIC,
            &descriptor,
            &[],
            4,
        );

        assert_eq!(variables.len(), 1);
        assert_eq!(variables[&0].name, "arg0");
    }
}
