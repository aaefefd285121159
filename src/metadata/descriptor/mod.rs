//! Type descriptor grammars.
//!
//! Field and method signatures in a class file are stored as compact descriptor
//! strings (`I`, `Ljava/lang/String;`, `([BI)V`). This module provides the value
//! trees for decoded signatures and the recursive-descent parser that produces them.
//!
//! # Key Types
//! - [`BaseType`] - The primitive leaves (plus `void`)
//! - [`FieldType`] - Recursive field type: primitive, reference, or array
//! - [`MethodType`] - Parameter list plus return type
//! - [`DescriptorParser`] - Character cursor with one-character lookahead
//!
//! # Example
//! ```rust
//! use cafescope::metadata::descriptor::{parse_method_descriptor, BaseType, FieldType};
//!
//! let method = parse_method_descriptor("(ILjava/lang/String;)Z")?;
//! assert_eq!(method.parameters.len(), 2);
//! assert_eq!(method.return_type, FieldType::Base(BaseType::Boolean));
//! # Ok::<(), cafescope::Error>(())
//! ```

mod parser;
mod types;

pub use parser::{parse_field_descriptor, parse_method_descriptor, DescriptorParser};
pub use types::{BaseType, FieldType, MethodType};
