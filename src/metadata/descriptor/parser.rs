use std::{iter::Peekable, str::Chars};

use crate::{
    metadata::descriptor::{BaseType, FieldType, MethodType},
    Result,
};

/// Recursion guard for deeply nested array descriptors.
const MAX_ARRAY_DEPTH: usize = 255;

/// Parse a complete field descriptor string (`I`, `[[J`, `Ljava/util/List;`).
///
/// # Errors
/// Returns an error if the descriptor is empty, truncated, or carries an
/// unterminated class name.
///
/// # Examples
///
/// ```rust
/// use cafescope::metadata::descriptor::{parse_field_descriptor, BaseType, FieldType};
///
/// let parsed = parse_field_descriptor("[[I")?;
/// assert_eq!(
///     parsed,
///     FieldType::array(FieldType::array(FieldType::Base(BaseType::Int)))
/// );
/// # Ok::<(), cafescope::Error>(())
/// ```
pub fn parse_field_descriptor(descriptor: &str) -> Result<FieldType> {
    DescriptorParser::new(descriptor).parse_field_type()
}

/// Parse a complete method descriptor string (`(ILjava/lang/String;)Z`).
///
/// # Errors
/// Returns an error if the leading `(` is missing, the parameter list is
/// unterminated, or the return type is absent or malformed.
pub fn parse_method_descriptor(descriptor: &str) -> Result<MethodType> {
    DescriptorParser::new(descriptor).parse_method_type()
}

/// Character cursor over a descriptor string, with one-character lookahead.
///
/// The two grammars (field type and method type) are implemented as recursive
/// descent over this cursor. Each recursion consumes strictly forward, so no
/// backtracking state is needed.
///
/// A parser instance should not be re-used across descriptors; create one per
/// input (the free functions [`parse_field_descriptor`] and
/// [`parse_method_descriptor`] do exactly that).
pub struct DescriptorParser<'a> {
    chars: Peekable<Chars<'a>>,
    depth: usize,
}

impl<'a> DescriptorParser<'a> {
    /// Create a new parser over a descriptor string.
    #[must_use]
    pub fn new(descriptor: &'a str) -> Self {
        DescriptorParser {
            chars: descriptor.chars().peekable(),
            depth: 0,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next()
    }

    /// Consume characters up to (not including) `terminator`.
    ///
    /// Fails if the input ends before the terminator appears.
    fn read_until(&mut self, terminator: char) -> Result<String> {
        let mut buffer = String::new();
        loop {
            match self.peek() {
                Some(c) if c == terminator => return Ok(buffer),
                Some(c) => {
                    buffer.push(c);
                    self.advance();
                }
                None => {
                    return Err(malformed_error!(
                        "Descriptor ended before '{}' terminator",
                        terminator
                    ))
                }
            }
        }
    }

    /// Parse one field type at the current position.
    ///
    /// Single-character dispatch: `B C D F I J S Z` are primitives, `L…;` is a
    /// class reference (binary name split on `/`), `[` recurses into the array
    /// component. Any other character is the void sentinel, which the method
    /// grammar uses for `V` return types.
    ///
    /// # Errors
    /// Returns an error on empty input, an unterminated class name, or a
    /// truncated array component.
    pub fn parse_field_type(&mut self) -> Result<FieldType> {
        let Some(term) = self.advance() else {
            return Err(malformed_error!("Descriptor ended where a type was expected"));
        };

        match term {
            'B' => Ok(FieldType::Base(BaseType::Byte)),
            'C' => Ok(FieldType::Base(BaseType::Char)),
            'D' => Ok(FieldType::Base(BaseType::Double)),
            'F' => Ok(FieldType::Base(BaseType::Float)),
            'I' => Ok(FieldType::Base(BaseType::Int)),
            'J' => Ok(FieldType::Base(BaseType::Long)),
            'S' => Ok(FieldType::Base(BaseType::Short)),
            'Z' => Ok(FieldType::Base(BaseType::Boolean)),
            'L' => {
                let class_name = self.read_until(';')?;
                self.advance();

                Ok(FieldType::Reference(
                    class_name.split('/').map(str::to_string).collect(),
                ))
            }
            '[' => {
                self.depth += 1;
                if self.depth > MAX_ARRAY_DEPTH {
                    return Err(malformed_error!(
                        "Array descriptor exceeds {} dimensions",
                        MAX_ARRAY_DEPTH
                    ));
                }

                let component = self.parse_field_type()?;
                self.depth -= 1;
                Ok(FieldType::Array(Box::new(component)))
            }
            _ => Ok(FieldType::Base(BaseType::Void)),
        }
    }

    /// Parse a method type at the current position: `(`, zero or more field
    /// types until `)`, then exactly one return type.
    ///
    /// # Errors
    /// Returns an error if the opening parenthesis is missing, the parameter
    /// list is unterminated, or the return type is malformed.
    pub fn parse_method_type(&mut self) -> Result<MethodType> {
        if self.advance() != Some('(') {
            return Err(malformed_error!("Method descriptor must start with '('"));
        }

        let mut parameters = Vec::new();
        loop {
            match self.peek() {
                Some(')') => break,
                Some(_) => parameters.push(self.parse_field_type()?),
                None => {
                    return Err(malformed_error!(
                        "Method descriptor parameter list is unterminated"
                    ))
                }
            }
        }
        self.advance();

        let return_type = self.parse_field_type()?;
        Ok(MethodType {
            parameters,
            return_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives() {
        assert_eq!(
            parse_field_descriptor("I").unwrap(),
            FieldType::Base(BaseType::Int)
        );
        assert_eq!(
            parse_field_descriptor("Z").unwrap(),
            FieldType::Base(BaseType::Boolean)
        );
        assert_eq!(
            parse_field_descriptor("J").unwrap(),
            FieldType::Base(BaseType::Long)
        );
    }

    #[test]
    fn class_reference() {
        assert_eq!(
            parse_field_descriptor("Ljava/lang/String;").unwrap(),
            FieldType::reference(&["java", "lang", "String"])
        );
    }

    #[test]
    fn nested_arrays() {
        assert_eq!(
            parse_field_descriptor("[[I").unwrap(),
            FieldType::array(FieldType::array(FieldType::Base(BaseType::Int)))
        );
    }

    #[test]
    fn array_of_references() {
        assert_eq!(
            parse_field_descriptor("[Ljava/lang/Object;").unwrap(),
            FieldType::array(FieldType::reference(&["java", "lang", "Object"]))
        );
    }

    #[test]
    fn method_descriptor() {
        let method = parse_method_descriptor("(ILjava/lang/String;)Z").unwrap();
        assert_eq!(
            method.parameters,
            vec![
                FieldType::Base(BaseType::Int),
                FieldType::reference(&["java", "lang", "String"]),
            ]
        );
        assert_eq!(method.return_type, FieldType::Base(BaseType::Boolean));
    }

    #[test]
    fn method_no_parameters() {
        let method = parse_method_descriptor("()V").unwrap();
        assert!(method.parameters.is_empty());
        assert_eq!(method.return_type, FieldType::Base(BaseType::Void));
    }

    #[test]
    fn unterminated_class_name() {
        assert!(parse_field_descriptor("Ljava/lang/String").is_err());
    }

    #[test]
    fn truncated_array() {
        assert!(parse_field_descriptor("[").is_err());
    }

    #[test]
    fn missing_open_paren() {
        assert!(parse_method_descriptor("I)V").is_err());
    }

    #[test]
    fn unterminated_parameter_list() {
        assert!(parse_method_descriptor("(I").is_err());
    }

    #[test]
    fn missing_return_type() {
        assert!(parse_method_descriptor("(I)").is_err());
    }
}
