use thiserror::Error;

use crate::metadata::index::PoolIndex;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all error conditions that can occur while decoding a class file, parsing
/// descriptors, disassembling bytecode, or resolving constant-pool references. Each variant
/// provides specific context about the failure mode to enable appropriate error handling.
///
/// # Error Categories
///
/// ## Structural Decode Errors
/// - [`Error::InvalidMagic`] - The input does not start with the class-file magic number
/// - [`Error::Malformed`] - Corrupted or invalid file structure, including malformed descriptors
/// - [`Error::OutOfBounds`] - Attempted to read beyond buffer boundaries
/// - [`Error::Empty`] - Empty input provided
///
/// ## Reference Resolution Errors
/// - [`Error::PoolIndexOutOfRange`] - Constant-pool index outside the valid 1-based range
/// - [`Error::PoolTypeMismatch`] - Resolved entry has a different tag than the caller expected
///   (also raised when an index lands on the phantom slot after a long/double entry)
///
/// ## Unsupported Constructs
/// - [`Error::UnknownOpcode`] - An opcode with no registered operand rule in the code stream
/// - [`Error::WideUnsupported`] - The `wide` prefix instruction
/// - [`Error::UnknownArrayType`] - A `newarray` type code outside the defined 4..=11 range
///
/// ## I/O Errors
/// - [`Error::FileError`] - Filesystem I/O errors while mapping or reading input
///
/// # Examples
///
/// ```rust,no_run
/// use cafescope::{Error, metadata::class::JavaClass};
/// use std::path::Path;
///
/// match JavaClass::from_file(Path::new("Example.class")) {
///     Ok(class) => {
///         println!("Decoded {}", class.this_class.join("."));
///     }
///     Err(Error::InvalidMagic(magic)) => {
///         eprintln!("Not a class file (magic 0x{:08x})", magic);
///     }
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed file: {} ({}:{})", message, file, line);
///     }
///     Err(e) => {
///         eprintln!("Other error: {}", e);
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input does not begin with the `0xCAFEBABE` magic number.
    ///
    /// The associated value is the 32-bit value that was found instead.
    #[error("Invalid class file magic - 0x{0:08x}")]
    InvalidMagic(u32),

    /// The file is damaged and could not be decoded.
    ///
    /// This error indicates that the structure does not conform to the class file
    /// format. The error includes the source location where the malformation was
    /// detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while decoding the input.
    ///
    /// This error occurs when trying to read data beyond the end of the buffer.
    /// It's a safety check to prevent buffer overruns during decoding.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while opening or mapping the
    /// input file.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// A constant-pool index is outside the valid range of the pool.
    ///
    /// Pool indices are 1-based; index 0 and indices at or beyond the pool count
    /// are never valid.
    #[error("Constant pool index out of range - {0}")]
    PoolIndexOutOfRange(PoolIndex),

    /// A constant-pool entry does not have the tag the caller expected.
    ///
    /// Raised by every resolver when the entry at `index` is of a different kind,
    /// including the phantom placeholder slot that follows a long or double entry.
    #[error("Constant pool entry {index} is a {found}, expected {expected}")]
    PoolTypeMismatch {
        /// The index that was resolved
        index: PoolIndex,
        /// The entry kind the caller expected
        expected: &'static str,
        /// The entry kind that was actually found
        found: &'static str,
    },

    /// The code stream contains an opcode with no registered operand rule.
    ///
    /// Continuing past such an opcode would desynchronize every subsequent
    /// instruction offset, so the method decode fails instead.
    #[error("Unknown opcode 0x{opcode:02x} at offset {offset}")]
    UnknownOpcode {
        /// The opcode byte that was read
        opcode: u8,
        /// Byte offset of the opcode within the code array
        offset: usize,
    },

    /// The `wide` prefix instruction was encountered.
    ///
    /// Decoding it correctly requires re-dispatching the following opcode under
    /// 16-bit operand widths, which this disassembler does not support. Failing
    /// is preferred over silently misreading the stream.
    #[error("The wide instruction at offset {0} is not supported")]
    WideUnsupported(usize),

    /// A `newarray` instruction carries a type code outside the defined table.
    ///
    /// Valid codes are 4 (boolean) through 11 (long).
    #[error("Unknown primitive array type code - {0}")]
    UnknownArrayType(u8),
}
