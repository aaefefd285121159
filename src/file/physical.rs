//! Physical file backend for memory-mapped I/O.
//!
//! This module provides the [`crate::file::physical::Physical`] backend that implements the
//! [`crate::file::Backend`] trait for accessing class files from disk using memory-mapped
//! I/O. The operating system pages data in on demand, so even large archives of classes can
//! be opened without reading the entire content upfront.

use super::Backend;
use crate::{Error::FileError, Error::OutOfBounds, Result};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A file backend that uses memory-mapped I/O for efficient access to files on disk.
///
/// The file is mapped read-only and shared. All access operations include bounds
/// checking to ensure memory safety.
///
/// # Examples
///
/// ```rust,no_run
/// use cafescope::file::{Backend, Physical};
/// use std::path::Path;
///
/// let physical = Physical::new(Path::new("Example.class"))?;
///
/// // Every class file starts with the same four magic bytes
/// let magic = physical.data_slice(0, 4)?;
/// assert_eq!(magic, &[0xCA, 0xFE, 0xBA, 0xBE]);
/// # Ok::<(), cafescope::Error>(())
/// ```
#[derive(Debug)]
pub struct Physical {
    /// Memory-mapped file data
    data: Mmap,
}

impl Physical {
    /// Create a new physical file backend by memory-mapping the specified file.
    ///
    /// # Arguments
    /// * `path` - Path to the class file on disk. Accepts `&Path`, `&str`, `String`, or `PathBuf`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(error) => return Err(FileError(error)),
        };

        let mmap = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => mmap,
            Err(error) => return Err(FileError(error)),
        };

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if offset_end > self.data.len() {
            return Err(OutOfBounds);
        }

        Ok(&self.data[offset..offset_end])
    }

    fn data(&self) -> &[u8] {
        &self.data
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
