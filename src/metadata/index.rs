//! Constant-pool index types.

use std::fmt;

/// A 1-based index into the constant pool of a class file.
///
/// Every symbolic cross-reference inside a class file (class names, member
/// references, string and numeric literals, attribute names) is stored as one of
/// these indices. Index 0 is reserved and never addresses an entry; certain fields
/// use it as an explicit "no entry" marker (e.g. the catch-all catch type).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolIndex(pub u16);

impl PoolIndex {
    /// Creates a new pool index from a raw 16-bit value
    #[must_use]
    pub fn new(value: u16) -> Self {
        PoolIndex(value)
    }

    /// Returns the raw index value
    #[must_use]
    pub fn value(&self) -> u16 {
        self.0
    }

    /// Returns true if this is the reserved null index (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u16> for PoolIndex {
    fn from(value: u16) -> Self {
        PoolIndex(value)
    }
}

impl From<PoolIndex> for u16 {
    fn from(index: PoolIndex) -> Self {
        index.0
    }
}

impl fmt::Debug for PoolIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolIndex(#{})", self.0)
    }
}

impl fmt::Display for PoolIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
