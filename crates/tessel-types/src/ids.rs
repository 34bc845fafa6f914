//! Strongly-typed identifiers for simulation entities.
//!
//! Newtype wrappers prevent accidental mixing of edge indices with
//! element indices or plugin instances.

use serde::{Deserialize, Serialize};

/// Dense index of a deduplicated edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

/// Index of a tetrahedral element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

/// Index of a plugin instance declared by the host model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl EdgeId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ElementId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl InstanceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for EdgeId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for ElementId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for InstanceId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
