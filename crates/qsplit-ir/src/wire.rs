//! Wire identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a wire (qubit line) within a circuit document.
///
/// Wires are only ever appended, so an id stays valid across every stage
/// that consumes the document it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireId(pub u32);

impl WireId {
    /// The wire index as a `usize`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The wire `offset` rows below this one.
    #[must_use]
    pub fn offset_by(self, offset: usize) -> Self {
        Self::from(self.index() + offset)
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for WireId {
    fn from(id: u32) -> Self {
        WireId(id)
    }
}

impl From<usize> for WireId {
    fn from(id: usize) -> Self {
        WireId(u32::try_from(id).expect("WireId overflow: exceeds u32::MAX"))
    }
}
