//! Monotonic particle identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one spawned particle.
///
/// Ids are handed out by an [`IdAllocator`] in strictly increasing order and
/// are the only key used to remove a particle once its animation completes.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleId(pub u64);

impl ParticleId {
    /// Create a ParticleId from a raw value (for deserialization/testing)
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParticleId({})", self.0)
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owned id counter. One allocator lives as long as the trail that uses it,
/// so ids never repeat within that lifetime.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id
    pub fn allocate(&mut self) -> ParticleId {
        let id = ParticleId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.next
    }
}
