//! Handles into the IR arena.
//!
//! Every node (expression, statement, type, variable, function) lives in an
//! [`IrArena`](crate::IrArena) slot and is referenced by a `ValueId`. Owning
//! edges, back-references and observer registrations are all plain handles;
//! which of them implies ownership is decided by the edge, not the handle.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Index into the IR arena.
///
/// - Memory: 4 bytes (vs 8 bytes for a pointer)
/// - Identity: O(1) integer compare, which is what "same object" means in the IR
/// - `ValueId::INVALID` plays the role of a null reference
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ValueId(u32);

impl ValueId {
    /// Invalid value ID (null handle).
    pub const INVALID: ValueId = ValueId(u32::MAX);

    /// Create a new `ValueId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        ValueId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a valid (non-null) handle.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl Hash for ValueId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "ValueId({})", self.0)
        } else {
            write!(f, "ValueId::INVALID")
        }
    }
}

impl Default for ValueId {
    fn default() -> Self {
        Self::INVALID
    }
}
