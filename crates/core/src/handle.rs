//! Stack handles
//!
//! A handle names either "no node" (the sentinel, `0`) or a node in the
//! pool's arena. Handles are plain integers so they can cross the C ABI
//! unchanged; they never carry a pointer.
//!
//! ```text
//! handle:   0        1        2        3      ...
//!           │        │        │        │
//!           sentinel slot[0]  slot[1]  slot[2]
//! ```

use std::fmt;

/// Opaque reference to the head node of a stack
///
/// A handle is only meaningful for the pool that produced it, and only
/// until the node it names is popped. After that the slot may be handed
/// out again by a later push, so callers must always continue with the
/// most recently returned handle.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(usize);

impl Handle {
    /// The empty-stack handle. Never indexes a real node.
    pub const SENTINEL: Handle = Handle(0);

    /// Wrap a raw handle value received from a caller
    #[inline]
    pub const fn from_raw(raw: usize) -> Self {
        Handle(raw)
    }

    /// The raw handle value handed out to callers
    #[inline]
    pub const fn into_raw(self) -> usize {
        self.0
    }

    /// Check if this is the empty-stack sentinel
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 == 0
    }

    /// Arena slot index for a non-sentinel handle
    #[inline]
    pub(crate) const fn slot(self) -> Option<usize> {
        self.0.checked_sub(1)
    }

    /// Handle for the node stored at arena slot `index`
    #[inline]
    pub(crate) const fn for_slot(index: usize) -> Self {
        Handle(index + 1)
    }
}

impl From<usize> for Handle {
    fn from(raw: usize) -> Self {
        Handle::from_raw(raw)
    }
}

impl From<Handle> for usize {
    fn from(handle: Handle) -> Self {
        handle.into_raw()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
