//! Pool statistics for debugging/profiling

use std::fmt;

/// Snapshot of arena usage
///
/// `live + free == slots` always holds for an initialized pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Nodes currently part of some stack
    pub live: usize,
    /// Slots waiting on the free list
    pub free: usize,
    /// Slots the arena has handed out so far
    pub slots: usize,
    /// Slots reserved without reallocating
    pub capacity: usize,
}

impl fmt::Display for PoolStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "live={} free={} slots={} capacity={}",
            self.live, self.free, self.slots, self.capacity
        )
    }
}
