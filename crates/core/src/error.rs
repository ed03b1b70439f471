//! Pool error types
//!
//! Every failure is a broken calling contract rather than a transient
//! condition, so nothing here is retried. Errors go straight back to the
//! immediate caller; the C ABI layer turns them into a last-error slot.

use crate::handle::Handle;

/// Why a handle was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleFault {
    /// Handle is past the end of the arena
    OutOfRange,
    /// Handle names a slot that is currently on the free list
    Freed,
    /// The sentinel was passed where a live node is required
    Sentinel,
    /// Following `next` links from this handle never reaches the sentinel
    Cycle,
}

impl std::fmt::Display for HandleFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandleFault::OutOfRange => write!(f, "out of range"),
            HandleFault::Freed => write!(f, "node was popped"),
            HandleFault::Sentinel => write!(f, "empty stack has no node"),
            HandleFault::Cycle => write!(f, "chain links back on itself"),
        }
    }
}

/// Error type for all pool operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The arena could not be reserved or grown
    OutOfMemory {
        /// Number of slots that were requested
        requested: usize,
    },
    /// Fixed-capacity pool with every slot in use
    PoolExhausted {
        /// The configured slot limit
        capacity: usize,
    },
    /// Operation attempted before `init` or after `teardown`
    PoolNotInitialized,
    /// Handle does not name a live node
    InvalidHandle {
        handle: Handle,
        reason: HandleFault,
    },
    /// `pop` on an empty stack with `strict_pop` enabled
    EmptyStack,
}

impl PoolError {
    /// Stable numeric code for the C ABI (0 means "no error")
    pub fn code(&self) -> i32 {
        match self {
            PoolError::OutOfMemory { .. } => 1,
            PoolError::PoolExhausted { .. } => 2,
            PoolError::PoolNotInitialized => 3,
            PoolError::InvalidHandle { .. } => 4,
            PoolError::EmptyStack => 5,
        }
    }

    pub(crate) fn invalid(handle: Handle, reason: HandleFault) -> Self {
        PoolError::InvalidHandle { handle, reason }
    }
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::OutOfMemory { requested } => {
                write!(f, "out of memory: cannot reserve {} stack nodes", requested)
            }
            PoolError::PoolExhausted { capacity } => {
                write!(f, "pool exhausted: all {} stack nodes in use", capacity)
            }
            PoolError::PoolNotInitialized => write!(f, "pool is not initialized"),
            PoolError::InvalidHandle { handle, reason } => {
                write!(f, "invalid handle {}: {}", handle, reason)
            }
            PoolError::EmptyStack => write!(f, "stack is empty"),
        }
    }
}

impl std::error::Error for PoolError {}

/// Result alias used throughout the pool
pub type Result<T> = std::result::Result<T, PoolError>;
