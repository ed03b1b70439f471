//! Stackpool Core: many integer stacks sharing one node arena
//!
//! Every stack is a singly-linked list whose nodes live in a single arena
//! owned by a [`StackPool`]. Callers never see addresses, only numeric
//! [`Handle`]s to the head node of a stack, so stacks can be passed across
//! an FFI boundary as plain integers.
//!
//! Key design principles:
//! - Handle: `0` is the empty stack, `n` is arena slot `n - 1`
//! - Pool: owns the arena and a LIFO free list of popped slots
//! - Validation: every handle is checked before it is dereferenced
//!
//! # Modules
//!
//! - `handle`: the handle type and its sentinel
//! - `error`: `PoolError` and the crate `Result`
//! - `config`: capacity policy and strictness, from TOML or environment
//! - `pool`: the arena, free list and stack operations
//! - `iter`: borrowing iterators over one stack
//! - `utils`: whole-stack helpers (`push_all`, `to_vec`, `stack_size`)
//! - `stats`: arena usage snapshot

pub mod config;
pub mod error;
pub mod handle;
pub mod iter;
pub mod pool;
pub mod stats;
pub mod utils;

pub use config::{CapacityPolicy, PoolConfig};
pub use error::{HandleFault, PoolError, Result};
pub use handle::Handle;
pub use iter::{Handles, StackIter};
pub use pool::{StackDisplay, StackPool};
pub use stats::PoolStats;
pub use utils::{push_all, stack_size, to_vec};
