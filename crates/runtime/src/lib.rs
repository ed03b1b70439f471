//! Stackpool Runtime: the stack pool as a C-callable shared library
//!
//! Exposes the operations of [`stackpool_core::StackPool`] as
//! `extern "C"` functions over one implicit pool per thread, so a foreign
//! binding (ctypes, cffi, a C program) can drive it with plain integers.
//!
//! # Modules
//!
//! - `pool`: the thread-local pool and the exported stack operations
//! - `error`: thread-local last-error state readable over the ABI

pub mod error;
pub mod pool;

// Re-export the pure pool for Rust callers
pub use stackpool_core::{Handle, PoolConfig, PoolError, StackPool};

// Stack operations (exported for C linking)
pub use pool::{
    stackpool_delete_pool as delete_pool, stackpool_empty_pool as empty_pool,
    stackpool_end as end, stackpool_free_stack as free_stack, stackpool_pool as create_pool,
    stackpool_pop as pop, stackpool_push as push, stackpool_size as size,
    stackpool_stack as stack, stackpool_value as value, with_thread_pool,
};

// Error handling
pub use error::{
    RuntimeError, clear_runtime_error, has_runtime_error, stackpool_clear_error as clear_error,
    stackpool_get_error as get_error, stackpool_has_error as has_error,
    stackpool_last_error_code as last_error_code, stackpool_take_error as take_error,
    take_runtime_error,
};
