//! Thread-local Stack Pool behind a flat C ABI
//!
//! Every exported function operates on one implicit pool per OS thread.
//! Handles and values cross the boundary as plain integers, so a binding
//! layer only has to declare argument and return types.
//!
//! Error convention: each call first clears the pending error. On failure
//! it records the error (see [`crate::error`]) and returns `0`, which is
//! the sentinel handle for handle-returning calls.
//!
//! ```c
//! stackpool_empty_pool();
//! size_t h = stackpool_stack();
//! h = stackpool_push(10, h);
//! h = stackpool_push(100, h);
//! long n = stackpool_size(h);          // 2
//! long top = stackpool_value(h);       // 100
//! h = stackpool_pop(h);
//! stackpool_delete_pool();
//! ```
//!
//! Safety:
//! - Thread-local = no synchronization needed
//! - A pool created on one thread is invisible to the others
//! - Panics never unwind into the caller; they become errors

use crate::error::{
    PANIC_ERROR_CODE, clear_runtime_error, format_panic_payload, set_pool_error,
    set_runtime_error,
};
use stackpool_core::{Handle, PoolConfig, Result, StackPool};
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

// Thread-local storage for the pool
thread_local! {
    static STACK_POOL: RefCell<StackPool> =
        RefCell::new(StackPool::uninitialized(PoolConfig::default()));
}

/// Run `f` against this thread's pool, translating failures for the C ABI
///
/// Returns `T::default()` (zero / sentinel) after recording the error.
fn with_pool<T, F>(op: &str, f: F) -> T
where
    T: Default,
    F: FnOnce(&mut StackPool) -> Result<T>,
{
    clear_runtime_error();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        STACK_POOL.with(|pool| f(&mut pool.borrow_mut()))
    }));
    match outcome {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            debug!(op, error = %e, "pool call failed");
            set_pool_error(op, &e);
            T::default()
        }
        Err(payload) => {
            let msg = format_panic_payload(&payload);
            set_runtime_error(PANIC_ERROR_CODE, format!("{}: panic: {}", op, msg));
            T::default()
        }
    }
}

/// Replace this thread's pool with a fresh one built from `config`
fn reset_pool(op: &str, config: PoolConfig) {
    with_pool(op, |pool| {
        pool.teardown();
        let capacity = config.capacity;
        *pool = StackPool::new(config)?;
        debug!(capacity, "thread pool created");
        Ok(())
    })
}

/// Size of a stack as the C `long` the binding expects
fn size_to_i64(size: usize) -> i64 {
    i64::try_from(size).unwrap_or(i64::MAX)
}

/// Create (or reset) this thread's pool with the environment's capacity
///
/// `STACKPOOL_CAPACITY` defaults to 0, which grows the arena lazily.
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_empty_pool() {
    reset_pool("empty_pool", PoolConfig::from_env());
}

/// Create (or reset) this thread's pool with `capacity` reserved nodes
///
/// Policy and strictness come from the environment (`STACKPOOL_POLICY`,
/// `STACKPOOL_STRICT_POP`).
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_pool(capacity: usize) {
    reset_pool("pool", PoolConfig::from_env().with_capacity(capacity));
}

/// Release this thread's pool; later calls fail until a pool is created
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_delete_pool() {
    with_pool("delete_pool", |pool| {
        pool.teardown();
        Ok(())
    })
}

/// Handle of a new, empty stack (always 0)
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_stack() -> usize {
    with_pool("stack", |pool| Ok(pool.new_stack().into_raw()))
}

/// The sentinel handle (always 0)
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_end() -> usize {
    Handle::SENTINEL.into_raw()
}

/// Number of values on the stack at `head`
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_size(head: usize) -> i64 {
    with_pool("size", |pool| {
        pool.size(Handle::from_raw(head)).map(size_to_i64)
    })
}

/// Push `value` onto the stack at `head`, returning the new head
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_push(value: i64, head: usize) -> usize {
    with_pool("push", |pool| {
        pool.push(value, Handle::from_raw(head))
            .map(Handle::into_raw)
    })
}

/// Pop the stack at `head`, returning the new head
///
/// Popping the empty stack returns 0 without an error unless
/// `STACKPOOL_STRICT_POP` was set when the pool was created.
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_pop(head: usize) -> usize {
    with_pool("pop", |pool| {
        pool.pop(Handle::from_raw(head)).map(Handle::into_raw)
    })
}

/// Value at the top of the stack at `head`
///
/// The empty stack has no value: returns 0 and records an invalid-handle
/// error.
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_value(head: usize) -> i64 {
    with_pool("value", |pool| pool.value(Handle::from_raw(head)))
}

/// Return a whole stack to the pool, returning the empty handle
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_free_stack(head: usize) -> usize {
    with_pool("free_stack", |pool| {
        pool.free_stack(Handle::from_raw(head))
            .map(Handle::into_raw)
    })
}

/// Run `f` with read access to this thread's pool
///
/// For Rust callers that want iteration or statistics on the same pool
/// the exported functions use.
pub fn with_thread_pool<R>(f: impl FnOnce(&StackPool) -> R) -> R {
    STACK_POOL.with(|pool| f(&pool.borrow()))
}
