//! Runtime Error Handling
//!
//! Provides thread-local error state so the exported pool functions can
//! report failures without panicking across the FFI boundary.
//!
//! # Usage
//!
//! Exported functions record the error and return a zero value:
//! ```ignore
//! Err(e) => {
//!     set_pool_error("push", &e);
//!     return 0;
//! }
//! ```
//!
//! Callers check after any call whose zero result is ambiguous:
//! ```c
//! size_t h = stackpool_push(42, head);
//! if (stackpool_has_error()) {
//!     fprintf(stderr, "%s\n", stackpool_take_error());
//! }
//! ```

use stackpool_core::PoolError;
use std::cell::RefCell;
use std::ffi::{CString, c_char};
use std::ptr;

/// Error code reported when a call panicked inside the runtime
pub const PANIC_ERROR_CODE: i32 = -1;

/// The most recent failure on this thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    /// [`PoolError::code`], or [`PANIC_ERROR_CODE`]
    pub code: i32,
    pub message: String,
}

thread_local! {
    /// Thread-local storage for the last runtime error
    static LAST_ERROR: RefCell<Option<RuntimeError>> = const { RefCell::new(None) };

    /// Cached C string for FFI access (avoids allocation on every get)
    static ERROR_CSTRING: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last runtime error
///
/// Note: This clears any cached CString to prevent stale pointer access.
pub fn set_runtime_error(code: i32, msg: impl Into<String>) {
    ERROR_CSTRING.with(|cs| *cs.borrow_mut() = None);
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = Some(RuntimeError {
            code,
            message: msg.into(),
        });
    });
}

/// Record a pool error raised by the operation `op`
pub fn set_pool_error(op: &str, error: &PoolError) {
    set_runtime_error(error.code(), format!("{}: {}", op, error));
}

/// Take (and clear) the last runtime error
pub fn take_runtime_error() -> Option<RuntimeError> {
    LAST_ERROR.with(|e| e.borrow_mut().take())
}

/// Check if there's a pending runtime error
pub fn has_runtime_error() -> bool {
    LAST_ERROR.with(|e| e.borrow().is_some())
}

/// Clear any pending runtime error
pub fn clear_runtime_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
    ERROR_CSTRING.with(|e| *e.borrow_mut() = None);
}

/// Format a panic payload into an error message
pub fn format_panic_payload(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Cache `msg` as a C string and return a pointer into the cache
fn cache_cstring(msg: &str) -> *const c_char {
    // Replace null bytes with '?' to preserve error content
    let safe_msg: String = msg
        .chars()
        .map(|c| if c == '\0' { '?' } else { c })
        .collect();
    ERROR_CSTRING.with(|cs| match CString::new(safe_msg) {
        Ok(cstring) => {
            let ptr = cstring.as_ptr();
            *cs.borrow_mut() = Some(cstring);
            ptr
        }
        Err(_) => ptr::null(),
    })
}

// FFI-safe error access functions

/// Check if there's a pending runtime error (FFI-safe)
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_has_error() -> bool {
    has_runtime_error()
}

/// Numeric code of the pending error, or 0 if there is none (FFI-safe)
///
/// Codes: 1 out of memory, 2 pool exhausted, 3 pool not initialized,
/// 4 invalid handle, 5 empty stack, -1 internal panic.
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_last_error_code() -> i32 {
    LAST_ERROR.with(|e| e.borrow().as_ref().map_or(0, |err| err.code))
}

/// Get the last error message as a C string pointer (FFI-safe)
///
/// Returns null if no error is pending.
///
/// # WARNING: Pointer Lifetime
/// The returned pointer is only valid until the next call to `set_runtime_error`,
/// `get_error`, `take_error`, or `clear_error`. Callers must copy the string
/// immediately if they need to retain it.
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_get_error() -> *const c_char {
    let msg = LAST_ERROR.with(|e| e.borrow().as_ref().map(|err| err.message.clone()));
    match msg {
        Some(msg) => cache_cstring(&msg),
        None => ptr::null(),
    }
}

/// Take (and clear) the last error, returning it as a C string (FFI-safe)
///
/// Returns null if no error is pending.
///
/// # WARNING: Pointer Lifetime
/// Same as [`stackpool_get_error`].
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_take_error() -> *const c_char {
    match take_runtime_error() {
        Some(err) => cache_cstring(&err.message),
        None => ptr::null(),
    }
}

/// Clear any pending error (FFI-safe)
#[unsafe(no_mangle)]
pub extern "C" fn stackpool_clear_error() {
    clear_runtime_error();
}
