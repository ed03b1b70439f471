//! Borrowing iterators over a single stack
//!
//! Both iterators follow `next` links from a head handle and stop at the
//! sentinel. They also stop early at any handle that is not live, and
//! never take more steps than there are live nodes, so a chain damaged by
//! stale-handle misuse ends iteration instead of looping.

use crate::handle::Handle;
use crate::pool::StackPool;
use std::iter::FusedIterator;

/// Iterator over the handles of a stack's nodes, top first
pub struct Handles<'a> {
    pool: &'a StackPool,
    current: Handle,
    remaining: usize,
}

impl<'a> Handles<'a> {
    pub(crate) fn new(pool: &'a StackPool, head: Handle) -> Self {
        Handles {
            pool,
            current: head,
            remaining: pool.live_count(),
        }
    }

    /// Advance one node, yielding its handle and value
    fn step(&mut self) -> Option<(Handle, i64)> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.current;
        let (value, next) = self.pool.link(handle)?;
        self.current = next;
        self.remaining -= 1;
        Some((handle, value))
    }
}

impl Iterator for Handles<'_> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        self.step().map(|(handle, _)| handle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl FusedIterator for Handles<'_> {}

/// Iterator over the values of a stack, top first
///
/// # Example
///
/// ```
/// use stackpool_core::StackPool;
///
/// let mut pool = StackPool::empty().unwrap();
/// let mut h = pool.new_stack();
/// for v in [3, 1, 4, 1, 5] {
///     h = pool.push(v, h).unwrap();
/// }
/// assert_eq!(pool.iter(h).max(), Some(5));
/// assert_eq!(pool.iter(h).collect::<Vec<_>>(), vec![5, 1, 4, 1, 3]);
/// ```
pub struct StackIter<'a> {
    handles: Handles<'a>,
}

impl<'a> StackIter<'a> {
    pub(crate) fn new(pool: &'a StackPool, head: Handle) -> Self {
        StackIter {
            handles: Handles::new(pool, head),
        }
    }

    /// Handle of the node the next call to `next` will read
    ///
    /// The sentinel once the stack is exhausted.
    pub fn position(&self) -> Handle {
        self.handles.current
    }
}

impl Iterator for StackIter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        self.handles.step().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.handles.size_hint()
    }
}

impl FusedIterator for StackIter<'_> {}
