//! Stack Pool - many singly-linked integer stacks sharing one arena
//!
//! Instead of allocating a node per push, every stack draws its nodes from
//! a single arena of slots. Popped slots go onto a free list threaded
//! through the slots themselves and are handed out again, newest first.
//!
//! Design:
//! - A stack is just a [`Handle`] to its head node; the sentinel is empty
//! - Free list is LIFO so recently touched slots are reused first
//! - Arena grows on demand, or stops at `capacity` with a fixed policy
//! - Every handle is checked against slot liveness before it is read
//!
//! ```text
//! handle:     1             2            3           4              5
//! slots:   [ Live 10 →0 ][ Live 2 →0 ][ Free →0 ][ Live 100 →1 ][ Free →3 ]
//!
//! stack A = 4   (100, 10)
//! stack B = 2   (2)
//! free    = 5 → 3
//! ```
//!
//! Lifecycle: `Uninitialized → Initialized` via [`StackPool::init`],
//! back via [`StackPool::teardown`]. Re-initializing resets in place and
//! invalidates every outstanding handle.

use crate::config::PoolConfig;
use crate::error::{HandleFault, PoolError, Result};
use crate::handle::Handle;
use crate::iter::{Handles, StackIter};
use crate::stats::PoolStats;
use std::fmt;
use tracing::{debug, trace, warn};

/// One value plus the link to the node beneath it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    value: i64,
    next: Handle,
}

/// An arena slot is either part of some stack or on the free list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Live(Node),
    Free { next_free: Handle },
}

/// Backing storage of an initialized pool
#[derive(Debug, Default)]
struct Arena {
    slots: Vec<Slot>,

    /// Head of the free list (sentinel when no slot is free)
    free_head: Handle,

    /// Number of live nodes
    live: usize,

    /// Number of slots on the free list
    free: usize,
}

impl Arena {
    fn with_capacity(capacity: usize) -> Result<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| PoolError::OutOfMemory {
                requested: capacity,
            })?;
        Ok(Arena {
            slots,
            ..Arena::default()
        })
    }

    /// Resolve a handle to the node it names
    fn node(&self, handle: Handle) -> Result<&Node> {
        let index = handle
            .slot()
            .ok_or(PoolError::invalid(handle, HandleFault::Sentinel))?;
        match self.slots.get(index) {
            Some(Slot::Live(node)) => Ok(node),
            Some(Slot::Free { .. }) => Err(PoolError::invalid(handle, HandleFault::Freed)),
            None => Err(PoolError::invalid(handle, HandleFault::OutOfRange)),
        }
    }

    fn node_mut(&mut self, handle: Handle) -> Result<&mut Node> {
        let index = handle
            .slot()
            .ok_or(PoolError::invalid(handle, HandleFault::Sentinel))?;
        match self.slots.get_mut(index) {
            Some(Slot::Live(node)) => Ok(node),
            Some(Slot::Free { .. }) => Err(PoolError::invalid(handle, HandleFault::Freed)),
            None => Err(PoolError::invalid(handle, HandleFault::OutOfRange)),
        }
    }

    /// Count the nodes reachable from `head`
    ///
    /// The walk is bounded by the number of live nodes, so a chain that
    /// loops back on itself (possible only after a caller popped through
    /// a stale handle) is reported instead of spinning forever.
    fn depth(&self, head: Handle) -> Result<usize> {
        let mut count = 0;
        let mut current = head;
        while !current.is_sentinel() {
            if count == self.live {
                return Err(PoolError::invalid(head, HandleFault::Cycle));
            }
            current = self.node(current)?.next;
            count += 1;
        }
        Ok(count)
    }

    /// Take a slot for a new node: free list first, then fresh arena space
    fn acquire(&mut self, limit: Option<usize>) -> Result<usize> {
        if let Some(index) = self.free_head.slot()
            && let Some(Slot::Free { next_free }) = self.slots.get(index)
        {
            self.free_head = *next_free;
            self.free -= 1;
            return Ok(index);
        }

        let index = self.slots.len();
        if let Some(limit) = limit
            && index >= limit
        {
            return Err(PoolError::PoolExhausted { capacity: limit });
        }
        self.slots
            .try_reserve(1)
            .map_err(|_| PoolError::OutOfMemory {
                requested: index + 1,
            })?;
        self.slots.push(Slot::Free {
            next_free: Handle::SENTINEL,
        });
        Ok(index)
    }

    /// Put a live slot on the front of the free list
    fn release(&mut self, handle: Handle) {
        self.set_free(handle, self.free_head);
        self.free_head = handle;
        self.live -= 1;
        self.free += 1;
    }

    fn set_free(&mut self, handle: Handle, next_free: Handle) {
        if let Some(slot) = handle.slot().and_then(|index| self.slots.get_mut(index)) {
            *slot = Slot::Free { next_free };
        }
    }
}

/// A pool of integer stacks addressed by [`Handle`]s
///
/// # Example
///
/// ```
/// use stackpool_core::StackPool;
///
/// let mut pool = StackPool::empty().unwrap();
/// let mut h = pool.new_stack();
/// h = pool.push(10, h).unwrap();
/// h = pool.push(100, h).unwrap();
/// assert_eq!(pool.size(h).unwrap(), 2);
/// assert_eq!(pool.value(h).unwrap(), 100);
/// h = pool.pop(h).unwrap();
/// assert_eq!(pool.value(h).unwrap(), 10);
/// ```
#[derive(Debug)]
pub struct StackPool {
    arena: Option<Arena>,
    config: PoolConfig,
}

impl StackPool {
    /// Create and initialize a pool
    pub fn new(config: PoolConfig) -> Result<Self> {
        let capacity = config.capacity;
        let mut pool = StackPool::uninitialized(config);
        pool.init(capacity)?;
        Ok(pool)
    }

    /// Growable pool with `capacity` nodes reserved up front
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        StackPool::new(PoolConfig::new().with_capacity(capacity))
    }

    /// Growable pool with nothing reserved
    pub fn empty() -> Result<Self> {
        StackPool::new(PoolConfig::new())
    }

    /// A pool that rejects every operation until [`init`](Self::init) is called
    pub fn uninitialized(config: PoolConfig) -> Self {
        StackPool {
            arena: None,
            config,
        }
    }

    /// Allocate (or reset) the arena with `capacity` reserved slots
    ///
    /// Every stack built before this call is discarded and all
    /// outstanding handles become invalid. On failure the pool is left
    /// uninitialized with its configured capacity unchanged.
    pub fn init(&mut self, capacity: usize) -> Result<()> {
        self.arena = None;
        self.arena = Some(Arena::with_capacity(capacity)?);
        self.config.capacity = capacity;
        debug!(
            capacity,
            policy = ?self.config.policy,
            strict_pop = self.config.strict_pop,
            "stack pool initialized"
        );
        Ok(())
    }

    /// Release the arena; the pool is uninitialized afterwards
    pub fn teardown(&mut self) {
        if let Some(arena) = self.arena.take() {
            debug!(
                live = arena.live,
                slots = arena.slots.len(),
                "stack pool torn down"
            );
        }
    }

    /// Check if the pool currently owns an arena
    pub fn is_initialized(&self) -> bool {
        self.arena.is_some()
    }

    /// The configuration this pool was built with
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    fn arena(&self) -> Result<&Arena> {
        self.arena.as_ref().ok_or(PoolError::PoolNotInitialized)
    }

    fn arena_mut(&mut self) -> Result<&mut Arena> {
        self.arena.as_mut().ok_or(PoolError::PoolNotInitialized)
    }

    /// Handle of a new, empty stack. Allocates nothing.
    #[inline]
    pub fn new_stack(&self) -> Handle {
        Handle::SENTINEL
    }

    /// Check if `head` is the empty stack
    #[inline]
    pub fn is_empty(&self, head: Handle) -> bool {
        head.is_sentinel()
    }

    /// Push `value` onto the stack whose head is `head`
    ///
    /// Returns the new head. A freed slot is reused if there is one,
    /// otherwise the arena grows (up to the configured limit).
    pub fn push(&mut self, value: i64, head: Handle) -> Result<Handle> {
        let limit = self.config.slot_limit();
        let arena = self.arena_mut()?;
        if !head.is_sentinel() {
            arena.node(head)?;
        }

        let index = arena.acquire(limit).inspect_err(|e| {
            if let PoolError::PoolExhausted { capacity } = e {
                warn!(capacity, "push: stack pool exhausted");
            }
        })?;
        arena.slots[index] = Slot::Live(Node { value, next: head });
        arena.live += 1;

        let new_head = Handle::for_slot(index);
        trace!(value, %head, %new_head, "push");
        Ok(new_head)
    }

    /// Pop the head node of a stack and return the new head
    ///
    /// Popping the empty stack returns the sentinel again, unless
    /// `strict_pop` is configured. The popped slot may be reused by the
    /// next push on any stack.
    pub fn pop(&mut self, head: Handle) -> Result<Handle> {
        let strict = self.config.strict_pop;
        let arena = self.arena_mut()?;
        if head.is_sentinel() {
            return if strict {
                Err(PoolError::EmptyStack)
            } else {
                Ok(Handle::SENTINEL)
            };
        }

        let next = arena.node(head)?.next;
        arena.release(head);
        trace!(%head, %next, "pop");
        Ok(next)
    }

    /// Value stored at the head of a stack
    ///
    /// The empty stack has no value: the sentinel is an `InvalidHandle`.
    pub fn value(&self, head: Handle) -> Result<i64> {
        Ok(self.arena()?.node(head)?.value)
    }

    /// Overwrite the value stored at the head of a stack
    pub fn set_value(&mut self, head: Handle, value: i64) -> Result<()> {
        self.arena_mut()?.node_mut(head)?.value = value;
        Ok(())
    }

    /// Handle of the node beneath `head`
    pub fn next(&self, head: Handle) -> Result<Handle> {
        Ok(self.arena()?.node(head)?.next)
    }

    /// Number of nodes in the stack. O(depth); zero for the sentinel.
    pub fn size(&self, head: Handle) -> Result<usize> {
        self.arena()?.depth(head)
    }

    /// Return every node of a stack to the free list at once
    ///
    /// The chain is spliced onto the front of the free list in stack
    /// order, so the old head is the next slot handed out. Returns the
    /// sentinel.
    pub fn free_stack(&mut self, head: Handle) -> Result<Handle> {
        let arena = self.arena_mut()?;
        let depth = arena.depth(head)?;
        if depth == 0 {
            return Ok(Handle::SENTINEL);
        }

        let mut current = head;
        for _ in 0..depth {
            let next = arena.node(current)?.next;
            let next_free = if next.is_sentinel() {
                arena.free_head
            } else {
                next
            };
            arena.set_free(current, next_free);
            current = next;
        }
        arena.free_head = head;
        arena.live -= depth;
        arena.free += depth;

        debug!(%head, depth, "free_stack");
        Ok(Handle::SENTINEL)
    }

    /// Reserve arena space for at least `capacity` nodes in total
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        let arena = self.arena_mut()?;
        let additional = capacity.saturating_sub(arena.slots.len());
        arena
            .slots
            .try_reserve_exact(additional)
            .map_err(|_| PoolError::OutOfMemory {
                requested: capacity,
            })?;
        debug!(capacity = arena.slots.capacity(), "reserve");
        Ok(())
    }

    /// Number of nodes the arena can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.arena.as_ref().map_or(0, |arena| arena.slots.capacity())
    }

    /// Current pool statistics
    pub fn stats(&self) -> PoolStats {
        match &self.arena {
            Some(arena) => PoolStats {
                live: arena.live,
                free: arena.free,
                slots: arena.slots.len(),
                capacity: arena.slots.capacity(),
            },
            None => PoolStats::default(),
        }
    }

    /// Iterate the values of a stack, top first
    pub fn iter(&self, head: Handle) -> StackIter<'_> {
        StackIter::new(self, head)
    }

    /// Iterate the handles of a stack's nodes, top first
    pub fn handles(&self, head: Handle) -> Handles<'_> {
        Handles::new(self, head)
    }

    /// Display adapter that prints a stack one value per line
    pub fn display(&self, head: Handle) -> StackDisplay<'_> {
        StackDisplay { pool: self, head }
    }

    /// Live node at `handle` as `(value, next)`, if there is one
    pub(crate) fn link(&self, handle: Handle) -> Option<(i64, Handle)> {
        let node = self.arena.as_ref()?.node(handle).ok()?;
        Some((node.value, node.next))
    }

    /// Upper bound on any chain length
    pub(crate) fn live_count(&self) -> usize {
        self.arena.as_ref().map_or(0, |arena| arena.live)
    }
}

/// Prints `STACK (head=h)`, each value on its own line, then `END`
pub struct StackDisplay<'a> {
    pool: &'a StackPool,
    head: Handle,
}

impl fmt::Display for StackDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "STACK (head={})", self.head)?;
        for value in self.pool.iter(self.head) {
            writeln!(f, "{}", value)?;
        }
        write!(f, "END")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CapacityPolicy;

    fn pool() -> StackPool {
        StackPool::with_capacity(16).unwrap()
    }

    fn push_all(pool: &mut StackPool, values: &[i64]) -> Handle {
        values
            .iter()
            .fold(pool.new_stack(), |h, &v| pool.push(v, h).unwrap())
    }

    fn unroll(pool: &mut StackPool, mut head: Handle) -> Vec<i64> {
        let n = pool.size(head).unwrap();
        let mut out = Vec::new();
        for _ in 0..n {
            out.push(pool.value(head).unwrap());
            head = pool.pop(head).unwrap();
        }
        assert_eq!(head, Handle::SENTINEL);
        out
    }

    #[test]
    fn test_first_handle_is_one() {
        let mut pool = pool();
        let l = pool.new_stack();
        assert_eq!(l, Handle::SENTINEL);
        let l = pool.push(42, l).unwrap();
        assert_eq!(l.into_raw(), 1);
    }

    #[test]
    fn test_push_value_size_pop() {
        let mut pool = pool();
        let h = push_all(&mut pool, &[10, 100, 1000]);
        assert_eq!(pool.size(h).unwrap(), 3);
        assert_eq!(pool.value(h).unwrap(), 1000);

        let h = pool.pop(h).unwrap();
        assert_eq!(pool.value(h).unwrap(), 100);
    }

    #[test]
    fn test_pop_until_sentinel() {
        let mut pool = pool();
        let mut h = push_all(&mut pool, &[1, 2, 3, 4, 5]);
        for remaining in (0..5).rev() {
            h = pool.pop(h).unwrap();
            assert_eq!(pool.size(h).unwrap(), remaining);
        }
        assert!(pool.is_empty(h));
    }

    #[test]
    fn test_pop_sentinel_is_noop() {
        let mut pool = pool();
        let before = pool.stats();
        assert_eq!(pool.pop(Handle::SENTINEL).unwrap(), Handle::SENTINEL);
        assert_eq!(pool.pop(Handle::SENTINEL).unwrap(), Handle::SENTINEL);
        assert_eq!(pool.stats(), before);
    }

    #[test]
    fn test_strict_pop_rejects_sentinel() {
        let mut pool = StackPool::new(PoolConfig::new().with_strict_pop(true)).unwrap();
        assert_eq!(pool.pop(Handle::SENTINEL), Err(PoolError::EmptyStack));

        let h = pool.push(1, Handle::SENTINEL).unwrap();
        assert_eq!(pool.pop(h).unwrap(), Handle::SENTINEL);
    }

    #[test]
    fn test_sentinel_size_is_zero_without_allocation() {
        let pool = StackPool::empty().unwrap();
        let h = pool.new_stack();
        assert_eq!(pool.size(h).unwrap(), 0);
        assert_eq!(pool.stats().slots, 0);
        assert_eq!(pool.stats().live, 0);
    }

    #[test]
    fn test_value_on_sentinel_is_invalid_handle() {
        let pool = pool();
        assert_eq!(
            pool.value(Handle::SENTINEL),
            Err(PoolError::invalid(Handle::SENTINEL, HandleFault::Sentinel))
        );
    }

    #[test]
    fn test_out_of_range_handle() {
        let mut pool = pool();
        let bogus = Handle::from_raw(99);
        let err = PoolError::invalid(bogus, HandleFault::OutOfRange);
        assert_eq!(pool.value(bogus), Err(err.clone()));
        assert_eq!(pool.size(bogus), Err(err.clone()));
        assert_eq!(pool.pop(bogus), Err(err.clone()));
        assert_eq!(pool.push(1, bogus), Err(err));
        assert_eq!(pool.stats().slots, 0);
    }

    #[test]
    fn test_freed_handle_is_rejected_until_reused() {
        let mut pool = pool();
        let a = pool.push(1, Handle::SENTINEL).unwrap();
        let b = pool.push(2, a).unwrap();
        let rest = pool.pop(b).unwrap();
        assert_eq!(rest, a);

        assert_eq!(
            pool.value(b),
            Err(PoolError::invalid(b, HandleFault::Freed))
        );

        // Reuse hands the same slot back; the old value is gone
        let c = pool.push(3, Handle::SENTINEL).unwrap();
        assert_eq!(c, b);
        assert_eq!(pool.value(b).unwrap(), 3);
        assert_eq!(pool.size(c).unwrap(), 1);
    }

    #[test]
    fn test_free_list_is_lifo() {
        let mut pool = pool();
        let a = pool.push(1, Handle::SENTINEL).unwrap();
        let b = pool.push(2, Handle::SENTINEL).unwrap();
        let c = pool.push(3, Handle::SENTINEL).unwrap();
        pool.pop(a).unwrap();
        pool.pop(c).unwrap();
        pool.pop(b).unwrap();

        assert_eq!(pool.push(0, Handle::SENTINEL).unwrap(), b);
        assert_eq!(pool.push(0, Handle::SENTINEL).unwrap(), c);
        assert_eq!(pool.push(0, Handle::SENTINEL).unwrap(), a);
        assert_eq!(pool.stats().slots, 3);
    }

    #[test]
    fn test_recycled_node_has_no_ghost_chain() {
        let mut pool = pool();
        let old = push_all(&mut pool, &[7, 8, 9]);
        let mut h = old;
        while !h.is_sentinel() {
            h = pool.pop(h).unwrap();
        }

        let fresh = pool.push(42, Handle::SENTINEL).unwrap();
        assert_eq!(fresh, old);
        assert_eq!(pool.size(fresh).unwrap(), 1);
        assert_eq!(pool.iter(fresh).collect::<Vec<_>>(), vec![42]);
    }

    #[test]
    fn test_two_stacks_do_not_interfere() {
        let mut pool = StackPool::empty().unwrap();
        let mut a = pool.new_stack();
        let mut b = pool.new_stack();

        a = pool.push(10, a).unwrap();
        b = pool.push(2, b).unwrap();
        b = pool.push(4, b).unwrap();
        a = pool.push(100, a).unwrap();
        b = pool.push(8, b).unwrap();
        a = pool.push(1000, a).unwrap();
        b = pool.push(16, b).unwrap();

        assert_eq!(unroll(&mut pool, a), vec![1000, 100, 10]);
        assert_eq!(unroll(&mut pool, b), vec![16, 8, 4, 2]);
        assert_eq!(pool.stats().live, 0);
    }

    #[test]
    fn test_interleaved_pop_and_push_across_stacks() {
        let mut pool = StackPool::empty().unwrap();
        let mut l = push_all(&mut pool, &[10, 11]);
        let mut l2 = pool.push(20, Handle::SENTINEL).unwrap();
        l = pool.pop(l).unwrap();
        l2 = pool.push(21, l2).unwrap();

        assert_eq!(pool.iter(l).collect::<Vec<_>>(), vec![10]);
        assert_eq!(pool.iter(l2).collect::<Vec<_>>(), vec![21, 20]);
    }

    #[test]
    fn test_fixed_pool_exhausts_and_recovers() {
        let mut pool = StackPool::new(PoolConfig::fixed(3)).unwrap();
        let mut h = pool.new_stack();
        for v in 0..3 {
            h = pool.push(v, h).unwrap();
        }
        assert_eq!(
            pool.push(3, h),
            Err(PoolError::PoolExhausted { capacity: 3 })
        );
        // Failed push leaves the stack untouched
        assert_eq!(pool.size(h).unwrap(), 3);

        h = pool.pop(h).unwrap();
        h = pool.push(99, h).unwrap();
        assert_eq!(pool.value(h).unwrap(), 99);
        assert_eq!(pool.size(h).unwrap(), 3);
    }

    #[test]
    fn test_growable_pool_grows_past_capacity() {
        let mut pool = StackPool::with_capacity(2).unwrap();
        assert_eq!(pool.config().policy, CapacityPolicy::Growable);
        let h = push_all(&mut pool, &[1, 2, 3, 4, 5]);
        assert_eq!(pool.size(h).unwrap(), 5);
        assert!(pool.capacity() >= 5);
    }

    #[test]
    fn test_teardown_and_reinit() {
        let mut pool = pool();
        let h = push_all(&mut pool, &[1, 2]);
        pool.teardown();
        assert!(!pool.is_initialized());
        assert_eq!(pool.size(h), Err(PoolError::PoolNotInitialized));
        assert_eq!(pool.value(h), Err(PoolError::PoolNotInitialized));
        assert_eq!(pool.push(1, h), Err(PoolError::PoolNotInitialized));
        assert_eq!(
            pool.pop(Handle::SENTINEL),
            Err(PoolError::PoolNotInitialized)
        );
        assert_eq!(pool.capacity(), 0);

        pool.init(4).unwrap();
        assert!(pool.is_initialized());
        // Old handles are gone after a reset
        assert_eq!(
            pool.value(h),
            Err(PoolError::invalid(h, HandleFault::OutOfRange))
        );
        let h = pool.push(5, Handle::SENTINEL).unwrap();
        assert_eq!(h.into_raw(), 1);
    }

    #[test]
    fn test_reinit_discards_stacks() {
        let mut pool = pool();
        push_all(&mut pool, &[1, 2, 3]);
        pool.init(16).unwrap();
        assert_eq!(pool.stats(), PoolStats {
            live: 0,
            free: 0,
            slots: 0,
            capacity: pool.capacity(),
        });
    }

    #[test]
    fn test_uninitialized_pool() {
        let mut pool = StackPool::uninitialized(PoolConfig::default());
        assert!(!pool.is_initialized());
        assert_eq!(pool.push(1, Handle::SENTINEL), Err(PoolError::PoolNotInitialized));
        assert_eq!(pool.size(Handle::SENTINEL), Err(PoolError::PoolNotInitialized));
        assert_eq!(pool.stats(), PoolStats::default());
    }

    #[test]
    fn test_set_value_and_next() {
        let mut pool = pool();
        let h = push_all(&mut pool, &[1, 42]);
        pool.set_value(h, 77).unwrap();
        assert_eq!(pool.value(h).unwrap(), 77);

        let below = pool.next(h).unwrap();
        assert_eq!(pool.value(below).unwrap(), 1);
        assert_eq!(pool.next(below).unwrap(), Handle::SENTINEL);
    }

    #[test]
    fn test_free_stack_reuses_nodes_in_order() {
        let mut pool = StackPool::empty().unwrap();
        let l1 = push_all(&mut pool, &[3, 2, 1]);
        let capacity = pool.capacity();
        let nodes: Vec<Handle> = pool.handles(l1).collect();

        assert_eq!(pool.free_stack(l1).unwrap(), Handle::SENTINEL);
        assert_eq!(pool.stats().live, 0);
        assert_eq!(pool.stats().free, 3);

        // Old head comes back first, then the rest of the chain
        let mut l2 = pool.new_stack();
        let mut reused = Vec::new();
        for v in [4, 5, 6] {
            l2 = pool.push(v, l2).unwrap();
            reused.push(l2);
        }
        assert_eq!(reused, nodes);
        assert_eq!(pool.iter(l2).collect::<Vec<_>>(), vec![6, 5, 4]);
        assert_eq!(pool.capacity(), capacity);
    }

    #[test]
    fn test_free_stack_keeps_older_free_slots() {
        let mut pool = StackPool::empty().unwrap();
        let a = pool.push(1, Handle::SENTINEL).unwrap();
        let b = push_all(&mut pool, &[2, 3]);
        pool.pop(a).unwrap();
        pool.free_stack(b).unwrap();

        let stats = pool.stats();
        assert_eq!(stats.free, 3);
        assert_eq!(stats.live, 0);

        let mut h = pool.new_stack();
        for v in 0..3 {
            h = pool.push(v, h).unwrap();
        }
        assert_eq!(pool.stats().slots, 3);
        assert_eq!(pool.stats().free, 0);
    }

    #[test]
    fn test_free_stack_on_sentinel() {
        let mut pool = pool();
        assert_eq!(pool.free_stack(Handle::SENTINEL).unwrap(), Handle::SENTINEL);
        assert_eq!(pool.stats().free, 0);
    }

    #[test]
    fn test_cycle_from_stale_handle_is_reported() {
        let mut pool = pool();
        let a = pool.push(1, Handle::SENTINEL).unwrap();
        let b = pool.push(2, a).unwrap();
        // Misuse: pop through the stale lower handle, then reuse its slot on top of b
        pool.pop(a).unwrap();
        let c = pool.push(3, b).unwrap();
        assert_eq!(c, a);

        assert_eq!(
            pool.size(c),
            Err(PoolError::invalid(c, HandleFault::Cycle))
        );
        assert_eq!(pool.iter(c).count(), 2);
    }

    #[test]
    fn test_reserve_and_capacity() {
        let mut pool = StackPool::empty().unwrap();
        pool.reserve(32).unwrap();
        assert!(pool.capacity() >= 32);
        assert_eq!(pool.stats().slots, 0);
    }

    #[test]
    fn test_display() {
        let mut pool = pool();
        let h = push_all(&mut pool, &[10, 11]);
        assert_eq!(
            pool.display(h).to_string(),
            "STACK (head=2)\n11\n10\nEND"
        );
        assert_eq!(
            pool.display(Handle::SENTINEL).to_string(),
            "STACK (head=0)\nEND"
        );
    }
}
