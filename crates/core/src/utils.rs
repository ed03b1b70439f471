//! Whole-stack helpers built on the pool operations

use crate::error::Result;
use crate::handle::Handle;
use crate::pool::StackPool;

/// Push every value in order; the last one ends up on top
///
/// On failure the values pushed so far stay in the pool and the error is
/// returned; the caller's original `head` is still a valid stack.
pub fn push_all<I>(pool: &mut StackPool, head: Handle, values: I) -> Result<Handle>
where
    I: IntoIterator<Item = i64>,
{
    values
        .into_iter()
        .try_fold(head, |head, value| pool.push(value, head))
}

/// Drain a stack, returning its values top first
pub fn to_vec(pool: &mut StackPool, mut head: Handle) -> Result<Vec<i64>> {
    let mut values = Vec::with_capacity(pool.size(head)?);
    while !head.is_sentinel() {
        values.push(pool.value(head)?);
        head = pool.pop(head)?;
    }
    Ok(values)
}

/// Number of nodes in a stack
pub fn stack_size(pool: &StackPool, head: Handle) -> Result<usize> {
    pool.size(head)
}
