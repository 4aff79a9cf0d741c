//! Nullable entry points, for drivers that pass queues around as handles.
//!
//! Every function accepts an absent queue and degrades to a no-op, `false` or `0`. Failures are
//! reported only through the return value; use the methods on [`Queue`] to find out why.

use crate::{allocate, Queue};

/// Creates an empty queue, or `None` if its storage could not be allocated.
pub fn new() -> Option<Box<Queue>> {
    let queue = allocate(Queue::new()).ok()?;
    // SAFETY: `allocate` placed the queue with the global allocator and the layout of `Queue`
    Some(unsafe { Box::from_raw(queue.as_ptr()) })
}

/// Releases the queue together with all of its values.
pub fn free(queue: Option<Box<Queue>>) {
    drop(queue);
}

pub fn insert_head(queue: Option<&mut Queue>, value: &str) -> bool {
    queue.is_some_and(|queue| queue.insert_head(value).is_ok())
}

pub fn insert_tail(queue: Option<&mut Queue>, value: &str) -> bool {
    queue.is_some_and(|queue| queue.insert_tail(value).is_ok())
}

/// See [`Queue::remove_head_into`] for how `buf` is filled.
pub fn remove_head(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> bool {
    queue.is_some_and(|queue| queue.remove_head_into(buf).is_ok())
}

pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, Queue::len)
}

pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}

pub fn sort(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.sort();
    }
}
