#[cfg(test)]
mod tests;

pub mod console;
pub mod handle;
pub mod iter;

mod error;
mod natural;
mod sort;

pub use error::QueueError;
pub use natural::natural_cmp;

use std::{
    alloc::{self, Layout},
    fmt,
    ptr::NonNull,
};

use log::{debug, trace, warn};

type Link = Option<NonNull<Node>>;

/// A queue of strings, backed by a singly linked chain of nodes.
///
/// The queue owns the whole chain through `head`. `tail` is only an alias of the last node,
/// kept around so that [`Queue::insert_tail`] doesn't have to walk the chain.
pub struct Queue {
    head: Link,
    tail: Link,
    len: usize,
}

pub(crate) struct Node {
    pub(crate) value: String,
    pub(crate) next: Link,
}

impl Queue {
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of values in the queue. Maintained by every mutation, never counted.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> iter::Iter<'_> {
        iter::Iter::new(self.head, self.len)
    }

    pub fn front(&self) -> Option<&str> {
        // SAFETY: `head` points to a live node owned by this queue, and the returned borrow
        //         is bound to `&self`, so no mutation can free it in the meantime
        self.head
            .map(|node| unsafe { (*node.as_ptr()).value.as_str() })
    }

    pub fn back(&self) -> Option<&str> {
        // SAFETY: same as in `Self::front`, `tail` aliases a node owned through `head`
        self.tail
            .map(|node| unsafe { (*node.as_ptr()).value.as_str() })
    }

    /// Copies `value` into a new node in front of the current head.
    ///
    /// On allocation failure the queue is left untouched.
    pub fn insert_head(&mut self, value: &str) -> Result<(), QueueError> {
        let node = allocate(Node {
            value: copy_value(value)?,
            next: self.head,
        })?;

        self.head = Some(node);
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.len += 1;

        trace!("inserted {value:?} at head, len now {}", self.len);
        Ok(())
    }

    /// Copies `value` into a new node after the current tail.
    ///
    /// On allocation failure the queue is left untouched.
    pub fn insert_tail(&mut self, value: &str) -> Result<(), QueueError> {
        let node = allocate(Node {
            value: copy_value(value)?,
            next: None,
        })?;

        match self.tail {
            // SAFETY: `tail` points to the live last node of this queue, and `&mut self`
            //         guarantees nobody else is looking at it
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;

        trace!("inserted {value:?} at tail, len now {}", self.len);
        Ok(())
    }

    /// Unlinks the head node and hands its value back.
    pub fn pop_front(&mut self) -> Option<String> {
        let head = self.head?;

        // SAFETY: every node is created by `allocate` with the layout of `Node` and reachable
        //         exactly once from `head`. Reclaiming it here after unlinking means nothing
        //         refers to it anymore.
        let node = unsafe { Box::from_raw(head.as_ptr()) };

        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;

        trace!("removed {:?} from head, len now {}", node.value, self.len);
        Some(node.value)
    }

    /// Removes the head value, copying it into `buf` if one is given.
    ///
    /// At most `buf.len() - 1` bytes are copied, the rest of `buf` is zeroed so the copy is
    /// always NUL-terminated. Longer values are truncated silently. Returns the number of value
    /// bytes copied. An empty queue leaves `buf` untouched.
    pub fn remove_head_into(&mut self, buf: Option<&mut [u8]>) -> Result<usize, QueueError> {
        let value = self.pop_front().ok_or(QueueError::Empty)?;
        Ok(buf.map_or(0, |buf| copy_truncated(&value, buf)))
    }

    /// Reverses the chain in place by flipping every `next` link.
    pub fn reverse(&mut self) {
        if self.len <= 1 {
            return;
        }

        let mut previous: Link = None;
        let mut current = self.head;
        while let Some(node) = current {
            // SAFETY: `current` walks the chain owned by this queue, each node visited once.
            //         Its successor is read before the link is overwritten.
            unsafe {
                let ptr = node.as_ptr();
                current = (*ptr).next;
                (*ptr).next = previous;
            }
            previous = Some(node);
        }

        self.tail = self.head;
        self.head = previous;
        debug!("reversed {} values", self.len);
    }
}

/// Copies as much of `value` as fits into `buf` while leaving room for the terminator.
fn copy_truncated(value: &str, buf: &mut [u8]) -> usize {
    let Some(room) = buf.len().checked_sub(1) else {
        return 0;
    };

    let copied = value.len().min(room);
    buf[..copied].copy_from_slice(&value.as_bytes()[..copied]);
    buf[copied..].fill(0);
    copied
}

fn copy_value(value: &str) -> Result<String, QueueError> {
    let mut owned = String::new();
    owned.try_reserve_exact(value.len()).map_err(|_| {
        warn!("could not allocate {} bytes for a value", value.len());
        QueueError::OutOfMemory { bytes: value.len() }
    })?;
    owned.push_str(value);
    Ok(owned)
}

/// Moves `item` to the heap, reporting allocation failure instead of aborting.
///
/// The result can be reclaimed with `Box::from_raw`. `T` must not be zero-sized.
pub(crate) fn allocate<T>(item: T) -> Result<NonNull<T>, QueueError> {
    let layout = Layout::new::<T>();
    debug_assert!(layout.size() != 0, "cannot allocate a zero-sized element");

    // SAFETY: only called for `Node` and `Queue`, neither of which is zero-sized
    let ptr = unsafe { alloc::alloc(layout) }.cast::<T>();
    let Some(ptr) = NonNull::new(ptr) else {
        warn!("could not allocate {} bytes for a list element", layout.size());
        return Err(QueueError::OutOfMemory {
            bytes: layout.size(),
        });
    };

    // SAFETY: `ptr` was just allocated by the global allocator with the layout of `T`,
    //         so it is valid for writes and properly aligned
    unsafe { ptr.as_ptr().write(item) };
    Ok(ptr)
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        // walked iteratively, a recursive drop of the chain could overflow the stack
        let released = self.len;
        while self.pop_front().is_some() {}
        debug!("released {released} values");
    }
}
