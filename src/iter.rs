//! Borrowing iterator over a [`Queue`](crate::Queue). You'll rarely want to name it directly.
//!
//! ```text
//!  node
//!    |
//!    v
//!   head -> node -> node -> tail -> (none)
//! ```
//!
//! One step of iteration yields the value of `node` and moves `node` along its `next` link.
//! The chain is singly linked, so there is no way back.

use std::{iter::FusedIterator, marker::PhantomData};

use crate::Link;

pub struct Iter<'list> {
    node: Link,
    remaining: usize,
    _bound_to_list: PhantomData<&'list ()>,
}

impl<'list> Iter<'list> {
    pub(crate) fn new(head: Link, len: usize) -> Self {
        Self {
            node: head,
            remaining: len,
            _bound_to_list: PhantomData,
        }
    }
}

impl<'list> Iterator for Iter<'list> {
    type Item = &'list str;

    fn next(&mut self) -> Option<&'list str> {
        let current = self.node?;

        // SAFETY: `Iter` is only built by `Queue::iter`, which ties `'list` to a shared borrow
        //         of the queue, so every node stays alive and unchanged for `'list`
        let current = unsafe { &*current.as_ptr() };
        self.node = current.next;
        self.remaining -= 1;

        Some(current.value.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'list> IntoIterator for &'list crate::Queue {
    type Item = &'list str;
    type IntoIter = Iter<'list>;

    fn into_iter(self) -> Iter<'list> {
        self.iter()
    }
}
