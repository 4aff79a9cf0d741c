//! Merge sort over the node chain, in natural order.
//!
//! Nodes are only relinked: nothing is allocated or freed while sorting, and values never move.

use std::ptr::NonNull;

use log::debug;

use crate::{natural_cmp, Link, Node, Queue};

impl Queue {
    /// Sorts the values ascending by [`natural_cmp`].
    pub fn sort(&mut self) {
        if self.len <= 1 {
            return;
        }

        // SAFETY: `head` owns a well-formed, acyclic chain of `len` live nodes, and `&mut self`
        //         rules out any other access while it is being relinked
        unsafe {
            self.head = merge_sort(self.head);
            // merging doesn't keep track of the end, look it up again
            self.tail = last(self.head);
        }

        debug!("sorted {} values", self.len);
    }
}

/// Sorts the chain starting at `head` and returns the new first node.
///
/// # Safety
///
/// `head` must start a well-formed chain of live nodes that nobody else accesses.
unsafe fn merge_sort(head: Link) -> Link {
    let Some(first) = head else {
        return None;
    };
    if (*first.as_ptr()).next.is_none() {
        return head;
    }

    let second_half = split(first);
    let left = merge_sort(head);
    let right = merge_sort(second_half);

    merge(left, right)
}

/// Cuts the chain in the middle and returns the start of the second half.
///
/// `fast` starts one node ahead of `slow` and moves twice as quickly, so once it runs out `slow`
/// sits on the last node of the first half. For odd lengths the first half is the longer one.
///
/// # Safety
///
/// Same contract as [`merge_sort`].
unsafe fn split(head: NonNull<Node>) -> Link {
    let mut slow = head;
    let mut fast = (*head.as_ptr()).next;

    loop {
        let Some(one_ahead) = fast else { break };
        let Some(two_ahead) = (*one_ahead.as_ptr()).next else {
            break;
        };
        let Some(next) = (*slow.as_ptr()).next else {
            break;
        };

        slow = next;
        fast = (*two_ahead.as_ptr()).next;
    }

    (*slow.as_ptr()).next.take()
}

/// Splices two sorted chains into one. On ties the node from `left` goes first.
///
/// # Safety
///
/// `left` and `right` must be disjoint chains, each satisfying the contract of [`merge_sort`].
unsafe fn merge(mut left: Link, mut right: Link) -> Link {
    let mut head: Link = None;
    let mut tail: Link = None;

    while let (Some(l), Some(r)) = (left, right) {
        let picked = if natural_cmp(&(*l.as_ptr()).value, &(*r.as_ptr()).value).is_le() {
            left = (*l.as_ptr()).next;
            l
        } else {
            right = (*r.as_ptr()).next;
            r
        };

        match tail {
            Some(end) => (*end.as_ptr()).next = Some(picked),
            None => head = Some(picked),
        }
        tail = Some(picked);
    }

    // whatever is left over is already sorted, hang it on wholesale
    let rest = left.or(right);
    match tail {
        Some(end) => {
            (*end.as_ptr()).next = rest;
            head
        }
        None => rest,
    }
}

/// # Safety
///
/// Same contract as [`merge_sort`].
unsafe fn last(head: Link) -> Link {
    let mut current = head?;
    while let Some(next) = (*current.as_ptr()).next {
        current = next;
    }
    Some(current)
}
