use rstest::rstest;

use crate::{Queue, QueueError};

fn contents(queue: &Queue) -> Vec<&str> {
    queue.iter().collect()
}

/// Walks the chain by hand and checks it against `len`, `head` and `tail`.
fn assert_consistent(queue: &Queue) {
    let mut walked = 0;
    let mut last = None;
    let mut node = queue.head;
    while let Some(current) = node {
        walked += 1;
        last = Some(current);
        // SAFETY: the queue is borrowed for the whole walk
        node = unsafe { (*current.as_ptr()).next };
    }

    assert_eq!(walked, queue.len());
    assert_eq!(last, queue.tail);
    assert_eq!(queue.head.is_none(), queue.tail.is_none());
    if queue.len() == 1 {
        assert_eq!(queue.head, queue.tail);
    }
}

#[test]
fn casual_push_and_observe() {
    let mut queue = Queue::new();
    assert_consistent(&queue);

    queue.insert_tail("b").unwrap();
    assert_consistent(&queue);
    queue.insert_tail("a").unwrap();
    queue.insert_head("c").unwrap();
    assert_consistent(&queue);

    assert_eq!(contents(&queue), ["c", "b", "a"]);
    assert_eq!(queue.len(), 3);
    assert_eq!(format!("{queue:?}"), r#"["c", "b", "a"]"#);

    queue.reverse();
    assert_consistent(&queue);
    assert_eq!(contents(&queue), ["a", "b", "c"]);

    queue.sort();
    assert_consistent(&queue);
    assert_eq!(contents(&queue), ["a", "b", "c"]);
}

#[test]
fn first_insert_at_head_sets_both_ends() {
    let mut queue = Queue::new();
    queue.insert_head("lonely").unwrap();
    assert_consistent(&queue);
    assert_eq!(queue.front(), Some("lonely"));
    assert_eq!(queue.back(), Some("lonely"));

    queue.insert_tail("company").unwrap();
    assert_eq!(queue.front(), Some("lonely"));
    assert_eq!(queue.back(), Some("company"));
}

#[test]
fn values_are_copied_in() {
    let mut queue = Queue::new();
    let mut original = String::from("before");
    queue.insert_tail(&original).unwrap();
    original.replace_range(.., "after");

    assert_eq!(contents(&queue), ["before"]);
}

#[test]
fn size_follows_successful_operations() {
    let mut queue = Queue::new();
    let mut expected = 0;

    for round in 0..20 {
        queue.insert_tail(&round.to_string()).unwrap();
        queue.insert_head("front").unwrap();
        expected += 2;
        if round % 3 == 0 {
            assert!(queue.pop_front().is_some());
            expected -= 1;
        }
        assert_eq!(queue.len(), expected);
    }

    while queue.remove_head_into(None).is_ok() {
        expected -= 1;
        assert_eq!(queue.len(), expected);
    }
    assert_eq!(expected, 0);
    assert_consistent(&queue);
}

#[test]
fn emptying_resets_both_ends() {
    let mut queue = Queue::new();
    queue.insert_tail("one").unwrap();
    queue.insert_tail("two").unwrap();

    assert_eq!(queue.pop_front().as_deref(), Some("one"));
    assert_consistent(&queue);
    assert_eq!(queue.pop_front().as_deref(), Some("two"));
    assert_consistent(&queue);
    assert!(queue.is_empty());

    // the stale tail must not be reused
    queue.insert_tail("three").unwrap();
    assert_consistent(&queue);
    assert_eq!(contents(&queue), ["three"]);
}

#[test]
fn removing_from_empty_fails() {
    let mut queue = Queue::new();
    let mut buf = [b'?'; 4];

    // trying to remove from an empty queue should not panic
    for _ in 0..10 {
        assert_eq!(queue.remove_head_into(Some(&mut buf[..])), Err(QueueError::Empty));
        assert_eq!(queue.pop_front(), None);
    }
    assert_eq!(queue.len(), 0);
    assert_eq!(buf, [b'?'; 4]);
}

#[rstest]
#[case("hello", 16, 5, b"hello\0\0\0\0\0\0\0\0\0\0\0")]
#[case("hello", 6, 5, b"hello\0")]
#[case("hello", 5, 4, b"hell\0")]
#[case("hello", 2, 1, b"h\0")]
#[case("hello", 1, 0, b"\0")]
#[case("", 3, 0, b"\0\0\0")]
fn remove_head_truncates_to_capacity(
    #[case] value: &str,
    #[case] capacity: usize,
    #[case] copied: usize,
    #[case] expected: &[u8],
) {
    let mut queue = Queue::new();
    queue.insert_tail(value).unwrap();
    queue.insert_tail("next").unwrap();

    let mut buf = vec![0xaa; capacity];
    assert_eq!(queue.remove_head_into(Some(&mut buf[..])), Ok(copied));
    assert_eq!(buf, expected);
    assert_eq!(contents(&queue), ["next"]);
}

#[test]
fn zero_capacity_buffer_stays_empty() {
    let mut queue = Queue::new();
    queue.insert_tail("value").unwrap();

    let mut buf: [u8; 0] = [];
    assert_eq!(queue.remove_head_into(Some(&mut buf[..])), Ok(0));
    assert!(queue.is_empty());
}

#[test]
fn remove_then_reinsert_restores() {
    let mut queue = Queue::new();
    for value in ["alpha", "beta", "gamma"] {
        queue.insert_tail(value).unwrap();
    }

    let mut buf = [0; 64];
    let copied = queue.remove_head_into(Some(&mut buf[..])).unwrap();
    let removed = std::str::from_utf8(&buf[..copied]).unwrap();
    queue.insert_head(removed).unwrap();

    assert_eq!(contents(&queue), ["alpha", "beta", "gamma"]);
    assert_consistent(&queue);
}

#[rstest]
#[case(&[])]
#[case(&["1"])]
#[case(&["1", "2"])]
#[case(&["1", "2", "3"])]
#[case(&["1", "2", "3", "4", "5", "6", "7"])]
fn reverse_twice_is_identity(#[case] values: &[&str]) {
    let mut queue = Queue::new();
    for value in values {
        queue.insert_tail(value).unwrap();
    }
    let (head, tail) = (queue.head, queue.tail);

    queue.reverse();
    assert_consistent(&queue);
    let reversed = values.iter().rev().copied().collect::<Vec<_>>();
    assert_eq!(contents(&queue), reversed);
    if values.len() > 1 {
        assert_eq!((queue.head, queue.tail), (tail, head));
    }

    queue.reverse();
    assert_consistent(&queue);
    assert_eq!(contents(&queue), values);
    assert_eq!((queue.head, queue.tail), (head, tail));
}

#[test]
fn snake_reverse_and_sort() {
    let mut snake = Queue::new();

    snake.insert_tail("x10").unwrap();
    snake.insert_tail("x2").unwrap();
    snake.insert_tail("x1").unwrap();
    snake.sort();
    assert_eq!(contents(&snake), ["x1", "x2", "x10"]);

    // nom
    assert_eq!(snake.pop_front().as_deref(), Some("x1"));
    snake.insert_head("x100").unwrap();
    snake.reverse();
    assert_eq!(contents(&snake), ["x10", "x2", "x100"]);

    snake.sort();
    snake.insert_tail("tail").unwrap();
    assert_consistent(&snake);
    assert_eq!(contents(&snake), ["x2", "x10", "x100", "tail"]);
}

#[test]
fn long_chains_drop_without_recursion() {
    let mut queue = Queue::new();
    for _ in 0..200_000 {
        queue.insert_head("deep").unwrap();
    }
    queue.reverse();
    assert_eq!(queue.len(), 200_000);
    drop(queue);
}
