//! Word Queue Tests.

use std::thread;

use dualsim_core::soc::{IoBuffers, WordQueue};

#[test]
fn queue_is_fifo_with_push_front() {
    let queue = WordQueue::new();
    queue.push(1);
    queue.push(2);
    queue.push_front(0);
    assert_eq!(queue.snapshot(), vec![0, 1, 2]);
    assert_eq!(queue.pop(), Some(0));
    assert_eq!(queue.len(), 2);
}

#[test]
fn clones_share_storage_across_threads() {
    let queue = WordQueue::new();
    let producer = queue.clone();
    thread::spawn(move || {
        for word in 0..100 {
            producer.push(word);
        }
    })
    .join()
    .unwrap();
    assert_eq!(queue.len(), 100);
    assert_eq!(queue.pop(), Some(0));
}

#[test]
fn clearing_buffers_empties_both_directions() {
    let io = IoBuffers::new();
    io.receive.push(1);
    io.send.push(2);
    io.clear();
    assert!(io.receive.is_empty());
    assert!(io.send.is_empty());
}
