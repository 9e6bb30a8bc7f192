//! External send/receive buffers.
//!
//! Two thread-safe FIFOs connect the core to the network tasks: the receive buffer
//! (filled by the receive task, drained by `recv`) and the send buffer (filled by
//! `send`, drained by the transmit task). The core never blocks on them.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// A shared FIFO of words.
///
/// Clones share the same queue.
#[derive(Clone, Debug, Default)]
pub struct WordQueue {
    inner: Arc<Mutex<VecDeque<u32>>>,
}

impl WordQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the deque, ignoring poison.
    fn lock(&self) -> MutexGuard<'_, VecDeque<u32>> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Appends a word at the back.
    pub fn push(&self, word: u32) {
        self.lock().push_back(word);
    }

    /// Puts a word back at the front, ahead of everything queued.
    pub fn push_front(&self, word: u32) {
        self.lock().push_front(word);
    }

    /// Removes the oldest word.
    pub fn pop(&self) -> Option<u32> {
        self.lock().pop_front()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of queued words.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Copies the queued words, oldest first.
    pub fn snapshot(&self) -> Vec<u32> {
        self.lock().iter().copied().collect()
    }

    /// Drops every queued word.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

/// The pair of buffers the memory unit talks to.
#[derive(Clone, Debug, Default)]
pub struct IoBuffers {
    /// Words arriving from the peer, consumed by `recv`.
    pub receive: WordQueue,
    /// Words produced by `send`, forwarded to the peer.
    pub send: WordQueue,
}

impl IoBuffers {
    /// Creates two empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties both buffers.
    pub fn clear(&self) {
        self.receive.clear();
        self.send.clear();
    }
}
