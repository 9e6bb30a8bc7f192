//! Transport traits for the external send path.
//!
//! The transmit task forwards words through a [`WordSink`]. The TCP implementation
//! lives in [`crate::soc::net`]; tests substitute a mock.

use std::io;

/// Destination for words drained from the send buffer.
#[cfg_attr(test, mockall::automock)]
pub trait WordSink: Send {
    /// Delivers one word to the peer.
    ///
    /// An error means the word was not delivered; the caller keeps it queued.
    fn send_word(&mut self, word: u32) -> io::Result<()>;

    /// Drops any open connection so the next send reconnects.
    fn disconnect(&mut self);
}
