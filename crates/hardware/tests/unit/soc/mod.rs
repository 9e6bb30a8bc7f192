/// Shared word queues.
pub mod buffers;
