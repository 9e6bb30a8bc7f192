//! Network transport for the send/receive buffers.
//!
//! Two background threads emulate the external peripherals:
//! 1. **Receive task:** Accepts TCP connections and appends every big-endian word it
//!    reads to the receive buffer.
//! 2. **Transmit task:** Drains the send buffer through a [`WordSink`]. A failed send
//!    is reported, the word is put back at the front of the queue, and the task
//!    retries after the configured delay.
//!
//! Both tasks poll a shared cancellation flag. The transmit task exits once the flag is
//! set and its queue is empty; after cancellation each remaining word gets one more
//! attempt, and anything still undeliverable is reported before the task stops.

use std::io::{self, ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::NetworkConfig;
use crate::soc::buffers::WordQueue;
use crate::soc::traits::WordSink;

/// Idle poll interval of both tasks.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Read timeout on accepted connections, bounding cancellation latency.
const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// TCP connection to the peer, opened lazily.
#[derive(Debug)]
pub struct TcpSink {
    peer: SocketAddr,
    stream: Option<TcpStream>,
}

impl TcpSink {
    /// Creates a sink for `peer` without connecting.
    pub const fn new(peer: SocketAddr) -> Self {
        Self { peer, stream: None }
    }
}

impl WordSink for TcpSink {
    fn send_word(&mut self, word: u32) -> io::Result<()> {
        if self.stream.is_none() {
            self.stream = Some(TcpStream::connect(self.peer)?);
            debug!(peer = %self.peer, "transmit connection opened");
        }
        match self.stream.as_mut() {
            Some(stream) => stream.write_all(&word.to_be_bytes()),
            None => Err(ErrorKind::NotConnected.into()),
        }
    }

    fn disconnect(&mut self) {
        self.stream = None;
    }
}

/// Drains `queue` through `sink` until cancelled and empty.
///
/// # Arguments
///
/// * `sink` - Destination of each word.
/// * `queue` - The send buffer.
/// * `cancel` - Set by the owner to request shutdown.
/// * `retry` - Delay after a failed send.
///
/// # Returns
///
/// The number of words delivered.
pub fn transmit_loop(
    sink: &mut dyn WordSink,
    queue: &WordQueue,
    cancel: &AtomicBool,
    retry: Duration,
) -> u64 {
    let mut delivered = 0;
    loop {
        let cancelled = cancel.load(Ordering::Acquire);
        let Some(word) = queue.pop() else {
            if cancelled {
                return delivered;
            }
            thread::sleep(POLL_INTERVAL);
            continue;
        };

        match sink.send_word(word) {
            Ok(()) => delivered += 1,
            Err(err) => {
                sink.disconnect();
                queue.push_front(word);
                if cancelled {
                    warn!(
                        error = %err,
                        undelivered = queue.len(),
                        "transmit failed during shutdown; giving up"
                    );
                    return delivered;
                }
                warn!(error = %err, word = format_args!("{word:#010x}"), "transmit failed; will retry");
                thread::sleep(retry);
            }
        }
    }
}

/// Reads big-endian words from `stream` into `queue` until EOF or cancellation.
fn receive_connection(mut stream: TcpStream, queue: &WordQueue, cancel: &AtomicBool) {
    if let Err(err) = stream.set_read_timeout(Some(READ_TIMEOUT)) {
        warn!(error = %err, "cannot set receive timeout");
    }
    let mut buf = [0u8; 4];
    let mut filled = 0;
    while !cancel.load(Ordering::Acquire) {
        match stream.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => {
                filled += n;
                if filled == buf.len() {
                    queue.push(u32::from_be_bytes(buf));
                    filled = 0;
                }
            }
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {}
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => {
                warn!(error = %err, "receive failed; dropping connection");
                break;
            }
        }
    }
    if filled != 0 {
        warn!(bytes = filled, "receive connection closed mid-word");
    }
}

/// Accepts connections on `listener` until cancelled.
fn receive_loop(listener: &TcpListener, queue: &WordQueue, cancel: &AtomicBool) {
    while !cancel.load(Ordering::Acquire) {
        match listener.accept() {
            Ok((stream, from)) => {
                debug!(%from, "receive connection accepted");
                if let Err(err) = stream.set_nonblocking(false) {
                    warn!(error = %err, "cannot configure receive connection");
                    continue;
                }
                receive_connection(stream, queue, cancel);
            }
            Err(err) if err.kind() == ErrorKind::WouldBlock => thread::sleep(POLL_INTERVAL),
            Err(err) => {
                warn!(error = %err, "accept failed");
                thread::sleep(POLL_INTERVAL);
            }
        }
    }
}

/// Handles to the running network tasks.
#[derive(Debug)]
pub struct NetworkTasks {
    cancel: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
    local_addr: Option<SocketAddr>,
}

impl NetworkTasks {
    /// Starts the tasks named in `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - Listen and peer addresses; an absent address disables that task.
    /// * `receive` - Buffer the receive task appends to.
    /// * `send` - Buffer the transmit task drains.
    ///
    /// # Returns
    ///
    /// The running tasks, or the error from binding the listen address.
    pub fn start(config: &NetworkConfig, receive: &WordQueue, send: &WordQueue) -> io::Result<Self> {
        let cancel = Arc::new(AtomicBool::new(false));
        let mut handles = Vec::new();
        let mut local_addr = None;

        if let Some(listen) = config.listen {
            let listener = TcpListener::bind(listen)?;
            listener.set_nonblocking(true)?;
            local_addr = Some(listener.local_addr()?);
            info!(addr = ?local_addr, "receive task listening");
            let queue = receive.clone();
            let flag = Arc::clone(&cancel);
            handles.push(
                thread::Builder::new()
                    .name("dualsim-recv".into())
                    .spawn(move || receive_loop(&listener, &queue, &flag))?,
            );
        }

        if let Some(peer) = config.peer {
            let queue = send.clone();
            let flag = Arc::clone(&cancel);
            let retry = Duration::from_millis(config.retry_ms);
            handles.push(
                thread::Builder::new()
                    .name("dualsim-send".into())
                    .spawn(move || {
                        let mut sink = TcpSink::new(peer);
                        let delivered = transmit_loop(&mut sink, &queue, &flag, retry);
                        info!(delivered, "transmit task finished");
                    })?,
            );
        }

        Ok(Self {
            cancel,
            handles,
            local_addr,
        })
    }

    /// Address the receive task is bound to, if it runs.
    pub const fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Signals cancellation and waits for both tasks to finish.
    pub fn shutdown(self) {
        self.cancel.store(true, Ordering::Release);
        for handle in self.handles {
            if handle.join().is_err() {
                warn!("network task panicked");
            }
        }
    }
}
