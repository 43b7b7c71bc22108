//! Shared byte channel between the two relay loops
//!
//! Each direction of the relay gets one channel: the reading side of one
//! connection appends, the writing side of the other drains. The buffer is
//! unbounded so a producer never stalls on a slow consumer; a stalled
//! consumer therefore means unbounded growth, which is an accepted tradeoff
//! for a best-effort forwarding tool.

use std::sync::Mutex;

use tokio::sync::Notify;

/// Unbounded byte accumulator with a coalesced "data available" signal.
///
/// Single producer, single consumer. `Notify` holds at most one permit, so
/// any number of appends between drains collapse into a single wakeup.
pub struct ByteChannel {
    buf: Mutex<Vec<u8>>,
    notify: Notify,
}

impl ByteChannel {
    pub fn new() -> Self {
        Self {
            buf: Mutex::new(Vec::new()),
            notify: Notify::new(),
        }
    }

    /// Append bytes to the buffer and signal the consumer.
    ///
    /// Never blocks beyond the lock window; the lock is only held for the
    /// in-memory copy, never across an await.
    pub fn append(&self, bytes: &[u8]) {
        let mut buf = self.buf.lock().expect("channel lock poisoned");
        buf.extend_from_slice(bytes);
        drop(buf);
        self.notify.notify_one();
    }

    /// Wait until data is available, then take the entire buffer contents.
    ///
    /// The returned chunk is the concatenation of every append since the
    /// previous drain, and is never empty. Registering for notification
    /// before checking the buffer closes the window where an append lands
    /// between the check and the wait.
    pub async fn drain(&self) -> Vec<u8> {
        loop {
            let notified = self.notify.notified();
            {
                let mut buf = self.buf.lock().expect("channel lock poisoned");
                if !buf.is_empty() {
                    return std::mem::take(&mut *buf);
                }
            }
            notified.await;
        }
    }
}

impl Default for ByteChannel {
    fn default() -> Self {
        Self::new()
    }
}
