//! `EventQueue` — multi-producer FIFO with blocking pop and cooperative
//! shutdown.
//!
//! # Why channels
//!
//! The queue is a classic mutex+condvar FIFO in spirit, built on
//! `crossbeam-channel`: an unbounded data channel carries the items and a
//! second, never-written signal channel carries the shutdown edge.  Dropping
//! the signal channel's sender closes it, and a closed channel is permanently
//! "ready" in `select!` — that one property gives shutdown its broadcast
//! semantics (every blocked popper wakes, not just one).
//!
//! # Contract
//!
//! - `push` always succeeds and never blocks.
//! - FIFO across all pushes; the serialization point is the channel itself.
//! - After `shutdown()`, buffered items are still delivered in order; pops
//!   return `None` only once the queue is drained.  Pushing after shutdown is
//!   permitted and the item is still delivered.
//! - `reset()` discards buffered items and returns to the pre-shutdown state.

use std::sync::Mutex;

use crossbeam_channel::{bounded, select, unbounded, Receiver, Sender};

struct Inner<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
    /// `Some` while open; dropped (closing `closed_rx`) on shutdown.
    closed_tx: Option<Sender<()>>,
    closed_rx: Receiver<()>,
}

impl<T> Inner<T> {
    fn new() -> Self {
        let (tx, rx) = unbounded();
        let (closed_tx, closed_rx) = bounded(0);
        Self {
            tx,
            rx,
            closed_tx: Some(closed_tx),
            closed_rx,
        }
    }
}

/// Thread-safe multi-producer FIFO with blocking pop and cooperative
/// shutdown.
///
/// Cloneable handles are not needed: the queue is shared behind an `Arc` and
/// every operation takes `&self`.
pub struct EventQueue<T> {
    inner: Mutex<Inner<T>>,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::new()),
        }
    }

    /// Append an item.  Always succeeds; wakes a blocked popper if any.
    pub fn push(&self, item: T) {
        let tx = self.inner.lock().unwrap().tx.clone();
        // The receiver lives inside `inner`, so the send can only fail if a
        // concurrent `reset` swapped the channel out — the item is then part
        // of the discarded backlog.
        let _ = tx.send(item);
    }

    /// Block until an item is available, or until shutdown is signaled and
    /// the queue is drained (`None`).
    pub fn pop_blocking(&self) -> Option<T> {
        let (rx, closed_rx) = {
            let inner = self.inner.lock().unwrap();
            (inner.rx.clone(), inner.closed_rx.clone())
        };
        select! {
            recv(rx) -> item => item.ok(),
            // Ready iff the signal channel is closed (nothing is ever sent
            // on it).  Drain leftovers before reporting closure.
            recv(closed_rx) -> _ => rx.try_recv().ok(),
        }
    }

    /// Non-blocking pop.
    pub fn try_pop(&self) -> Option<T> {
        let rx = self.inner.lock().unwrap().rx.clone();
        rx.try_recv().ok()
    }

    /// Signal shutdown.  Idempotent; wakes every blocked popper.
    pub fn shutdown(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.closed_tx = None;
    }

    /// `true` once `shutdown()` has been called (until the next `reset`).
    pub fn is_shut_down(&self) -> bool {
        self.inner.lock().unwrap().closed_tx.is_none()
    }

    /// Discard all buffered items and clear the shutdown flag.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = Inner::new();
    }

    /// Number of buffered items.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
