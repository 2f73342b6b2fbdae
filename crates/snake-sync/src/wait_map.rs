//! `WaitMap` — wait for a cell to be claimed, and learn by whom.
//!
//! A spawner calls [`WaitMap::wait`] for each cell it watches and races the
//! resulting [`Waiter`]s; the scheduler calls [`WaitMap::notify`] every time
//! an agent enters a cell.  Notification resolves *every* waiter on that cell
//! and clears the cell's list, so a later `wait` on the same cell starts
//! fresh.
//!
//! Cancellation is dropping the `Waiter`.  A notification reaching a dropped
//! waiter is a no-op.  Each waiter resolves at most once because
//! `oneshot::Sender::send` consumes the sender.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use rustc_hash::FxHashMap;
use tokio::sync::oneshot;

use snake_core::Position;

/// Position-keyed registry of pending waiters.
pub struct WaitMap<T> {
    waiters: FxHashMap<Position, Vec<oneshot::Sender<T>>>,
}

impl<T> Default for WaitMap<T> {
    fn default() -> Self {
        Self { waiters: FxHashMap::default() }
    }
}

impl<T: Clone> WaitMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `pos`.  The returned waiter resolves with the
    /// value passed to the next [`notify`](Self::notify) for `pos`.
    pub fn wait(&mut self, pos: Position) -> Waiter<T> {
        let (tx, rx) = oneshot::channel();
        let list = self.waiters.entry(pos).or_default();
        list.retain(|w| !w.is_closed());
        list.push(tx);
        Waiter { pos, rx }
    }

    /// Resolve every live waiter on `pos` with `value` and forget them.
    /// Returns how many live waiters were resolved.
    pub fn notify(&mut self, pos: Position, value: T) -> usize {
        let Some(list) = self.waiters.remove(&pos) else {
            return 0;
        };
        list.into_iter()
            .filter(|tx| !tx.is_closed())
            .filter_map(|tx| tx.send(value.clone()).ok())
            .count()
    }

    /// Live (not cancelled) waiters on `pos`.
    pub fn pending(&self, pos: Position) -> usize {
        self.waiters
            .get(&pos)
            .map_or(0, |list| list.iter().filter(|w| !w.is_closed()).count())
    }

    /// Live waiters across every position.
    pub fn pending_total(&self) -> usize {
        self.waiters.values().flatten().filter(|w| !w.is_closed()).count()
    }

    /// Drop the bookkeeping for cancelled waiters.  Positions left with no
    /// live waiter are removed entirely.
    pub fn prune(&mut self) {
        self.waiters.retain(|_, list| {
            list.retain(|w| !w.is_closed());
            !list.is_empty()
        });
    }

    /// Number of positions with at least one registered (possibly cancelled)
    /// waiter.
    pub fn watched_positions(&self) -> usize {
        self.waiters.len()
    }
}

// ── Waiter ────────────────────────────────────────────────────────────────────

/// A pending claim on one position.
///
/// Resolves to `Some(value)` when notified, or `None` if the registry was
/// dropped first.
#[must_use = "a waiter does nothing unless awaited; drop it to cancel"]
pub struct Waiter<T> {
    pos: Position,
    rx: oneshot::Receiver<T>,
}

impl<T> Waiter<T> {
    /// The position this waiter watches.
    pub fn position(&self) -> Position {
        self.pos
    }
}

impl<T> Future for Waiter<T> {
    type Output = Option<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(Result::ok)
    }
}
