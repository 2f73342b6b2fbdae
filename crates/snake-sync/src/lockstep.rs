//! `Lockstep` — broadcast one ordered event stream to many consumers.
//!
//! # Barrier
//!
//! Each consumer pull parks a `oneshot` sender in the pending set and fires
//! the producer's single-slot demand notification.  The producer holds event
//! *N* until the pending set is as large as the number of registered
//! consumers, then resolves every pending pull at once and clears the set.
//! No consumer can therefore observe event *N + 1* before every consumer has
//! taken event *N*.
//!
//! ```text
//!   consumer pulls ──► pending: [tx, tx, tx]   (3 of 3 registered)
//!                                  │
//!   producer: push(ev) ───────────►┴──► tx.send(Some(ev)) × 3
//! ```
//!
//! A pull whose future is dropped before it resolves is withdrawn: the
//! producer discards its closed sender and keeps waiting for that consumer.
//!
//! Registering is allowed at any time.  A late consumer is simply counted
//! from the next round that broadcasts; rounds already delivered are never
//! revisited.  When the source ends every pending and every future pull
//! yields `None`, once.

use std::cell::RefCell;
use std::rc::Rc;

use futures::{Stream, StreamExt};
use tokio::sync::oneshot;
use tracing::{debug, trace};

// ── Shared state ──────────────────────────────────────────────────────────────

struct Shared<E> {
    /// Registered consumers.  Only ever grows.
    consumers: usize,
    /// One sender per outstanding pull for the current round.
    pending: Vec<oneshot::Sender<Option<E>>>,
    /// Single-slot continuation: fired whenever a pull arrives while the
    /// producer is waiting for demand.
    demand: Option<oneshot::Sender<()>>,
    /// Set once the source ends.
    stopped: bool,
    /// Rounds delivered so far.
    rounds: u64,
}

// ── Lockstep ──────────────────────────────────────────────────────────────────

/// Producer side of the fan-out.  Cloning yields another handle to the same
/// broadcaster.
pub struct Lockstep<E> {
    shared: Rc<RefCell<Shared<E>>>,
}

impl<E> Clone for Lockstep<E> {
    fn clone(&self) -> Self {
        Self { shared: Rc::clone(&self.shared) }
    }
}

impl<E: Clone> Default for Lockstep<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Lockstep<E> {
    pub fn new() -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                consumers: 0,
                pending: Vec::new(),
                demand: None,
                stopped: false,
                rounds: 0,
            })),
        }
    }

    /// Add a consumer.  It receives every event broadcast from now on.
    pub fn register(&self) -> LockstepConsumer<E> {
        let consumers = {
            let mut s = self.shared.borrow_mut();
            s.consumers += 1;
            s.consumers
        };
        debug!(consumers, "lockstep consumer registered");
        LockstepConsumer { shared: Rc::clone(&self.shared), finished: false }
    }

    pub fn consumer_count(&self) -> usize {
        self.shared.borrow().consumers
    }

    /// Number of events delivered so far.
    pub fn rounds(&self) -> u64 {
        self.shared.borrow().rounds
    }

    pub fn is_stopped(&self) -> bool {
        self.shared.borrow().stopped
    }

    /// Drive `source` to completion, delivering each event in lockstep, then
    /// end every consumer's stream.
    ///
    /// # Panics
    /// Panics if the broadcaster has already been stopped.
    pub async fn consume<S>(&self, source: S)
    where
        S: Stream<Item = E>,
    {
        assert!(!self.is_stopped(), "lockstep source consumed after the stream ended");
        futures::pin_mut!(source);
        while let Some(event) = source.next().await {
            self.push(event).await;
        }
        self.stop();
    }

    /// Deliver one event once every registered consumer is waiting for it.
    ///
    /// With no registered consumers the event is dropped immediately.
    pub async fn push(&self, event: E) {
        loop {
            let wake = {
                let mut s = self.shared.borrow_mut();
                assert!(!s.stopped, "lockstep push after the stream ended");
                // An abandoned pull leaves a closed sender behind; it must not
                // count as demand or its consumer would be counted twice.
                s.pending.retain(|tx| !tx.is_closed());
                if s.pending.len() >= s.consumers {
                    break;
                }
                let (tx, rx) = oneshot::channel();
                s.demand = Some(tx);
                rx
            };
            // A dropped slot just means "re-check"; the loop condition decides.
            let _ = wake.await;
        }

        let (pulls, round) = {
            let mut s = self.shared.borrow_mut();
            s.demand = None;
            s.rounds += 1;
            (std::mem::take(&mut s.pending), s.rounds)
        };
        trace!(round, consumers = pulls.len(), "lockstep round delivered");
        for pull in pulls {
            // The consumer may have stopped waiting; that pull is just lost.
            let _ = pull.send(Some(event.clone()));
        }
    }

    /// End the stream: resolve every pending pull with `None` and make every
    /// future pull return `None` immediately.  Idempotent.
    pub fn stop(&self) {
        let pulls = {
            let mut s = self.shared.borrow_mut();
            if s.stopped {
                return;
            }
            s.stopped = true;
            s.demand = None;
            std::mem::take(&mut s.pending)
        };
        debug!(pending = pulls.len(), "lockstep stream ended");
        for pull in pulls {
            let _ = pull.send(None);
        }
    }
}

// ── LockstepConsumer ──────────────────────────────────────────────────────────

/// One consumer's private delivery slot.
pub struct LockstepConsumer<E> {
    shared: Rc<RefCell<Shared<E>>>,
    finished: bool,
}

impl<E> LockstepConsumer<E> {
    /// Wait for the next event.  `None` means the stream has ended.
    ///
    /// # Panics
    /// Panics if called again after it already returned `None`.
    pub async fn next(&mut self) -> Option<E> {
        assert!(!self.finished, "lockstep consumer pulled after its stream ended");
        let slot = {
            let mut s = self.shared.borrow_mut();
            if s.stopped {
                None
            } else {
                let (tx, rx) = oneshot::channel();
                s.pending.push(tx);
                if let Some(demand) = s.demand.take() {
                    let _ = demand.send(());
                }
                Some(rx)
            }
        };

        // A dropped sender means the producer went away: treat as end.
        let event = match slot {
            Some(rx) => rx.await.ok().flatten(),
            None => None,
        };
        if event.is_none() {
            self.finished = true;
        }
        event
    }

    /// `true` once the stream has ended for this consumer.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Adapt the handle into a `futures::Stream`.
    pub fn into_stream(self) -> impl Stream<Item = E> {
        futures::stream::unfold(self, |mut consumer| async move {
            consumer.next().await.map(|event| (event, consumer))
        })
    }
}
