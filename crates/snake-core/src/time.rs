//! Arena time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter shared by every agent.
//! An agent that takes a step is charged some number of ticks; the scheduler
//! always moves whichever agent has been charged least so far.  The mapping to
//! wall-clock time is held in [`Pacing`]:
//!
//!   pause = (most-behind agent's tick − rendered tick) × tick_millis
//!
//! Integer ticks keep scheduling arithmetic exact and make a run reproducible
//! independently of how fast the host actually sleeps.

use std::fmt;
use std::time::Duration;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute logical tick.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, or 0 if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::AddAssign<u64> for Tick {
    #[inline]
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Pacing ────────────────────────────────────────────────────────────────────

/// Converts a logical backlog into a wall-clock pause.
///
/// `Pacing` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pacing {
    /// Real milliseconds per logical tick.  0 disables pacing entirely.
    pub tick_millis: u64,
}

impl Pacing {
    pub const fn new(tick_millis: u64) -> Self {
        Self { tick_millis }
    }

    /// How long to pause to bring the rendered timeline from `rendered` up to
    /// `next`.  `None` when no pause is due.
    pub fn delay(&self, rendered: Tick, next: Tick) -> Option<Duration> {
        let behind = next.since(rendered);
        if behind == 0 {
            return None;
        }
        Some(Duration::from_millis(behind.saturating_mul(self.tick_millis)))
    }
}
