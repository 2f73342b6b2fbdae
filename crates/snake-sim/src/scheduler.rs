//! `TurnScheduler` — weighted discrete-event turn order with pacing.
//!
//! Every roster entry carries a clock: the logical tick at which its next
//! move is due.  Each iteration the scheduler picks the lowest clock (ties
//! go to roster order), and if that clock is ahead of the rendered timeline
//! it publishes pending grid changes and pauses `tick_millis` real
//! milliseconds per tick of backlog.  The chosen agent then moves and its
//! clock is charged `speed × length_factor(len)`.
//!
//! A faster agent (lower weight) is therefore picked proportionally more
//! often; with equal weights agents strictly alternate.

use std::cell::RefCell;

use snake_core::{Pacing, Tick};
use snake_spatial::Tile;
use tracing::{debug, info, trace};

use crate::{Claim, GameObserver, GameOutcome, Retirement, RosterEntry, StepOutcome, World};

pub struct TurnScheduler {
    pacing: Pacing,
    timeline: Tick,
    iterations: u64,
}

impl TurnScheduler {
    pub fn new(pacing: Pacing) -> Self {
        Self { pacing, timeline: Tick::ZERO, iterations: 0 }
    }

    /// Logical time of the last rendered frame.
    pub fn timeline(&self) -> Tick {
        self.timeline
    }

    /// Moves attempted so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Index of the entry due next: lowest clock, earliest on ties.
    pub fn select(roster: &[RosterEntry]) -> Option<usize> {
        roster.iter().enumerate().min_by_key(|(i, e)| (e.clock, *i)).map(|(i, _)| i)
    }

    /// Run iterations until the game ends.
    pub async fn run<O: GameObserver>(
        &mut self,
        world: &RefCell<World>,
        observer: &mut O,
    ) -> GameOutcome {
        loop {
            if let Some(outcome) = self.turn(world, observer).await {
                return outcome;
            }
        }
    }

    /// One scheduler iteration.  Returns `Some` when the game is over.
    pub async fn turn<O: GameObserver>(
        &mut self,
        world: &RefCell<World>,
        observer: &mut O,
    ) -> Option<GameOutcome> {
        let (idx, due) = {
            let w = world.borrow();
            let Some(idx) = Self::select(&w.roster) else {
                // Only reachable if the game was built without agents.
                return Some(GameOutcome::Collision { last: Default::default() });
            };
            (idx, w.roster[idx].clock)
        };

        if due > self.timeline {
            self.refresh(world, observer);
            self.pause(due).await;
            self.timeline = due;
        }

        self.iterations += 1;
        let outcome = step(&mut world.borrow_mut(), idx);
        trace!(tick = %self.timeline, ?outcome, "step");
        observer.on_step(self.timeline, &outcome);
        if !outcome.is_fatal() {
            return None;
        }

        let agent = outcome.agent();
        let mut w = world.borrow_mut();
        match w.retire(idx) {
            Retirement::Removed { last: true } => {
                info!(%agent, tick = %self.timeline, "last agent down");
                Some(GameOutcome::Collision { last: agent })
            }
            Retirement::Removed { last: false } => {
                debug!(%agent, remaining = w.roster.len(), "agent removed");
                None
            }
            Retirement::Respawned { new, at } => {
                let entry = &mut w.roster[idx];
                entry.clock = entry.clock.max(self.timeline) + entry.agent.step_cost();
                observer.on_respawn(agent, new, at);
                None
            }
            Retirement::NoRoom => Some(GameOutcome::BoardFull { winner: None }),
        }
    }

    /// Hand every journaled cell change to the observer, then mark the frame.
    pub fn refresh<O: GameObserver>(&self, world: &RefCell<World>, observer: &mut O) {
        let changes = world.borrow_mut().grid.drain_changes();
        for (pos, tile) in changes {
            observer.on_cell_changed(pos, tile);
        }
        observer.on_refresh(self.timeline);
    }

    /// Sleep off the backlog up to `due`.  Always yields at least once so the
    /// spawners sharing this task get polled even with pacing disabled.
    async fn pause(&self, due: Tick) {
        match self.pacing.delay(self.timeline, due) {
            Some(d) if !d.is_zero() => tokio::time::sleep(d).await,
            _ => tokio::task::yield_now().await,
        }
    }
}

/// Apply one move for the agent at roster index `idx`.
///
/// Moving onto one's own tail cell is allowed when that cell is vacated by
/// the same move.  Any other body cell is a collision, and a `Stay` proposal
/// is a forfeit; neither changes the board.
pub fn step(world: &mut World, idx: usize) -> StepOutcome {
    let World { grid, roster, waits, moves, .. } = world;
    let entry = &mut roster[idx];
    let agent = &mut entry.agent;
    let id = agent.id;

    let dir = agent.propose_direction(grid);
    if dir.is_stay() {
        return StepOutcome::Forfeited { agent: id };
    }

    let from = agent.head();
    let to = grid.resolve(from, dir);
    let tail = agent.body.tail();
    let vacates = agent.body.tail_is_vacated();
    let ahead = grid.tile_at(to);
    if let Tile::Body(owner) = ahead {
        let own_tail = owner == id && vacates && to == tail;
        if !own_tail {
            return StepOutcome::Collided { agent: id, at: to, with: owner };
        }
    }

    if vacates {
        grid.clear_if(tail, Tile::Body(id));
    }
    agent.body.advance(to);
    agent.prev_dir = dir;
    agent.steps += 1;
    grid.occupy(to, Tile::Body(id));
    waits.notify(to, Claim { agent: id, seq: *moves });
    *moves += 1;
    entry.clock += agent.step_cost();

    let ate = match ahead {
        Tile::Consumable(kind) => Some(kind),
        _ => None,
    };
    StepOutcome::Advanced { agent: id, from, to, ate }
}
