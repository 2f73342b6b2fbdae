//! `World` — everything the scheduler and the spawners share.
//!
//! The game runs on one thread: the scheduler and every spawner are futures
//! polled by the same task, and each holds a `&RefCell<World>`.  A borrow is
//! taken for one synchronous section and always released before the next
//! `.await`, so the borrows never overlap.

use snake_agent::{Agent, AgentSpec};
use snake_core::{
    AgentId, Consumable, Direction, GameConfig, Position, RespawnPolicy, SimRng, SnakeError, Tick,
};
use snake_spatial::{Grid, Tile};
use snake_sync::WaitMap;
use tracing::{debug, info, warn};

use crate::{AgentStats, GameOutcome, SimError, SimResult};

// ── RosterEntry ───────────────────────────────────────────────────────────────

/// One agent plus its scheduling state.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub agent: Agent,
    /// Logical time at which the agent's next move is due.
    pub clock: Tick,
    /// Template for a respawned replacement.
    pub template: AgentSpec,
}

/// What became of a retired agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Retirement {
    /// Dropped from the roster; `last` if the roster is now empty.
    Removed { last: bool },
    /// Replaced in place by a fresh agent.
    Respawned { new: AgentId, at: Position },
    /// A replacement was due but no free cell could be found.
    NoRoom,
}

/// A head entering a watched cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    pub agent: AgentId,
    /// Moves applied before this one.  Orders claims that land on the same
    /// block before its spawner runs again.
    pub seq: u64,
}

// ── World ─────────────────────────────────────────────────────────────────────

pub struct World {
    pub grid: Grid,
    /// Scheduling order; ties on `clock` go to the earlier entry.
    pub roster: Vec<RosterEntry>,
    /// Consumable cells being watched by spawners, resolved with a
    /// [`Claim`] naming the agent whose head lands there.
    pub waits: WaitMap<Claim>,
    pub rng: SimRng,
    respawn: RespawnPolicy,
    respawn_length: usize,
    spawn_attempts: u32,
    next_id: AgentId,
    departed: Vec<AgentStats>,
    /// Moves applied so far; the next claim's sequence number.
    pub(crate) moves: u64,
}

impl World {
    pub fn new(config: &GameConfig, grid: Grid, rng: SimRng) -> Self {
        Self {
            grid,
            roster: Vec::new(),
            waits: WaitMap::new(),
            rng,
            respawn: config.respawn,
            respawn_length: config.respawn_length,
            spawn_attempts: config.spawn_attempts,
            next_id: AgentId(0),
            departed: Vec::new(),
            moves: 0,
        }
    }

    fn allocate_id(&mut self) -> AgentId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    /// Put a new agent on the board with its first move due at `clock`.
    ///
    /// The whole body starts stacked on `spec.start`.
    pub fn add_agent(&mut self, spec: AgentSpec, clock: Tick) -> SimResult<AgentId> {
        let (w, h) = (self.grid.width(), self.grid.height());
        if !spec.start.in_bounds(w, h) {
            return Err(SnakeError::OutOfBounds(spec.start, w, h).into());
        }
        if spec.length > self.grid.cell_count() {
            return Err(SimError::Config(format!(
                "initial length {} exceeds the {} cells of the board",
                spec.length,
                self.grid.cell_count()
            )));
        }
        if !self.grid.is_free(spec.start) {
            return Err(SimError::Config(format!("start cell {} is already occupied", spec.start)));
        }

        let id = self.allocate_id();
        let agent = Agent::new(id, spec.clone());
        self.grid.occupy(spec.start, Tile::Body(id));
        debug!(agent = %id, kind = ?agent.controller.kind(), start = %spec.start, "agent placed");
        self.roster.push(RosterEntry { agent, clock, template: spec });
        Ok(id)
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.roster.iter().map(|e| &e.agent).find(|a| a.id == id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.roster.iter_mut().map(|e| &mut e.agent).find(|a| a.id == id)
    }

    /// Apply a claimed consumable to `id`.
    ///
    /// Returns `Some(BoardFull)` when food makes the agent as long as the
    /// board has cells.  A claimant that has already left the roster is
    /// ignored.
    pub fn apply_effect(&mut self, id: AgentId, kind: Consumable) -> Option<GameOutcome> {
        let cells = self.grid.cell_count();
        let Some(agent) = self.agent_mut(id) else {
            warn!(agent = %id, %kind, "claimant no longer on the board; effect dropped");
            return None;
        };
        match kind {
            Consumable::Food => {
                agent.lengthen();
                if agent.len() >= cells {
                    info!(agent = %id, len = agent.len(), "board filled");
                    return Some(GameOutcome::BoardFull { winner: Some(id) });
                }
            }
            Consumable::Faster => agent.faster(),
            Consumable::Slower => agent.slower(),
        }
        debug!(agent = %id, %kind, len = agent.len(), speed = agent.speed, "consumable applied");
        None
    }

    /// Take the agent at roster index `idx` off the board after a fatal step,
    /// then remove or replace it according to the respawn policy.
    pub fn retire(&mut self, idx: usize) -> Retirement {
        let id = self.roster[idx].agent.id;
        let body: Vec<_> = self.roster[idx].agent.body.iter().collect();
        for p in body {
            self.grid.clear_if(p, Tile::Body(id));
        }

        match self.respawn {
            RespawnPolicy::Remove => {
                let entry = self.roster.remove(idx);
                self.departed.push(AgentStats::of(&entry.agent, false));
                Retirement::Removed { last: self.roster.is_empty() }
            }
            RespawnPolicy::Respawn => {
                let at = match self.grid.random_free(&mut self.rng, self.spawn_attempts, |_| true) {
                    Ok(p) => p,
                    Err(e) => {
                        warn!(agent = %id, error = %e, "no room to respawn");
                        return Retirement::NoRoom;
                    }
                };
                let turn = self.rng.gen_range(0..Direction::CARDINALS.len());
                let heading = Direction::CARDINALS[turn];
                let new = self.allocate_id();

                let old = &mut self.roster[idx];
                self.departed.push(AgentStats::of(&old.agent, false));
                let spec = AgentSpec {
                    controller: old.template.controller.fresh(),
                    start: at,
                    heading,
                    speed: old.template.speed,
                    length: self.respawn_length,
                };
                old.agent = Agent::new(new, spec);
                self.grid.occupy(at, Tile::Body(new));
                debug!(old = %id, new = %new, %at, "agent respawned");
                Retirement::Respawned { new, at }
            }
        }
    }

    /// Stats for every agent that ever played: departed first, then the
    /// current roster.
    pub fn stats(&self) -> Vec<AgentStats> {
        self.departed
            .iter()
            .cloned()
            .chain(self.roster.iter().map(|e| AgentStats::of(&e.agent, true)))
            .collect()
    }
}
