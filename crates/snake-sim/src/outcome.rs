//! How a game ends and what happened on one step.

use std::fmt;

use snake_agent::{Agent, ControllerKind};
use snake_core::{AgentId, Consumable, Position, Tick};

// ── StepOutcome ───────────────────────────────────────────────────────────────

/// The result of applying one agent's move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The head moved from `from` to `to`.  `ate` is the item that was on
    /// `to`, if any; its effect is applied by the owning spawner.
    Advanced { agent: AgentId, from: Position, to: Position, ate: Option<Consumable> },
    /// The head would have entered a body segment at `at`.  `with` is that
    /// segment's owner (possibly the agent itself).
    Collided { agent: AgentId, at: Position, with: AgentId },
    /// The controller had no legal move and gave up.
    Forfeited { agent: AgentId },
}

impl StepOutcome {
    pub fn agent(&self) -> AgentId {
        match *self {
            StepOutcome::Advanced { agent, .. }
            | StepOutcome::Collided { agent, .. }
            | StepOutcome::Forfeited { agent } => agent,
        }
    }

    /// `true` for the outcomes that retire the agent.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, StepOutcome::Advanced { .. })
    }
}

// ── GameOutcome ───────────────────────────────────────────────────────────────

/// Why the game loop stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    /// The last agent on the roster collided (or forfeited) and was removed.
    Collision { last: AgentId },
    /// Nothing more fits on the board.  `winner` is set when an agent grew to
    /// cover every cell; `None` when a spawner or respawn found no room.
    BoardFull { winner: Option<AgentId> },
    /// A stop was requested from outside.
    Interrupted,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameOutcome::Collision { .. } => "self-collision",
            GameOutcome::BoardFull { .. } => "board filled / win",
            GameOutcome::Interrupted => "interrupted",
        };
        f.write_str(s)
    }
}

// ── GameReport ────────────────────────────────────────────────────────────────

/// Per-agent summary at game end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentStats {
    pub id: AgentId,
    pub kind: ControllerKind,
    pub steps: u64,
    pub foods_eaten: usize,
    pub length: usize,
    pub speed: u64,
    /// `false` if the agent was removed or replaced by a respawn.
    pub alive: bool,
}

impl AgentStats {
    pub fn of(agent: &Agent, alive: bool) -> Self {
        Self {
            id: agent.id,
            kind: agent.controller.kind(),
            steps: agent.steps,
            foods_eaten: agent.foods_eaten(),
            length: agent.len(),
            speed: agent.speed,
            alive,
        }
    }
}

/// Returned by `Game::run_until_game_over`.
#[derive(Clone, Debug)]
pub struct GameReport {
    pub outcome: GameOutcome,
    /// Logical time of the last rendered frame.
    pub final_tick: Tick,
    /// Scheduler iterations (moves attempted).
    pub iterations: u64,
    /// Every agent that ever played, in the order it left or, for survivors,
    /// in roster order after those that left.
    pub agents: Vec<AgentStats>,
}

impl GameReport {
    pub fn stats(&self, id: AgentId) -> Option<&AgentStats> {
        self.agents.iter().find(|s| s.id == id)
    }

    pub fn survivors(&self) -> impl Iterator<Item = &AgentStats> {
        self.agents.iter().filter(|s| s.alive)
    }
}
