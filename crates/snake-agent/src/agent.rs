//! Agent state and the step-cost rule.

use snake_core::{AgentId, Direction, Position};

use crate::{AutoPilot, BodyRing, Controller, HumanController, StepContext};
use snake_spatial::Grid;

/// Everything needed to put a new agent on the board.
#[derive(Debug, Clone)]
pub struct AgentSpec {
    pub controller: Controller,
    pub start: Position,
    pub heading: Direction,
    /// Speed weight: ticks charged per step before the length factor.
    /// Larger is slower.
    pub speed: u64,
    /// Initial body length (at least 1).
    pub length: usize,
}

/// Speed weight of a freshly configured agent.
pub const DEFAULT_SPEED: u64 = 10;
/// Body length of a freshly configured agent.
pub const DEFAULT_LENGTH: usize = 6;

impl AgentSpec {
    /// An autopilot at `start` with the default speed and length.
    pub fn auto(start: Position, heading: Direction) -> Self {
        Self {
            controller: Controller::Auto(AutoPilot::new()),
            start,
            heading,
            speed: DEFAULT_SPEED,
            length: DEFAULT_LENGTH,
        }
    }

    /// A keyboard-driven agent at `start` with the default speed and length.
    pub fn human(start: Position, heading: Direction, controller: HumanController) -> Self {
        Self { controller: Controller::Human(controller), ..Self::auto(start, heading) }
    }

    pub fn with_speed(mut self, speed: u64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }
}

/// One snake on the board.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub controller: Controller,
    pub body: BodyRing,
    /// Heading of the last move actually taken.
    pub prev_dir: Direction,
    pub speed: u64,
    /// Moves taken so far.
    pub steps: u64,
    initial_len: usize,
}

impl Agent {
    pub fn new(id: AgentId, spec: AgentSpec) -> Self {
        let heading = if spec.heading.is_stay() { Direction::Right } else { spec.heading };
        if let Some(human) = spec.controller.as_human() {
            human.face(heading);
        }
        Self {
            id,
            controller: spec.controller,
            body: BodyRing::new(spec.start, spec.length),
            prev_dir: heading,
            speed: spec.speed.max(1),
            steps: 0,
            initial_len: spec.length.max(1),
        }
    }

    #[inline]
    pub fn head(&self) -> Position {
        self.body.head()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never empty; see [`BodyRing::is_empty`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Segments gained since the agent was created.
    #[inline]
    pub fn foods_eaten(&self) -> usize {
        self.len() - self.initial_len
    }

    /// Ticks charged for the next step: `speed × length_factor(len)`.
    #[inline]
    pub fn step_cost(&self) -> u64 {
        self.speed * length_factor(self.len())
    }

    /// Ask the controller which way to go next.
    pub fn propose_direction(&mut self, grid: &Grid) -> Direction {
        let ctx = StepContext {
            grid,
            head: self.head(),
            prev_dir: self.prev_dir,
            body_len: self.len(),
            speed: self.speed,
        };
        self.controller.propose_direction(&ctx)
    }

    pub fn lengthen(&mut self) {
        self.body.grow();
    }

    /// Lower the speed weight by one, never below 1.
    pub fn faster(&mut self) {
        self.speed = self.speed.saturating_sub(1).max(1);
    }

    pub fn slower(&mut self) {
        self.speed += 1;
    }
}

/// `max(1, ceil(log2(len)))`: how many ticks a step costs per unit of speed
/// weight at body length `len`.
#[inline]
pub fn length_factor(len: usize) -> u64 {
    if len <= 2 {
        return 1;
    }
    // ceil(log2(n)) for n ≥ 2 is the bit width of n − 1.
    u64::from(usize::BITS - (len - 1).leading_zeros())
}
