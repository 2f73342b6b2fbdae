//! Controllers: who decides an agent's next move.
//!
//! A [`HumanController`] reads a direction cell written by its input
//! listener; an [`AutoPilot`] plans with the router.  Both answer the same
//! question through [`Controller::propose_direction`].

use std::cell::Cell;
use std::rc::Rc;

use tracing::trace;

use snake_core::{Consumable, Direction, Key};
use snake_spatial::{Route, Tile, local_escape, shortest_path_to};
use snake_sync::LockstepConsumer;

use crate::StepContext;

// ── Controller ────────────────────────────────────────────────────────────────

/// Discriminant of [`Controller`], for configuration and reporting.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ControllerKind {
    Human,
    Auto,
}

/// The closed set of agent controllers.
#[derive(Debug, Clone)]
pub enum Controller {
    Human(HumanController),
    Auto(AutoPilot),
}

impl Controller {
    /// The next heading for the agent described by `ctx`.  `Direction::Stay`
    /// means the controller gives up this turn.
    pub fn propose_direction(&mut self, ctx: &StepContext<'_>) -> Direction {
        match self {
            Controller::Human(h) => h.propose_direction(ctx),
            Controller::Auto(a) => a.propose_direction(ctx),
        }
    }

    pub fn kind(&self) -> ControllerKind {
        match self {
            Controller::Human(_) => ControllerKind::Human,
            Controller::Auto(_) => ControllerKind::Auto,
        }
    }

    /// A clean controller of the same kind for a respawned agent.  A human
    /// controller keeps its input binding.
    pub fn fresh(&self) -> Controller {
        match self {
            Controller::Human(h) => Controller::Human(h.clone()),
            Controller::Auto(_) => Controller::Auto(AutoPilot::default()),
        }
    }

    pub fn as_human(&self) -> Option<&HumanController> {
        match self {
            Controller::Human(h) => Some(h),
            Controller::Auto(_) => None,
        }
    }
}

// ── Keymap ────────────────────────────────────────────────────────────────────

/// Which key steers which way.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Keymap {
    pub up: Key,
    pub left: Key,
    pub down: Key,
    pub right: Key,
}

impl Default for Keymap {
    /// The arrow keys.
    fn default() -> Self {
        Self {
            up: Key::ARROW_UP,
            left: Key::ARROW_LEFT,
            down: Key::ARROW_DOWN,
            right: Key::ARROW_RIGHT,
        }
    }
}

impl Keymap {
    /// A keymap from four characters given as up, left, down, right.
    pub const fn chars(up: char, left: char, down: char, right: char) -> Self {
        Self {
            up: Key::ascii(up),
            left: Key::ascii(left),
            down: Key::ascii(down),
            right: Key::ascii(right),
        }
    }

    /// `w a s d`.
    pub const fn wasd() -> Self {
        Self::chars('w', 'a', 's', 'd')
    }

    pub fn direction(&self, key: Key) -> Option<Direction> {
        [
            (self.up, Direction::Up),
            (self.left, Direction::Left),
            (self.down, Direction::Down),
            (self.right, Direction::Right),
        ]
        .into_iter()
        .find_map(|(k, d)| (k == key).then_some(d))
    }
}

// ── HumanController ───────────────────────────────────────────────────────────

/// Steered by key presses.
///
/// The intended direction lives in a shared cell: the input listener writes
/// it, the scheduler reads it.  Clones share the same cell, so a respawned
/// agent keeps responding to the same keys.
#[derive(Debug, Clone)]
pub struct HumanController {
    intent: Rc<Cell<Direction>>,
    keymap: Keymap,
}

impl HumanController {
    pub fn new(keymap: Keymap) -> Self {
        Self { intent: Rc::new(Cell::new(Direction::Right)), keymap }
    }

    pub fn keymap(&self) -> Keymap {
        self.keymap
    }

    /// The most recently requested direction.
    pub fn intent(&self) -> Direction {
        self.intent.get()
    }

    /// Record `key` if it belongs to this keymap.  Returns whether it did.
    pub fn apply_key(&self, key: Key) -> bool {
        match self.keymap.direction(key) {
            Some(dir) => {
                self.intent.set(dir);
                true
            }
            None => false,
        }
    }

    /// Overwrite the intent, e.g. with the heading of a newly placed body.
    pub fn face(&self, dir: Direction) {
        self.intent.set(dir);
    }

    /// Feed key presses from `input` into the intent cell until the stream
    /// ends.
    pub async fn listen(self, mut input: LockstepConsumer<Key>) {
        while let Some(key) = input.next().await {
            if self.apply_key(key) {
                trace!(?key, intent = %self.intent(), "human intent updated");
            }
        }
    }

    /// The buffered intent.  An intent that would reverse onto the body is
    /// not a move: it yields `Stay`, and the turn is forfeited.
    pub fn propose_direction(&self, ctx: &StepContext<'_>) -> Direction {
        let wanted = self.intent.get();
        if wanted.reverses(ctx.prev_dir) { Direction::Stay } else { wanted }
    }
}

// ── AutoPilot ─────────────────────────────────────────────────────────────────

/// Router-backed controller.
///
/// Hunts `Faster` items while its speed weight is above 1, `Food` after that.
/// A planned route is revalidated before every step; any invalidation throws
/// the whole route away and plans again from scratch.  With nothing
/// reachable it falls back to a short escape walk.
#[derive(Debug, Clone, Default)]
pub struct AutoPilot {
    route: Route,
    /// What the current route leads to; `None` for an escape walk.
    hunting: Option<Tile>,
}

impl AutoPilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining planned moves.
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn propose_direction(&mut self, ctx: &StepContext<'_>) -> Direction {
        if let Some(dir) = self.next_checked(ctx) {
            return dir;
        }
        self.reroute(ctx);
        self.next_checked(ctx).unwrap_or(Direction::Stay)
    }

    /// Pop the next planned move if it is still valid; otherwise drop the
    /// route.
    fn next_checked(&mut self, ctx: &StepContext<'_>) -> Option<Direction> {
        let dir = self.route.peek()?;
        if self.guard_holds(ctx, dir) {
            self.route.pop()
        } else {
            self.route = Route::default();
            self.hunting = None;
            None
        }
    }

    fn guard_holds(&self, ctx: &StepContext<'_>, dir: Direction) -> bool {
        let next = ctx.grid.tile_at(ctx.grid.resolve(ctx.head, dir));
        match (self.route.target, self.hunting) {
            (Some(target), Some(wanted)) => {
                (next.is_empty() || next == wanted) && ctx.grid.tile_at(target) == wanted
            }
            _ => !dir.is_stay() && !next.is_body(),
        }
    }

    fn reroute(&mut self, ctx: &StepContext<'_>) {
        let kind = if ctx.speed > 1 { Consumable::Faster } else { Consumable::Food };
        let wanted = Tile::Consumable(kind);
        match shortest_path_to(ctx.grid, ctx.head, wanted) {
            Some(route) => {
                trace!(target = ?route.target, steps = route.len(), "autopilot route planned");
                self.route = route;
                self.hunting = Some(wanted);
            }
            None => {
                let walk = local_escape(ctx.grid, ctx.head, ctx.prev_dir, ctx.body_len);
                trace!(steps = walk.len(), "autopilot escaping");
                self.route = Route::escape(walk);
                self.hunting = None;
            }
        }
    }
}
