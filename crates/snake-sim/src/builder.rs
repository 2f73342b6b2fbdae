//! Fluent builder for constructing a [`Game`].

use futures::{Stream, StreamExt};
use futures::stream::LocalBoxStream;
use snake_agent::AgentSpec;
use snake_core::{GameConfig, Key, Pacing, Position, SimRng, Tick};
use snake_spatial::Grid;
use tracing::debug;

use crate::{Game, SimError, SimResult, Spawner, TurnScheduler, World};

/// Fluent builder for [`Game`].
///
/// # Required inputs
///
/// - [`GameConfig`]: board size, pacing, seed, respawn policy, spawners
/// - at least one agent via [`agent`](Self::agent) or [`roster`](Self::roster)
///
/// # Optional inputs
///
/// | Method             | Default                         |
/// |--------------------|---------------------------------|
/// | `.portal(a, b)`    | Plain torus, no portals         |
/// | `.input(stream)`   | No key input; humans keep going |
///
/// # Example
///
/// ```rust,ignore
/// let human = HumanController::new(Keymap::default());
/// let game = GameBuilder::new(GameConfig::default())
///     .agent(AgentSpec::human(Position::new(0, 10), Direction::Right, human))
///     .agent(AgentSpec::auto(Position::new(0, 20), Direction::Right))
///     .input(keys)
///     .build()?;
/// let report = game.run_until_game_over(&mut NoopObserver).await;
/// ```
pub struct GameBuilder {
    config: GameConfig,
    roster: Vec<AgentSpec>,
    portals: Vec<(Position, Position)>,
    input: Option<LocalBoxStream<'static, Key>>,
}

impl GameBuilder {
    pub fn new(config: GameConfig) -> Self {
        Self { config, roster: Vec::new(), portals: Vec::new(), input: None }
    }

    /// Append one agent.  Roster order is the scheduling tie-break.
    pub fn agent(mut self, spec: AgentSpec) -> Self {
        self.roster.push(spec);
        self
    }

    /// Append several agents, e.g. from [`load_roster_csv`][crate::load_roster_csv].
    pub fn roster(mut self, specs: impl IntoIterator<Item = AgentSpec>) -> Self {
        self.roster.extend(specs);
        self
    }

    /// Moving onto `from` (which may lie one step off the board) lands on `to`.
    pub fn portal(mut self, from: Position, to: Position) -> Self {
        self.portals.push((from, to));
        self
    }

    pub fn portals(mut self, pairs: impl IntoIterator<Item = (Position, Position)>) -> Self {
        self.portals.extend(pairs);
        self
    }

    /// Key events for every human agent.  Each key is delivered to all human
    /// controllers in lockstep; the stream is consumed on the game's task.
    pub fn input<S>(mut self, source: S) -> Self
    where
        S: Stream<Item = Key> + 'static,
    {
        self.input = Some(source.boxed_local());
        self
    }

    /// Validate inputs, place the agents and return a ready-to-run [`Game`].
    pub fn build(self) -> SimResult<Game> {
        self.config.validate()?;
        if self.roster.is_empty() {
            return Err(SimError::Config("the roster has no agents".into()));
        }

        // ── Board ─────────────────────────────────────────────────────────
        let mut grid = Grid::new(self.config.width, self.config.height);
        for (from, to) in self.portals {
            grid.add_portal(from, to)?;
        }

        // ── Randomness: one stream per spawner, the rest for respawns ────
        let mut rng = SimRng::new(self.config.seed);
        let spawners: Vec<Spawner> = self
            .config
            .spawners
            .iter()
            .enumerate()
            .map(|(i, &s)| Spawner::new(s, rng.child(i as u64 + 1), self.config.spawn_attempts))
            .collect();

        // ── Agents ────────────────────────────────────────────────────────
        let mut world = World::new(&self.config, grid, rng);
        let humans: Vec<_> =
            self.roster.iter().filter_map(|s| s.controller.as_human().cloned()).collect();
        for spec in self.roster {
            world.add_agent(spec, Tick::ZERO)?;
        }
        debug!(
            agents = world.roster.len(),
            portals = world.grid.portal_count(),
            "board prepared"
        );

        let scheduler = TurnScheduler::new(Pacing::new(self.config.tick_millis));
        let mut game = Game::assemble(world, scheduler, spawners, self.input);
        for human in humans {
            game.register_controller(human);
        }
        Ok(game)
    }
}
