//! `snake-sim` — the game loop for the rust_snake arena.
//!
//! # One iteration
//!
//! ```text
//! loop:
//!   ① Select:    the roster entry with the lowest clock (ties: roster order).
//!   ② Pace:      if that clock is ahead of the rendered timeline, publish
//!                grid changes to the observer and sleep the difference.
//!   ③ Propose:   ask the agent's controller for a direction.
//!   ④ Apply:     Stay            → forfeit (collision-class)
//!                body ahead      → collision
//!                otherwise       → vacate tail, write head, notify waiters,
//!                                  charge speed × ceil(log2(len)) ticks
//!   ⑤ Retire:    collided agents are removed or respawned; an empty roster
//!                ends the game.
//! ```
//!
//! Consumable spawners run beside the scheduler in the same task: each places
//! a block, waits for any of its cells to be claimed, clears what is left and
//! applies its effect to the claimant.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use snake_agent::AgentSpec;
//! use snake_core::{Direction, GameConfig, Position};
//! use snake_sim::{GameBuilder, NoopObserver};
//!
//! let game = GameBuilder::new(GameConfig::default())
//!     .agent(AgentSpec::auto(Position::new(0, 10), Direction::Right))
//!     .agent(AgentSpec::auto(Position::new(0, 20), Direction::Right))
//!     .build()?;
//! let report = game.run_until_game_over(&mut NoopObserver).await;
//! println!("{}", report.outcome);
//! ```

pub mod builder;
pub mod error;
pub mod game;
pub mod loader;
pub mod observer;
pub mod outcome;
pub mod scheduler;
pub mod spawner;
pub mod world;


pub use builder::GameBuilder;
pub use error::{SimError, SimResult};
pub use game::{Game, StopHandle};
pub use loader::{load_portals_csv, load_portals_reader, load_roster_csv, load_roster_reader};
pub use observer::{GameObserver, NoopObserver};
pub use outcome::{AgentStats, GameOutcome, GameReport, StepOutcome};
pub use scheduler::TurnScheduler;
pub use spawner::Spawner;
pub use world::{Claim, Retirement, RosterEntry, World};
