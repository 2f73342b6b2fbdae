//! Game configuration.
//!
//! Everything a game needs is supplied at construction: board size, pacing,
//! seed, collision policy, and which consumables spawn.  The roster and the
//! portal map are built separately (see `snake-sim`'s loader) because they
//! reference agent controllers and the board.

use std::fmt;

use crate::{SnakeError, SnakeResult};

// ── Consumable ────────────────────────────────────────────────────────────────

/// A kind of item an agent can eat.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Consumable {
    /// Lengthens the eater by one segment.
    Food,
    /// Lowers the eater's speed weight by one (floor 1): it moves more often.
    Faster,
    /// Raises the eater's speed weight by one: it moves less often.
    Slower,
}

impl fmt::Display for Consumable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Consumable::Food => "food",
            Consumable::Faster => "faster",
            Consumable::Slower => "slower",
        };
        f.write_str(s)
    }
}

// ── RespawnPolicy ─────────────────────────────────────────────────────────────

/// What happens to an agent after a fatal collision.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RespawnPolicy {
    /// Drop the agent from the roster.  The game ends when the roster empties.
    #[default]
    Remove,
    /// Replace it with a fresh agent of the same controller kind at a random
    /// free cell.
    Respawn,
}

// ── SpawnerConfig ─────────────────────────────────────────────────────────────

/// One consumable spawner: which kind, and the size of the block it places.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnerConfig {
    pub kind: Consumable,
    pub width: i32,
    pub height: i32,
}

impl SpawnerConfig {
    /// A 2×2 block of `kind`, the classic arena item.
    pub const fn block(kind: Consumable) -> Self {
        Self { kind, width: 2, height: 2 }
    }
}

// ── GameConfig ────────────────────────────────────────────────────────────────

/// Top-level game configuration.
///
/// Typically built in code or deserialised (feature `serde`) by the
/// application crate and passed to `GameBuilder`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Board columns.
    pub width: i32,

    /// Board rows.
    pub height: i32,

    /// Real milliseconds per logical tick.  0 runs as fast as possible.
    pub tick_millis: u64,

    /// Master RNG seed.  The same seed and input trace always produce the
    /// same game.
    pub seed: u64,

    /// What to do with an agent after a fatal collision.
    pub respawn: RespawnPolicy,

    /// Body length of a respawned agent.
    pub respawn_length: usize,

    /// How many random cells or rectangles to sample before declaring the
    /// board full.
    pub spawn_attempts: u32,

    /// Consumable spawners, each running its own claim loop.
    pub spawners: Vec<SpawnerConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 40,
            tick_millis: 10,
            seed: 0,
            respawn: RespawnPolicy::Remove,
            respawn_length: 1,
            spawn_attempts: 10_000,
            spawners: vec![
                SpawnerConfig::block(Consumable::Food),
                SpawnerConfig::block(Consumable::Faster),
                SpawnerConfig::block(Consumable::Slower),
            ],
        }
    }
}

impl GameConfig {
    /// Number of cells on the board.
    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Reject configurations the game loop cannot run.
    pub fn validate(&self) -> SnakeResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SnakeError::Config(format!(
                "board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.respawn_length == 0 {
            return Err(SnakeError::Config("respawn_length must be at least 1".into()));
        }
        if self.spawn_attempts == 0 {
            return Err(SnakeError::Config("spawn_attempts must be at least 1".into()));
        }
        for s in &self.spawners {
            if s.width <= 0 || s.height <= 0 || s.width > self.width || s.height > self.height {
                return Err(SnakeError::Config(format!(
                    "{} spawner block {}x{} does not fit a {}x{} board",
                    s.kind, s.width, s.height, self.width, self.height
                )));
            }
        }
        Ok(())
    }
}
