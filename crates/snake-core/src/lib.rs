//! `snake-core` — foundational types for the `rust_snake` arena.
//!
//! This crate is a dependency of every other `snake-*` crate.  It has no
//! `snake-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`geom`]        | `Position`, `Direction`, `Key`                        |
//! | [`time`]        | `Tick`, `Pacing`                                      |
//! | [`config`]      | `GameConfig`, `RespawnPolicy`, `SpawnerConfig`        |
//! | [`rng`]         | `SimRng`                                              |
//! | [`error`]       | `SnakeError`, `SnakeResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Consumable, GameConfig, RespawnPolicy, SpawnerConfig};
pub use error::{SnakeError, SnakeResult};
pub use geom::{Direction, Key, Position};
pub use ids::AgentId;
pub use rng::SimRng;
pub use time::{Pacing, Tick};
