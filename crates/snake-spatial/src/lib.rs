//! `snake-spatial` — torus board, occupancy, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `Grid` (torus + portals + sparse occupancy), `Tile`         |
//! | [`router`]  | `Route`, `shortest_path_to` (BFS), `local_escape`           |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use grid::{CellChange, Grid, Tile};
pub use router::{ESCAPE_HORIZON, Route, local_escape, shortest_path_to};
