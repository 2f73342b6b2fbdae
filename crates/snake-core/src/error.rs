//! Arena-wide error type.
//!
//! Routine game events (collisions, a full board, interruption) are values,
//! not errors.  `SnakeError` covers invalid configuration and placement only.

use thiserror::Error;

use crate::Position;

/// The top-level error type for `snake-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("position {0} lies outside the {1}x{2} board")]
    OutOfBounds(Position, i32, i32),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `snake-*` crates.
pub type SnakeResult<T> = Result<T, SnakeError>;
