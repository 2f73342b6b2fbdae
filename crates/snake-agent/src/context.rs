//! Read-only state passed to a controller when its agent's turn comes up.

use snake_core::{Direction, Position};
use snake_spatial::Grid;

/// A snapshot of the stepping agent plus read access to the board.
///
/// Built by the scheduler immediately before asking for a direction, so the
/// controller never sees a half-applied step.
#[derive(Clone, Copy)]
pub struct StepContext<'a> {
    pub grid: &'a Grid,
    pub head: Position,
    pub prev_dir: Direction,
    pub body_len: usize,
    pub speed: u64,
}
