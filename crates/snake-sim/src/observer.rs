//! Game observer trait for rendering and data collection.

use snake_core::{AgentId, Position, Tick};
use snake_spatial::Tile;

use crate::{GameReport, StepOutcome};

/// Callbacks invoked by the game loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// Cell changes are delivered in batches at refresh points, right before a
/// pacing pause, followed by one `on_refresh`.  A renderer can therefore
/// draw each change as it arrives and present the frame on `on_refresh`.
///
/// # Example: terminal renderer
///
/// ```rust,ignore
/// struct Screen { /* … */ }
///
/// impl GameObserver for Screen {
///     fn on_cell_changed(&mut self, pos: Position, tile: Tile) {
///         self.put(pos, glyph(tile));
///     }
///     fn on_refresh(&mut self, _timeline: Tick) {
///         self.flush();
///     }
/// }
/// ```
pub trait GameObserver {
    /// One cell now holds `tile`.
    fn on_cell_changed(&mut self, _pos: Position, _tile: Tile) {}

    /// A batch of changes is complete; the board is consistent at `timeline`.
    fn on_refresh(&mut self, _timeline: Tick) {}

    /// An agent's move was applied.
    fn on_step(&mut self, _tick: Tick, _outcome: &StepOutcome) {}

    /// `old` was replaced by a fresh agent `new` at `at`.
    fn on_respawn(&mut self, _old: AgentId, _new: AgentId, _at: Position) {}

    /// Called once after the loop stops.
    fn on_game_over(&mut self, _report: &GameReport) {}
}

/// A [`GameObserver`] that does nothing.
pub struct NoopObserver;

impl GameObserver for NoopObserver {}
