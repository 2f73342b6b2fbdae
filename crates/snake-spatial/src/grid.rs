//! `Grid` — the torus board and its sole occupancy map.
//!
//! # Representation
//!
//! Occupancy is sparse: only non-empty cells are stored, in an `FxHashMap`
//! keyed by `Position`.  Boards are mostly empty (a handful of snakes and
//! items), so lookups stay O(1) and memory scales with what is on the board
//! rather than with its area.
//!
//! # Change journal
//!
//! Every mutation that actually changes a cell is appended to a journal.  The
//! game loop drains the journal only at refresh points (right before a pacing
//! pause), so a multi-cell region write issued cell by cell is never observed
//! half-done.
//!
//! # Portals
//!
//! A portal maps a source coordinate to a destination.  [`Grid::resolve`]
//! applies the portal lookup to the raw, unwrapped neighbour *before*
//! wrapping, so a source just off the board edge (e.g. `(-1, 5)`) replaces
//! the usual wrap-around for that row.

use rustc_hash::FxHashMap;

use snake_core::{AgentId, Consumable, Direction, Position, SimRng};

use crate::{SpatialError, SpatialResult};

// ── Tile ──────────────────────────────────────────────────────────────────────

/// What occupies one cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Empty,
    /// A body segment of the given agent.
    Body(AgentId),
    /// An uneaten item.
    Consumable(Consumable),
}

impl Tile {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Tile::Empty
    }

    #[inline]
    pub fn is_body(self) -> bool {
        matches!(self, Tile::Body(_))
    }

    /// The owning agent of a body segment.
    #[inline]
    pub fn body_owner(self) -> Option<AgentId> {
        match self {
            Tile::Body(id) => Some(id),
            _ => None,
        }
    }
}

/// One journaled cell mutation: the cell and its new contents.
pub type CellChange = (Position, Tile);

// ── Grid ──────────────────────────────────────────────────────────────────────

/// A `width × height` torus with optional portals.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: FxHashMap<Position, Tile>,
    portals: FxHashMap<Position, Position>,
    changes: Vec<CellChange>,
}

impl Grid {
    /// An empty board.  Dimensions are validated by `GameConfig::validate`;
    /// non-positive values are clamped to 1.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            cells: FxHashMap::default(),
            portals: FxHashMap::default(),
            changes: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells on the board.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of non-empty cells.
    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }

    /// Fold any coordinate onto the board.
    #[inline]
    pub fn wrap(&self, pos: Position) -> Position {
        pos.wrap(self.width, self.height)
    }

    // ── Portals ───────────────────────────────────────────────────────────

    /// Link `from` to `to`.  `to` must lie on the board; `from` may lie one
    /// step off an edge to replace that edge's wrap-around.
    pub fn add_portal(&mut self, from: Position, to: Position) -> SpatialResult<()> {
        if !to.in_bounds(self.width, self.height) {
            return Err(SpatialError::PortalOutOfBounds(to));
        }
        let reach = Position::new(from.x.clamp(-1, self.width), from.y.clamp(-1, self.height));
        if reach != from {
            return Err(SpatialError::PortalOutOfBounds(from));
        }
        self.portals.insert(from, to);
        Ok(())
    }

    /// Where a portal at `from` leads, if any.
    #[inline]
    pub fn portal(&self, from: Position) -> Option<Position> {
        self.portals.get(&from).copied()
    }

    pub fn portal_count(&self) -> usize {
        self.portals.len()
    }

    /// The cell an agent at `pos` reaches by moving one step in `dir`.
    ///
    /// The raw neighbour is looked up in the portal map first; the result is
    /// then wrapped onto the torus.  `Direction::Stay` yields `pos` itself.
    pub fn resolve(&self, pos: Position, dir: Direction) -> Position {
        if dir.is_stay() {
            return self.wrap(pos);
        }
        let raw = pos.offset(dir);
        let landed = self.portal(raw).unwrap_or(raw);
        self.wrap(landed)
    }

    // ── Single-cell occupancy ─────────────────────────────────────────────

    /// Contents of the cell at `pos` (wrapped).
    #[inline]
    pub fn tile_at(&self, pos: Position) -> Tile {
        self.cells.get(&self.wrap(pos)).copied().unwrap_or(Tile::Empty)
    }

    #[inline]
    pub fn is_free(&self, pos: Position) -> bool {
        self.tile_at(pos).is_empty()
    }

    /// Overwrite the cell at `pos` with `tile`.  Writing `Tile::Empty` clears
    /// it.  Only real changes are journaled.
    pub fn occupy(&mut self, pos: Position, tile: Tile) {
        let pos = self.wrap(pos);
        let previous = if tile.is_empty() {
            self.cells.remove(&pos)
        } else {
            self.cells.insert(pos, tile)
        };
        if previous.unwrap_or(Tile::Empty) != tile {
            self.changes.push((pos, tile));
        }
    }

    /// Empty the cell at `pos`.
    #[inline]
    pub fn clear(&mut self, pos: Position) {
        self.occupy(pos, Tile::Empty);
    }

    /// Empty the cell at `pos` only if it still holds `expected`.  Returns
    /// whether the cell was cleared.
    pub fn clear_if(&mut self, pos: Position, expected: Tile) -> bool {
        if self.tile_at(pos) == expected && !expected.is_empty() {
            self.clear(pos);
            true
        } else {
            false
        }
    }

    /// Iterate over every non-empty cell (arbitrary order).
    pub fn occupied(&self) -> impl Iterator<Item = CellChange> + '_ {
        self.cells.iter().map(|(&p, &t)| (p, t))
    }

    // ── Rectangles ────────────────────────────────────────────────────────

    /// The cells of the `width × height` rectangle whose top-left corner is
    /// `origin`, row by row, wrapped onto the board.
    pub fn rect_cells(
        &self,
        origin: Position,
        width: i32,
        height: i32,
    ) -> impl Iterator<Item = Position> + '_ {
        (0..height).flat_map(move |dy| {
            (0..width).map(move |dx| self.wrap(Position::new(origin.x + dx, origin.y + dy)))
        })
    }

    /// `true` if every cell of the rectangle is empty.
    pub fn free_rect(&self, origin: Position, width: i32, height: i32) -> bool {
        self.rect_cells(origin, width, height).all(|p| self.is_free(p))
    }

    /// Fill the rectangle with `tile`.
    pub fn occupy_rect(&mut self, origin: Position, width: i32, height: i32, tile: Tile) {
        let cells: Vec<Position> = self.rect_cells(origin, width, height).collect();
        for p in cells {
            self.occupy(p, tile);
        }
    }

    /// Clear the cells of the rectangle that still hold `expected`; cells
    /// taken over by something else are left alone.  Returns how many cells
    /// were cleared.
    pub fn clear_rect_if(
        &mut self,
        origin: Position,
        width: i32,
        height: i32,
        expected: Tile,
    ) -> usize {
        let cells: Vec<Position> = self.rect_cells(origin, width, height).collect();
        cells.into_iter().filter(|&p| self.clear_if(p, expected)).count()
    }

    // ── Random placement ──────────────────────────────────────────────────

    /// Sample up to `attempts` random cells and return the first that is
    /// free and satisfies `accept`.
    ///
    /// Intended for sparse boards.  Fails with [`SpatialError::BoardFull`]
    /// instead of looping forever.
    pub fn random_free<F>(
        &self,
        rng: &mut SimRng,
        attempts: u32,
        accept: F,
    ) -> SpatialResult<Position>
    where
        F: Fn(Position) -> bool,
    {
        for _ in 0..attempts {
            let p = Position::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height));
            if self.is_free(p) && accept(p) {
                return Ok(p);
            }
        }
        Err(SpatialError::BoardFull { attempts })
    }

    /// Sample up to `attempts` rectangles that fit without wrapping and
    /// return the top-left corner of the first fully free one.
    pub fn random_free_rect(
        &self,
        rng: &mut SimRng,
        attempts: u32,
        width: i32,
        height: i32,
    ) -> SpatialResult<Position> {
        if width <= 0 || height <= 0 || width > self.width || height > self.height {
            return Err(SpatialError::RectTooLarge { width, height });
        }
        for _ in 0..attempts {
            let origin = Position::new(
                rng.gen_range(0..=self.width - width),
                rng.gen_range(0..=self.height - height),
            );
            if self.free_rect(origin, width, height) {
                return Ok(origin);
            }
        }
        Err(SpatialError::BoardFull { attempts })
    }

    // ── Journal ───────────────────────────────────────────────────────────

    /// Take every change recorded since the last drain, oldest first.
    pub fn drain_changes(&mut self) -> Vec<CellChange> {
        std::mem::take(&mut self.changes)
    }

    /// Number of undrained changes.
    pub fn pending_changes(&self) -> usize {
        self.changes.len()
    }
}
