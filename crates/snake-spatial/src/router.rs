//! Breadth-first routing over the torus and the local-escape fallback.
//!
//! # Search
//!
//! [`shortest_path_to`] expands neighbours in [`Direction::CARDINALS`] order
//! through [`Grid::resolve`], so wrap-around and portals are first-class
//! edges.  Any non-empty cell other than the start blocks expansion, except
//! that a cell matching the target is accepted as the terminal node.  All
//! edges cost one step, so the first target dequeued is a nearest one, and
//! ties are broken by visitation order.
//!
//! # Escape
//!
//! When nothing is reachable, [`local_escape`] plans a short survival walk:
//! straight ahead while possible, otherwise a right turn, otherwise a left
//! turn.  It never plans a move back onto a cell it already walked.

use std::collections::VecDeque;
use std::collections::hash_map::Entry;

use rustc_hash::{FxHashMap, FxHashSet};

use snake_core::{Direction, Position};

use crate::{Grid, Tile};

/// Upper bound on the number of steps [`local_escape`] plans.
pub const ESCAPE_HORIZON: usize = 10;

// ── Route ─────────────────────────────────────────────────────────────────────

/// A planned sequence of moves.
///
/// Steps are stored *reversed*: the next move is the last element, so
/// consuming a route is a cheap `pop`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    /// The cell the route leads to, or `None` for an escape walk.
    pub target: Option<Position>,
    steps: Vec<Direction>,
}

impl Route {
    /// A route towards `target` whose steps are already in reversed order.
    pub fn towards(target: Position, reversed_steps: Vec<Direction>) -> Self {
        Self { target: Some(target), steps: reversed_steps }
    }

    /// An untargeted route from steps given in execution order.
    pub fn escape(mut steps: Vec<Direction>) -> Self {
        steps.reverse();
        Self { target: None, steps }
    }

    /// The next move, without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<Direction> {
        self.steps.last().copied()
    }

    /// Consume the next move.
    #[inline]
    pub fn pop(&mut self) -> Option<Direction> {
        self.steps.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Remaining moves in execution order.
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.steps.iter().rev().copied()
    }
}

// ── Breadth-first search ──────────────────────────────────────────────────────

/// Shortest route from `start` to the nearest cell holding `target`.
///
/// Returns `None` if no such cell is reachable through empty cells.
pub fn shortest_path_to(grid: &Grid, start: Position, target: Tile) -> Option<Route> {
    let start = grid.wrap(start);

    // parent[q] = (p, dir) such that resolve(p, dir) == q; None for the root.
    let mut parent: FxHashMap<Position, Option<(Position, Direction)>> = FxHashMap::default();
    parent.insert(start, None);

    let mut frontier = VecDeque::from([start]);
    while let Some(p) = frontier.pop_front() {
        let tile = grid.tile_at(p);
        if tile == target {
            return Some(Route::towards(p, backtrack(&parent, p)));
        }
        if !tile.is_empty() && p != start {
            continue;
        }
        for dir in Direction::CARDINALS {
            let q = grid.resolve(p, dir);
            if let Entry::Vacant(slot) = parent.entry(q) {
                slot.insert(Some((p, dir)));
                frontier.push_back(q);
            }
        }
    }
    None
}

/// Walk parent links from `end` back to the root, collecting the move that
/// entered each cell.  The result is naturally last-move-first.
fn backtrack(
    parent: &FxHashMap<Position, Option<(Position, Direction)>>,
    end: Position,
) -> Vec<Direction> {
    let mut steps = Vec::new();
    let mut cur = end;
    while let Some(&Some((prev, dir))) = parent.get(&cur) {
        steps.push(dir);
        cur = prev;
    }
    steps
}

// ── Local escape ──────────────────────────────────────────────────────────────

/// Plan a short survival walk from `head` when no target is reachable.
///
/// At each step the planner keeps its heading if the next cell is passable,
/// else tries a right turn, else a left turn, and stops at the first step
/// where none works.  It plans at most `clamp(body_len / 2, 1, 10)` steps.
///
/// Returns the moves in execution order, or `[Direction::Stay]` if even the
/// first step is blocked.  Consumables count as passable; body segments and
/// cells the walk already covers do not.
pub fn local_escape(
    grid: &Grid,
    head: Position,
    prev_dir: Direction,
    body_len: usize,
) -> Vec<Direction> {
    let horizon = (body_len / 2).clamp(1, ESCAPE_HORIZON);
    let mut heading = if prev_dir.is_stay() { Direction::Right } else { prev_dir };
    let mut pos = grid.wrap(head);

    let mut walked = FxHashSet::default();
    walked.insert(pos);

    let mut moves = Vec::with_capacity(horizon);
    for _ in 0..horizon {
        let step = [heading, heading.turn_right(), heading.turn_left()]
            .into_iter()
            .map(|d| (d, grid.resolve(pos, d)))
            .find(|&(_, q)| !grid.tile_at(q).is_body() && !walked.contains(&q));

        let Some((dir, next)) = step else { break };
        moves.push(dir);
        walked.insert(next);
        pos = next;
        heading = dir;
    }

    if moves.is_empty() {
        moves.push(Direction::Stay);
    }
    moves
}
