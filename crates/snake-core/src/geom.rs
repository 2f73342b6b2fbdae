//! Torus geometry: positions, headings, and raw input keys.
//!
//! Coordinates are exact `i32` pairs with `y` growing downward (screen rows),
//! so equality and hashing never drift.  `Position` arithmetic is unwrapped;
//! the board owning the torus dimensions applies [`Position::wrap`] after any
//! portal lookup.

use std::fmt;

// ── Position ──────────────────────────────────────────────────────────────────

/// A cell coordinate.  `x` is the column, `y` the row.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate one step in `dir`, *without* wrapping.
    ///
    /// `Direction::Stay` returns `self`.
    #[inline]
    pub fn offset(self, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        Position::new(self.x + dx, self.y + dy)
    }

    /// Fold onto a `width × height` torus.  Negative coordinates wrap to the
    /// far edge.
    #[inline]
    pub fn wrap(self, width: i32, height: i32) -> Position {
        Position::new(self.x.rem_euclid(width), self.y.rem_euclid(height))
    }

    /// `true` if the position already lies on a `width × height` board.
    #[inline]
    pub fn in_bounds(self, width: i32, height: i32) -> bool {
        (0..width).contains(&self.x) && (0..height).contains(&self.y)
    }

    /// Manhattan distance on a `width × height` torus (shortest way round on
    /// each axis).
    pub fn torus_distance(self, other: Position, width: i32, height: i32) -> u32 {
        let dx = (self.x - other.x).rem_euclid(width);
        let dy = (self.y - other.y).rem_euclid(height);
        (dx.min(width - dx) + dy.min(height - dy)) as u32
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// A heading on the grid, plus the `Stay` sentinel.
///
/// `Stay` is what a planner returns when it has no viable move.  The
/// scheduler treats it as a forfeited turn.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
    Stay,
}

impl Direction {
    /// Cardinal headings in search order.  Breadth-first search expands
    /// neighbours in exactly this order, which fixes its tie-breaking.
    pub const CARDINALS: [Direction; 4] =
        [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    /// `(dx, dy)` unit step.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Stay => (0, 0),
        }
    }

    /// The reverse heading.  `Stay` is its own opposite.
    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Stay => Direction::Stay,
        }
    }

    /// Clockwise quarter turn as seen on screen.
    #[inline]
    pub const fn turn_right(self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Stay => Direction::Stay,
        }
    }

    /// Counter-clockwise quarter turn as seen on screen.
    #[inline]
    pub const fn turn_left(self) -> Direction {
        self.turn_right().opposite()
    }

    #[inline]
    pub fn is_stay(self) -> bool {
        self == Direction::Stay
    }

    /// `true` if `self` would reverse straight back onto `previous`.
    #[inline]
    pub fn reverses(self, previous: Direction) -> bool {
        !self.is_stay() && self == previous.opposite()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Stay => "stay",
        };
        f.write_str(s)
    }
}

// ── Key ───────────────────────────────────────────────────────────────────────

/// An opaque input token (a terminal key code).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key(pub u32);

impl Key {
    /// Curses arrow-key codes.
    pub const ARROW_DOWN: Key = Key(258);
    pub const ARROW_UP: Key = Key(259);
    pub const ARROW_LEFT: Key = Key(260);
    pub const ARROW_RIGHT: Key = Key(261);

    /// The key code of an ASCII character.
    #[inline]
    pub const fn ascii(c: char) -> Key {
        Key(c as u32)
    }
}
