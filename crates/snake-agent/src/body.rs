//! `BodyRing` — a snake's segments as a ring buffer with a write cursor.
//!
//! The cursor always points at the oldest segment (the tail).  A step
//! overwrites that slot with the new head and advances the cursor, so moving
//! is O(1) and never shifts anything.  Growing duplicates the tail slot in
//! place: the snake keeps its current cells and simply skips vacating its
//! tail on the next step.
//!
//! ```text
//!   cells:  [ t  a  b  h ]     cursor → t (oldest), h is newest
//!   step:   [ h' a  b  h ]     cursor → a
//!   grow:   [ h' a  a  b  h ]  cursor → a (duplicated)
//! ```

use snake_core::Position;

/// Ring of body positions; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRing {
    cells: Vec<Position>,
    cursor: usize,
}

impl BodyRing {
    /// A body of `len` segments (at least one), all stacked on `at`.
    pub fn new(at: Position, len: usize) -> Self {
        Self { cells: vec![at; len.max(1)], cursor: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The oldest segment: the slot the next step overwrites.
    #[inline]
    pub fn tail(&self) -> Position {
        self.cells[self.cursor]
    }

    /// The newest segment.
    #[inline]
    pub fn head(&self) -> Position {
        let n = self.cells.len();
        self.cells[(self.cursor + n - 1) % n]
    }

    /// `true` if the next step frees the tail's cell, i.e. no other segment
    /// sits on the same position.
    pub fn tail_is_vacated(&self) -> bool {
        let tail = self.tail();
        self.cells.iter().filter(|&&p| p == tail).count() == 1
    }

    /// Overwrite the tail slot with `new_head` and advance the cursor.
    /// Returns the position that was overwritten.
    pub fn advance(&mut self, new_head: Position) -> Position {
        let old = std::mem::replace(&mut self.cells[self.cursor], new_head);
        self.cursor = (self.cursor + 1) % self.cells.len();
        old
    }

    /// Lengthen by one segment by duplicating the tail slot.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.cells.insert(self.cursor, tail);
    }

    /// Segments oldest to newest, without copying.
    pub fn iter(&self) -> BodyIter<'_> {
        BodyIter { ring: self, offset: 0 }
    }

    /// `true` if any segment is at `pos`.
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }
}

impl<'a> IntoIterator for &'a BodyRing {
    type Item = Position;
    type IntoIter = BodyIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Oldest-to-newest view over a [`BodyRing`].  Maps logical index `i` to
/// slot `(cursor + i) % len`.
pub struct BodyIter<'a> {
    ring: &'a BodyRing,
    offset: usize,
}

impl Iterator for BodyIter<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let n = self.ring.cells.len();
        if self.offset >= n {
            return None;
        }
        let p = self.ring.cells[(self.ring.cursor + self.offset) % n];
        self.offset += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.ring.cells.len() - self.offset;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for BodyIter<'_> {}
