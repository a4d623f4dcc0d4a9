//! Edit records and query directions.
//!
//! An [`Edit`] describes one insert or delete in the live coordinate system of
//! the stream at the moment it was applied. Edits never change after they are
//! recorded; the order stamp defines chronological replay.

/// Whether an edit added or removed bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditKind {
    Insert,
    Delete,
}

/// Which way a position is translated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From the stream before any edit to the stream after every edit.
    OriginToCurrent,
    /// From the stream after every edit back to the stream before any edit.
    CurrentToOrigin,
}

/// One recorded edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edit {
    /// Sequence number assigned at append time, strictly increasing.
    pub order: u64,
    pub kind: EditKind,
    /// Position in the stream as it was immediately before this edit.
    pub position: u64,
    /// Number of bytes affected, always positive.
    pub length: u64,
}

impl Edit {
    pub fn new(order: u64, kind: EditKind, position: u64, length: u64) -> Edit {
        debug_assert!(length > 0);
        return Edit { order, kind, position, length };
    }

    /// First position past the affected range.
    #[inline]
    pub fn end(&self) -> u64 {
        return self.position.saturating_add(self.length);
    }

    /// Whether `pos` falls inside `[position, end)`.
    #[inline]
    pub fn covers(&self, pos: u64) -> bool {
        return self.position <= pos && pos < self.end();
    }
}
