//! The stream handle: records edits and answers position queries.

use crate::edit::{Direction, Edit, EditKind};
use crate::error::{AppendError, validate};
use crate::mapper::{self, MapStats};
use crate::tree::{EditTree, Iter};

/// Sentinel returned by [`PositionMap::map_raw`] for positions with no
/// counterpart in the target view.
pub const UNMAPPED: i64 = -1;

/// Maps byte positions between the origin and current views of one stream.
///
/// Every recorded edit is kept. Queries replay the history against a single
/// position, skipping the parts of it that cannot affect that position.
#[derive(Clone, Debug, Default)]
pub struct PositionMap {
    tree: EditTree,
    next_order: u64,
}

impl PositionMap {
    /// Create an empty map. Every position maps to itself.
    pub fn new() -> PositionMap {
        return PositionMap { tree: EditTree::new(), next_order: 0 };
    }

    /// Create an empty map with room for `capacity` edits.
    pub fn with_capacity(capacity: usize) -> PositionMap {
        return PositionMap { tree: EditTree::with_capacity(capacity), next_order: 0 };
    }

    /// Number of recorded edits.
    pub fn len(&self) -> usize {
        return self.tree.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.tree.is_empty();
    }

    /// Record `length` bytes inserted at `position` of the current stream.
    /// Returns the order assigned to the edit.
    pub fn insert(&mut self, position: i64, length: i64) -> Result<u64, AppendError> {
        return self.append(EditKind::Insert, position, length);
    }

    /// Record `length` bytes deleted at `position` of the current stream.
    /// Returns the order assigned to the edit.
    pub fn delete(&mut self, position: i64, length: i64) -> Result<u64, AppendError> {
        return self.append(EditKind::Delete, position, length);
    }

    fn append(&mut self, kind: EditKind, position: i64, length: i64) -> Result<u64, AppendError> {
        let (position, length) = match validate(position, length) {
            Ok(valid) => valid,
            Err(err) => {
                log::debug!("rejected {:?}: {}", kind, err);
                return Err(err);
            }
        };

        let order = self.next_order;
        let rotations = self.tree.insert(Edit::new(order, kind, position, length));
        self.next_order += 1;

        log::trace!(
            "recorded {:?} #{} at {} len {} ({} rotations)",
            kind,
            order,
            position,
            length,
            rotations
        );
        return Ok(order);
    }

    /// Translate `position` in `direction`. Returns `None` when the position
    /// was deleted (forward) or names inserted bytes (backward), and for any
    /// negative position.
    pub fn map(&self, direction: Direction, position: i64) -> Option<u64> {
        if position < 0 {
            return None;
        }
        return mapper::map_position(&self.tree, direction, position as u64);
    }

    /// Like [`map`](Self::map), with [`UNMAPPED`] in place of `None`.
    pub fn map_raw(&self, direction: Direction, position: i64) -> i64 {
        return match self.map(direction, position) {
            Some(mapped) => i64::try_from(mapped).unwrap_or(i64::MAX),
            None => UNMAPPED,
        };
    }

    /// Like [`map`](Self::map), also reporting how much of the history the
    /// query had to examine.
    pub fn map_with_stats(&self, direction: Direction, position: i64) -> (Option<u64>, MapStats) {
        let mut stats = MapStats::default();
        if position < 0 {
            return (None, stats);
        }
        let mapped = mapper::map_position_with_stats(&self.tree, direction, position as u64, &mut stats);
        return (mapped, stats);
    }

    /// Recorded edits, oldest first.
    pub fn edits(&self) -> Iter<'_> {
        return self.tree.iter();
    }

    /// Height of the underlying tree.
    pub fn depth(&self) -> usize {
        return self.tree.height();
    }

    /// Forget every edit. Orders restart at zero.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.next_order = 0;
    }
}
