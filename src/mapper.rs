//! Position translation over an [`EditTree`].
//!
//! A query replays the edit history against a single running position:
//! forward queries apply edits oldest first, backward queries undo them
//! newest first. Both walks follow the tree's in-order sequence and skip any
//! subtree whose `min_position` lies above the running position.
//!
//! The skip is sound because every edit that can change the running position
//! `v` needs `edit.position <= v`. If the subtree minimum exceeds `v`, no edit
//! inside can fire, so `v` leaves the subtree unchanged and the next edit
//! after it sees the same value.

use crate::edit::{Direction, Edit, EditKind};
use crate::tree::{EditTree, NONE, NodeIdx, NodeStack};

/// Work done by one query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapStats {
    /// Edits examined.
    pub visited: usize,
    /// Subtrees skipped because of their minimum position.
    pub pruned: usize,
}

/// Translate `position` in the given direction.
/// Returns `None` when the position has no counterpart.
pub fn map_position(tree: &EditTree, direction: Direction, position: u64) -> Option<u64> {
    let mut stats = MapStats::default();
    return map_position_with_stats(tree, direction, position, &mut stats);
}

/// Like [`map_position`], recording traversal counters in `stats`.
pub fn map_position_with_stats(
    tree: &EditTree,
    direction: Direction,
    position: u64,
    stats: &mut MapStats,
) -> Option<u64> {
    return match direction {
        Direction::OriginToCurrent => walk(tree, position, false, apply, stats),
        Direction::CurrentToOrigin => walk(tree, position, true, undo, stats),
    };
}

/// Apply one edit to a position in the stream before it.
#[inline]
fn apply(edit: &Edit, v: u64) -> Option<u64> {
    if edit.position > v {
        return Some(v);
    }
    return match edit.kind {
        EditKind::Insert => Some(v.saturating_add(edit.length)),
        EditKind::Delete if v < edit.end() => None,
        EditKind::Delete => Some(v - edit.length),
    };
}

/// Undo one edit for a position in the stream after it.
#[inline]
fn undo(edit: &Edit, v: u64) -> Option<u64> {
    if edit.position > v {
        return Some(v);
    }
    return match edit.kind {
        EditKind::Insert if v < edit.end() => None,
        EditKind::Insert => Some(v - edit.length),
        EditKind::Delete => Some(v.saturating_add(edit.length)),
    };
}

/// In-order walk (reverse in-order when `reverse`) threading `v` through
/// `step`, pruning subtrees that cannot fire.
fn walk(
    tree: &EditTree,
    mut v: u64,
    reverse: bool,
    step: fn(&Edit, u64) -> Option<u64>,
    stats: &mut MapStats,
) -> Option<u64> {
    let mut stack = NodeStack::new();
    descend(tree, tree.root(), v, reverse, &mut stack, stats);

    while let Some(idx) = stack.pop() {
        let node = tree.node(idx);
        stats.visited += 1;
        v = step(&node.edit, v)?;
        let next = if reverse { node.left } else { node.right };
        descend(tree, next, v, reverse, &mut stack, stats);
    }

    return Some(v);
}

/// Push `idx` and its first-visited descendants, stopping at the first
/// subtree that `v` lies below.
#[inline]
fn descend(
    tree: &EditTree,
    mut idx: NodeIdx,
    v: u64,
    reverse: bool,
    stack: &mut NodeStack,
    stats: &mut MapStats,
) {
    while idx != NONE {
        let node = tree.node(idx);
        if v < node.min_position {
            stats.pruned += 1;
            return;
        }
        stack.push(idx);
        idx = if reverse { node.right } else { node.left };
    }
}
