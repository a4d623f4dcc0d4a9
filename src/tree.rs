//! Edit Tree
//!
//! A red-black tree of edits keyed by edit order, augmented with the minimum
//! edit position of every subtree.
//!
//! Structure:
//! - Nodes are stored in a Vec arena and linked by `u32` indices (no raw pointers)
//! - `NONE` marks a missing parent or child
//! - Each node caches `min_position` over itself and both subtrees
//!
//! Edit orders only ever grow, so every insert lands at the end of the right
//! spine. Without rebalancing the tree would degrade into a linked list; the
//! red-black fixup keeps the height within `2 * log2(n + 1)`.
//!
//! Operations:
//! - insert: O(log n), at most two rotations
//! - iter / iter_rev: O(n) in chronological or reverse chronological order
//! - height: O(n), diagnostics only

use smallvec::SmallVec;

use crate::edit::Edit;

/// Index into the node arena.
pub(crate) type NodeIdx = u32;
/// Sentinel value for no parent / no child.
pub(crate) const NONE: NodeIdx = u32::MAX;

/// Inline stack capacity for traversals. A red-black tree of height 64 holds
/// more nodes than fit in memory.
pub(crate) const STACK_INLINE: usize = 64;
pub(crate) type NodeStack = SmallVec<[NodeIdx; STACK_INLINE]>;

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) edit: Edit,
    /// Minimum `edit.position` over this node and both subtrees.
    pub(crate) min_position: u64,
    pub(crate) parent: NodeIdx,
    pub(crate) left: NodeIdx,
    pub(crate) right: NodeIdx,
    red: bool,
}

impl Node {
    fn new(edit: Edit) -> Node {
        return Node {
            edit,
            min_position: edit.position,
            parent: NONE,
            left: NONE,
            right: NONE,
            red: true,
        };
    }
}

/// Balanced, augmented index of every recorded edit.
#[derive(Clone, Debug)]
pub struct EditTree {
    nodes: Vec<Node>,
    root: NodeIdx,
}

impl EditTree {
    pub fn new() -> EditTree {
        return EditTree { nodes: Vec::new(), root: NONE };
    }

    pub fn with_capacity(capacity: usize) -> EditTree {
        return EditTree { nodes: Vec::with_capacity(capacity), root: NONE };
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        return self.nodes.len();
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        return self.nodes.is_empty();
    }

    /// Drop every edit but keep the arena allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NONE;
    }

    /// Smallest position of any recorded edit, or `None` when empty.
    pub fn min_position(&self) -> Option<u64> {
        if self.root == NONE {
            return None;
        }
        return Some(self.node(self.root).min_position);
    }

    #[inline(always)]
    pub(crate) fn root(&self) -> NodeIdx {
        return self.root;
    }

    #[inline(always)]
    pub(crate) fn node(&self, idx: NodeIdx) -> &Node {
        return &self.nodes[idx as usize];
    }

    #[inline(always)]
    fn node_mut(&mut self, idx: NodeIdx) -> &mut Node {
        return &mut self.nodes[idx as usize];
    }

    #[inline(always)]
    fn is_red(&self, idx: NodeIdx) -> bool {
        return idx != NONE && self.node(idx).red;
    }

    #[inline(always)]
    fn subtree_min(&self, idx: NodeIdx) -> u64 {
        if idx == NONE {
            return u64::MAX;
        }
        return self.node(idx).min_position;
    }

    /// Recompute a node's cached minimum from its own edit and its children.
    fn update_min(&mut self, idx: NodeIdx) {
        let node = self.node(idx);
        let min = node
            .edit
            .position
            .min(self.subtree_min(node.left))
            .min(self.subtree_min(node.right));
        self.node_mut(idx).min_position = min;
    }

    /// Walk up from `idx`, refreshing cached minimums until one is unchanged.
    fn propagate_min(&mut self, mut idx: NodeIdx) {
        while idx != NONE {
            let before = self.node(idx).min_position;
            self.update_min(idx);
            if self.node(idx).min_position == before {
                break;
            }
            idx = self.node(idx).parent;
        }
    }

    /// Point `parent`'s link that referenced `old` at `new`, or move the root.
    fn replace_child(&mut self, parent: NodeIdx, old: NodeIdx, new: NodeIdx) {
        if parent == NONE {
            self.root = new;
        } else if self.node(parent).left == old {
            self.node_mut(parent).left = new;
        } else {
            self.node_mut(parent).right = new;
        }
    }

    /// Left rotation around `x`. Cached minimums are repaired as part of the
    /// rotation: `x` first, then its new parent, then upward.
    fn rotate_left(&mut self, x: NodeIdx) {
        let y = self.node(x).right;
        debug_assert!(y != NONE);

        let y_left = self.node(y).left;
        self.node_mut(x).right = y_left;
        if y_left != NONE {
            self.node_mut(y_left).parent = x;
        }

        let parent = self.node(x).parent;
        self.node_mut(y).parent = parent;
        self.replace_child(parent, x, y);

        self.node_mut(y).left = x;
        self.node_mut(x).parent = y;

        self.update_min(x);
        self.update_min(y);
        self.propagate_min(parent);
    }

    /// Right rotation around `x`, mirror of `rotate_left`.
    fn rotate_right(&mut self, x: NodeIdx) {
        let y = self.node(x).left;
        debug_assert!(y != NONE);

        let y_right = self.node(y).right;
        self.node_mut(x).left = y_right;
        if y_right != NONE {
            self.node_mut(y_right).parent = x;
        }

        let parent = self.node(x).parent;
        self.node_mut(y).parent = parent;
        self.replace_child(parent, x, y);

        self.node_mut(y).right = x;
        self.node_mut(x).parent = y;

        self.update_min(x);
        self.update_min(y);
        self.propagate_min(parent);
    }

    /// Insert an edit. Its order must exceed every order already stored.
    /// Returns the number of rotations the rebalance needed.
    pub fn insert(&mut self, edit: Edit) -> usize {
        debug_assert!(self.len() < NONE as usize);
        let idx = self.nodes.len() as NodeIdx;
        self.nodes.push(Node::new(edit));

        let mut parent = NONE;
        let mut current = self.root;
        let mut go_left = false;
        while current != NONE {
            parent = current;
            let node = self.node_mut(current);
            if edit.position < node.min_position {
                node.min_position = edit.position;
            }
            go_left = edit.order < node.edit.order;
            current = if go_left { node.left } else { node.right };
        }

        self.node_mut(idx).parent = parent;
        if parent == NONE {
            self.root = idx;
        } else if go_left {
            self.node_mut(parent).left = idx;
        } else {
            self.node_mut(parent).right = idx;
        }

        return self.insert_fix(idx);
    }

    /// Restore red-black invariants after inserting the red node `x`.
    fn insert_fix(&mut self, mut x: NodeIdx) -> usize {
        let mut rotations = 0;

        while self.is_red(self.node(x).parent) {
            let parent = self.node(x).parent;
            // A red parent is never the root, so the grandparent exists.
            let grandparent = self.node(parent).parent;

            if parent == self.node(grandparent).left {
                let uncle = self.node(grandparent).right;
                if self.is_red(uncle) {
                    self.node_mut(parent).red = false;
                    self.node_mut(uncle).red = false;
                    self.node_mut(grandparent).red = true;
                    x = grandparent;
                } else {
                    if x == self.node(parent).right {
                        x = parent;
                        self.rotate_left(x);
                        rotations += 1;
                    }
                    let parent = self.node(x).parent;
                    let grandparent = self.node(parent).parent;
                    self.node_mut(parent).red = false;
                    self.node_mut(grandparent).red = true;
                    self.rotate_right(grandparent);
                    rotations += 1;
                }
            } else {
                let uncle = self.node(grandparent).left;
                if self.is_red(uncle) {
                    self.node_mut(parent).red = false;
                    self.node_mut(uncle).red = false;
                    self.node_mut(grandparent).red = true;
                    x = grandparent;
                } else {
                    if x == self.node(parent).left {
                        x = parent;
                        self.rotate_right(x);
                        rotations += 1;
                    }
                    let parent = self.node(x).parent;
                    let grandparent = self.node(parent).parent;
                    self.node_mut(parent).red = false;
                    self.node_mut(grandparent).red = true;
                    self.rotate_left(grandparent);
                    rotations += 1;
                }
            }
        }

        let root = self.root;
        self.node_mut(root).red = false;
        return rotations;
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        if self.root == NONE {
            return 0;
        }
        let mut max = 0;
        let mut stack: SmallVec<[(NodeIdx, usize); STACK_INLINE]> = SmallVec::new();
        stack.push((self.root, 1));
        while let Some((idx, depth)) = stack.pop() {
            max = max.max(depth);
            let node = self.node(idx);
            if node.left != NONE {
                stack.push((node.left, depth + 1));
            }
            if node.right != NONE {
                stack.push((node.right, depth + 1));
            }
        }
        return max;
    }

    /// Edits in chronological order.
    pub fn iter(&self) -> Iter<'_> {
        return Iter::new(self, false);
    }

    /// Edits in reverse chronological order.
    pub fn iter_rev(&self) -> Iter<'_> {
        return Iter::new(self, true);
    }

    /// Validate the tree invariants.
    /// Panics with a descriptive message on violation.
    #[cfg(test)]
    pub(crate) fn check(&self) {
        if self.root == NONE {
            assert!(self.nodes.is_empty());
            return;
        }
        assert_eq!(self.node(self.root).parent, NONE, "root has a parent");
        assert!(!self.node(self.root).red, "root must be black");
        let (count, _) = self.check_subtree(self.root, None, None);
        assert_eq!(count, self.nodes.len(), "unreachable nodes in arena");
    }

    /// Returns (size, black_height) for the subtree.
    #[cfg(test)]
    fn check_subtree(&self, idx: NodeIdx, lo: Option<u64>, hi: Option<u64>) -> (usize, usize) {
        if idx == NONE {
            return (0, 1);
        }
        let node = self.node(idx);
        let order = node.edit.order;
        assert!(lo.is_none_or(|lo| lo < order), "order violation");
        assert!(hi.is_none_or(|hi| order < hi), "order violation (max)");

        for child in [node.left, node.right] {
            if child != NONE {
                assert_eq!(self.node(child).parent, idx, "child parent mismatch");
                if node.red {
                    assert!(!self.node(child).red, "red node with red child");
                }
            }
        }

        let expected = node
            .edit
            .position
            .min(self.subtree_min(node.left))
            .min(self.subtree_min(node.right));
        assert_eq!(node.min_position, expected, "stale min_position");

        let (left_size, left_bh) = self.check_subtree(node.left, lo, Some(order));
        let (right_size, right_bh) = self.check_subtree(node.right, Some(order), hi);
        assert_eq!(left_bh, right_bh, "black height mismatch");

        let bh = left_bh + if node.red { 0 } else { 1 };
        return (1 + left_size + right_size, bh);
    }
}

impl Default for EditTree {
    fn default() -> Self {
        Self::new()
    }
}

/// In-order iterator over an [`EditTree`].
pub struct Iter<'a> {
    tree: &'a EditTree,
    stack: NodeStack,
    reverse: bool,
}

impl<'a> Iter<'a> {
    fn new(tree: &'a EditTree, reverse: bool) -> Iter<'a> {
        let mut iter = Iter { tree, stack: NodeStack::new(), reverse };
        iter.descend(tree.root);
        return iter;
    }

    /// Push `idx` and its leftmost (or rightmost, in reverse) descendants.
    fn descend(&mut self, mut idx: NodeIdx) {
        while idx != NONE {
            self.stack.push(idx);
            let node = self.tree.node(idx);
            idx = if self.reverse { node.right } else { node.left };
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Edit;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let tree = self.tree;
        let node = tree.node(idx);
        self.descend(if self.reverse { node.left } else { node.right });
        return Some(&node.edit);
    }
}
