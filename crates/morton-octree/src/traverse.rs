//! Caller-driven depth-first traversal over the occupied subtrees.

use crate::octant::Octant;
use crate::octree::{Cell, SparseOctree};

/// Depth-first cursor over the occupied regions of a [`SparseOctree`].
///
/// The cursor exposes explicit step operations instead of yielding a
/// passive stream, so a caller can evaluate a geometric predicate on
/// [`octant`] between steps and prune: passing `skip_descend = true` to
/// [`next`] refuses the current region's children and moves on to its next
/// occupied sibling, discarding the whole subtree in one step.
///
/// The cursor borrows the tree; the borrow checker keeps the tree immutable
/// for as long as the cursor lives.
///
/// [`octant`]: Traversal::octant
/// [`next`]: Traversal::next
pub struct Traversal<'a> {
    tree: &'a SparseOctree,
    current: Octant,
    /// Ancestors of `current`, each with the child index taken out of it.
    stack: Vec<(Octant, u8)>,
    /// Child index of `current` within its parent; 0 at the root.
    sibling: u8,
}

impl<'a> Traversal<'a> {
    /// A cursor positioned at the root, before the first step.
    pub fn new(tree: &'a SparseOctree) -> Self {
        Self {
            tree,
            current: tree.root_octant(),
            stack: Vec::new(),
            sibling: 0,
        }
    }

    /// The region the cursor currently rests on.
    pub fn octant(&self) -> &Octant {
        &self.current
    }

    /// Number of ancestors above the current region.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether the current region is a single voxel.
    pub fn is_leaf(&self) -> bool {
        self.current.is_voxel()
    }

    /// Steps into the first occupied child, in ascending index order.
    ///
    /// Returns false on a leaf, or when no child reports occupancy.
    pub fn descend(&mut self) -> bool {
        if self.is_leaf() {
            return false;
        }
        for index in 0..8 {
            let child = self.current.child(index);
            if !self.tree.is_region_empty(&child) {
                self.stack.push((self.current, index));
                self.current = child;
                self.sibling = index;
                return true;
            }
        }
        false
    }

    /// Moves to the next occupied sibling of the current region, scanning
    /// indices above the one already taken.
    pub fn advance_sibling(&mut self) -> bool {
        let Some(&(parent, _)) = self.stack.last() else {
            return false;
        };
        for index in self.sibling + 1..8 {
            let child = parent.child(index);
            if !self.tree.is_region_empty(&child) {
                let top = self.stack.len() - 1;
                self.stack[top].1 = index;
                self.current = child;
                self.sibling = index;
                return true;
            }
        }
        false
    }

    /// Pops back to the parent region.
    ///
    /// Returns false when already at the root.
    pub fn ascend(&mut self) -> bool {
        let Some((parent, _)) = self.stack.pop() else {
            return false;
        };
        self.current = parent;
        self.sibling = self.stack.last().map_or(0, |&(_, index)| index);
        true
    }

    /// Advances to the next region in pre-order over occupied subtrees.
    ///
    /// With `skip_descend` the current region's children are refused, so
    /// the subtree beneath it is dropped from the walk. Returns false once
    /// the traversal is exhausted.
    pub fn next(&mut self, skip_descend: bool) -> bool {
        if !skip_descend && self.descend() {
            return true;
        }
        if self.advance_sibling() {
            return true;
        }
        while self.ascend() {
            if self.advance_sibling() {
                return true;
            }
        }
        false
    }

    /// The cell of the current voxel.
    ///
    /// # Panics
    ///
    /// Panics when the current region is not an occupied leaf voxel. The
    /// step operations only ever select occupied regions, so hitting the
    /// panic indicates a bug in the traversal, not bad input.
    pub fn cell(&self) -> &'a Cell {
        assert!(self.is_leaf(), "cell() on a region larger than a voxel");
        match self.tree.cell_at(&self.current) {
            Some(cell) => cell,
            None => panic!(
                "voxel at {} reported occupied but stores no cell",
                self.current.min()
            ),
        }
    }
}
