use core::cmp::Ordering::{Equal, Greater, Less};

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};

/// Pending nodes of an in-order walk, deepest last.
///
/// A red-black tree is at most `2 * log2(n + 1)` levels deep, which stays within 64 for every
/// node count a `Handle` can address, so the walk never spills to the heap.
pub(crate) type TraversalStack = SmallVec<[Handle; 64]>;

/// The augmented red-black tree backing `RankTree`.
///
/// Every node caches the size of its subtree so that rank and select run in O(log n).
/// Children are owned through arena handles; parent links are plain handles kept in sync on
/// every splice and rotation.
#[derive(Clone)]
pub(crate) struct RawRankTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl<T> RawRankTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of values in the tree.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn value(&self, handle: Handle) -> &T {
        self.node(handle).value()
    }

    #[inline]
    fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    fn size_of(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |h| self.node(h).size())
    }

    /// Absent children count as black.
    #[inline]
    fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.node(h).color() == Color::Red)
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        self.node_mut(handle).set_color(color);
    }

    /// Recomputes the cached subtree size of `handle` from its children.
    fn refresh_size(&mut self, handle: Handle) {
        let node = self.node(handle);
        let size = 1 + self.size_of(node.left()) + self.size_of(node.right());
        self.node_mut(handle).set_size(size);
    }

    /// Adds `delta` (which may be negative) to the size of every node from `start` to the root.
    fn adjust_sizes_to_root(&mut self, start: Option<Handle>, delta: isize) {
        let mut current = start;
        while let Some(handle) = current {
            let node = self.node_mut(handle);
            node.set_size(node.size().wrapping_add_signed(delta));
            current = node.parent();
        }
    }

    /// Points whatever referenced `old` (its parent's child slot, or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.node(p).side_of(old);
                debug_assert!(side.is_some(), "replace_child: {old:?} is not a child of {p:?}");
                if let Some(side) = side {
                    self.node_mut(p).set_child(side, new);
                }
            }
        }
    }

    /// Rotates the subtree rooted at `pivot` so that `pivot` moves down towards `side`.
    ///
    /// `rotate(x, Side::Left)` is the classic left rotation: x's right child takes x's place.
    /// Only the two moved nodes change size.
    fn rotate(&mut self, pivot: Handle, side: Side) {
        let Some(riser) = self.node(pivot).child(side.opposite()) else {
            debug_assert!(false, "rotate: {pivot:?} has no child to rotate up");
            return;
        };
        let inner = self.node(riser).child(side);
        let parent = self.node(pivot).parent();

        self.node_mut(pivot).set_child(side.opposite(), inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(pivot));
        }

        self.node_mut(riser).set_parent(parent);
        self.replace_child(parent, pivot, Some(riser));

        self.node_mut(riser).set_child(side, Some(pivot));
        self.node_mut(pivot).set_parent(Some(riser));

        self.refresh_size(pivot);
        self.refresh_size(riser);
    }

    /// Leftmost (or rightmost) node of the subtree at `start`.
    fn extreme(&self, start: Option<Handle>, side: Side) -> Option<Handle> {
        let mut current = start?;
        while let Some(next) = self.node(current).child(side) {
            current = next;
        }
        Some(current)
    }

    pub(crate) fn first(&self) -> Option<&T> {
        self.extreme(self.root, Side::Left).map(|h| self.value(h))
    }

    pub(crate) fn last(&self) -> Option<&T> {
        self.extreme(self.root, Side::Right).map(|h| self.value(h))
    }

    /// Returns the value at one-based position `rank`.
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<&T> {
        if rank == 0 || rank > self.len() {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = rank;
        loop {
            let node = self.node(current);
            let here = self.size_of(node.left()) + 1;
            match remaining.cmp(&here) {
                Equal => return Some(node.value()),
                Less => current = node.left()?,
                Greater => {
                    remaining -= here;
                    current = node.right()?;
                }
            }
        }
    }

    /// One-based rank of the node at `handle`: its left subtree plus itself, plus everything to
    /// the left of each ancestor the walk climbs to from a right child.
    fn rank_of_handle(&self, handle: Handle) -> usize {
        let mut rank = self.size_of(self.node(handle).left()) + 1;
        let mut current = handle;
        while let Some(parent) = self.node(current).parent() {
            let parent_node = self.node(parent);
            if parent_node.right() == Some(current) {
                rank += self.size_of(parent_node.left()) + 1;
            }
            current = parent;
        }
        rank
    }

    /// Pushes `start` and its chain of left descendants.
    pub(crate) fn push_left_spine(&self, start: Option<Handle>, stack: &mut TraversalStack) {
        let mut current = start;
        while let Some(handle) = current {
            stack.push(handle);
            current = self.node(handle).left();
        }
    }

    /// Pops the next node of an in-order walk and queues its right subtree.
    pub(crate) fn advance(&self, stack: &mut TraversalStack) -> Option<Handle> {
        let handle = stack.pop()?;
        self.push_left_spine(self.node(handle).right(), stack);
        Some(handle)
    }

    /// Builds the walk stack as it would stand just before yielding the value at `rank`.
    ///
    /// Ancestors are queued only when the descent goes left, since everything the descent passes
    /// on the right ranks below `rank`.
    pub(crate) fn seek_rank(&self, rank: usize) -> TraversalStack {
        let mut stack = TraversalStack::new();
        if rank == 0 || rank > self.len() {
            return stack;
        }

        let mut current = self.root;
        let mut remaining = rank;
        while let Some(handle) = current {
            let node = self.node(handle);
            let here = self.size_of(node.left()) + 1;
            match remaining.cmp(&here) {
                Equal => {
                    stack.push(handle);
                    break;
                }
                Less => {
                    stack.push(handle);
                    current = node.left();
                }
                Greater => {
                    remaining -= here;
                    current = node.right();
                }
            }
        }
        stack
    }

    /// Replaces the contents with `values`, which must be strictly ascending.
    ///
    /// The middle of every sub-range becomes that subtree's root. With `h = floor(log2(n + 1))`
    /// complete levels, nodes on the partial level `h` are colored red and all others black,
    /// which gives every path the same black-height `h`.
    pub(crate) fn build_from_sorted<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut values = values.into_iter();
        let len = values.len();

        self.clear();
        self.nodes.reserve(len);
        if len == 0 {
            return;
        }

        let red_depth = (len + 1).ilog2() as usize;
        self.root = self.build_subtree(&mut values, len, 0, red_depth);
        debug_assert_eq!(self.len(), len, "build_from_sorted: size mismatch at root");
    }

    fn build_subtree<I>(&mut self, values: &mut I, len: usize, depth: usize, red_depth: usize) -> Option<Handle>
    where
        I: Iterator<Item = T>,
    {
        if len == 0 {
            return None;
        }

        let left_len = len / 2;
        let left = self.build_subtree(values, left_len, depth + 1, red_depth);
        let value = values.next()?;
        let color = if depth == red_depth { Color::Red } else { Color::Black };
        let handle = self.nodes.alloc(Node::new(value, color, None));
        let right = self.build_subtree(values, len - left_len - 1, depth + 1, red_depth);

        for (side, child) in [(Side::Left, left), (Side::Right, right)] {
            if let Some(child) = child {
                self.node_mut(child).set_parent(Some(handle));
            }
            self.node_mut(handle).set_child(side, child);
        }
        self.node_mut(handle).set_size(len);
        Some(handle)
    }

    /// Restores the red-black rules after `node` was linked in as a red leaf.
    fn repair_after_insert(&mut self, mut node: Handle) {
        while let Some(parent) = self.node(node).parent()
            && self.node(parent).color() == Color::Red
        {
            // A red parent is never the root, so the grandparent exists.
            let Some(grandparent) = self.node(parent).parent() else {
                break;
            };
            let Some(side) = self.node(grandparent).side_of(parent) else {
                break;
            };
            let uncle = self.node(grandparent).child(side.opposite());

            if self.is_red(uncle) {
                self.set_color(parent, Color::Black);
                if let Some(uncle) = uncle {
                    self.set_color(uncle, Color::Black);
                }
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            // Inner child: rotate it into the outer position first.
            let mut parent = parent;
            if self.node(parent).child(side.opposite()) == Some(node) {
                self.rotate(parent, side);
                core::mem::swap(&mut node, &mut parent);
            }

            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Repairs a "doubly black" deficit at the slot `node` under `parent`.
    ///
    /// `node` may be absent: the vacated slot is then identified by `parent` alone.
    fn repair_after_delete(&mut self, mut node: Option<Handle>, mut parent: Option<Handle>) {
        while node != self.root && !self.is_red(node) {
            let Some(p) = parent else {
                break;
            };
            let side = if self.node(p).left() == node { Side::Left } else { Side::Right };

            // A black deficit on one side means the other side holds at least one black node.
            let Some(mut sibling) = self.node(p).child(side.opposite()) else {
                debug_assert!(false, "repair_after_delete: deficit slot has no sibling");
                break;
            };

            if self.is_red(Some(sibling)) {
                self.set_color(sibling, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                match self.node(p).child(side.opposite()) {
                    Some(next) => sibling = next,
                    None => break,
                }
            }

            let near = self.node(sibling).child(side);
            let far = self.node(sibling).child(side.opposite());

            if !self.is_red(near) && !self.is_red(far) {
                self.set_color(sibling, Color::Red);
                node = Some(p);
                parent = self.node(p).parent();
                continue;
            }

            if !self.is_red(far) {
                if let Some(near) = near {
                    self.set_color(near, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, side.opposite());
                match self.node(p).child(side.opposite()) {
                    Some(next) => sibling = next,
                    None => break,
                }
            }

            let parent_color = self.node(p).color();
            self.set_color(sibling, parent_color);
            self.set_color(p, Color::Black);
            if let Some(far) = self.node(sibling).child(side.opposite()) {
                self.set_color(far, Color::Black);
            }
            self.rotate(p, side);
            node = self.root;
            break;
        }

        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }
}

impl<T: Ord> RawRankTree<T> {
    /// Finds the node holding a value equal to `value`.
    pub(crate) fn find(&self, value: &T) -> Option<Handle> {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            current = match value.cmp(node.value()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return Some(handle),
            };
        }
        None
    }

    pub(crate) fn get(&self, value: &T) -> Option<&T> {
        self.find(value).map(|h| self.value(h))
    }

    /// One-based rank of `value`, or `None` if it is absent.
    pub(crate) fn rank_of(&self, value: &T) -> Option<usize> {
        self.find(value).map(|h| self.rank_of_handle(h))
    }

    /// Inserts `value` unless an equal value is present. Returns whether it was inserted.
    pub(crate) fn insert(&mut self, value: T) -> bool {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(handle) = current {
            side = match value.cmp(self.node(handle).value()) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => return false,
            };
            parent = Some(handle);
            current = self.node(handle).child(side);
        }

        let handle = self.nodes.alloc(Node::new(value, Color::Red, parent));
        match parent {
            None => self.root = Some(handle),
            Some(p) => self.node_mut(p).set_child(side, Some(handle)),
        }
        self.adjust_sizes_to_root(parent, 1);
        self.repair_after_insert(handle);
        true
    }

    /// Removes the value equal to `value` and returns it, or `None` if it is absent.
    pub(crate) fn remove(&mut self, value: &T) -> Option<T> {
        let found = self.find(value)?;

        // A node with two children trades values with its in-order successor, which has no left
        // child; the successor's node is then the one spliced out.
        let spliced = match (self.node(found).left(), self.node(found).right()) {
            (Some(_), right @ Some(_)) => {
                let successor = self.extreme(right, Side::Left).unwrap_or(found);
                let (a, b) = self.nodes.get_pair_mut(found, successor);
                core::mem::swap(a.value_mut(), b.value_mut());
                successor
            }
            _ => found,
        };

        let node = self.node(spliced);
        let child = node.left().or(node.right());
        let parent = node.parent();

        if let Some(child) = child {
            self.node_mut(child).set_parent(parent);
        }
        self.replace_child(parent, spliced, child);
        self.adjust_sizes_to_root(parent, -1);

        let removed = self.nodes.take(spliced);
        if removed.color() == Color::Black {
            self.repair_after_delete(child, parent);
        }
        Some(removed.into_value())
    }
}
