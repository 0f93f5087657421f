use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{RawRankTree, TraversalStack};

mod capacity;
mod order_statistic;

/// An ordered set based on a red-black tree whose nodes are augmented with subtree sizes.
///
/// Besides the usual ordered-set operations, the tree answers "what is the rank of this value"
/// ([`get_rank`]) and "which value holds rank k" ([`get_item_at_rank`]) in O(log n). Ranks are
/// one-based: rank 1 is the smallest value.
///
/// It is a logic error for a value to be modified in such a way that its ordering relative to
/// any other value, as determined by the [`Ord`] trait, changes while it is in the tree. Remove
/// the value, change it, and insert it again instead.
///
/// [`get_rank`]: RankTree::get_rank
/// [`get_item_at_rank`]: RankTree::get_item_at_rank
///
/// # Examples
///
/// ```
/// use ranked_tree::RankTree;
///
/// let mut scores = RankTree::new();
/// scores.insert(1200);
/// scores.insert(900);
/// scores.insert(1500);
///
/// assert_eq!(scores.count(), 3);
/// assert_eq!(scores.get_rank(&1200), Some(2));
/// assert_eq!(scores.get_item_at_rank(1), Some(&900));
///
/// scores.delete(&900);
/// assert_eq!(scores.get_rank(&1200), Some(1));
///
/// let ascending: Vec<_> = scores.in_order().copied().collect();
/// assert_eq!(ascending, [1200, 1500]);
/// ```
///
/// A tree built from values that are all known up front should use
/// [`bulk_insert`](RankTree::bulk_insert) (or [`FromIterator`]), which sorts once and builds a
/// balanced tree directly:
///
/// ```
/// use ranked_tree::RankTree;
///
/// let tree: RankTree<u32> = (0..1000).rev().collect();
/// assert_eq!(tree.get_rank(&0), Some(1));
/// ```
#[derive(Clone)]
pub struct RankTree<T> {
    raw: RawRankTree<T>,
}

/// An ascending iterator over the values of a [`RankTree`].
///
/// This `struct` is created by [`RankTree::in_order`] and [`RankTree::iter_from_rank`]. Every
/// call starts a fresh walk; the iterator keeps an explicit stack of pending nodes rather than
/// recursing.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    tree: &'a RawRankTree<T>,
    stack: TraversalStack,
    remaining: usize,
}

impl<T> RankTree<T> {
    /// Makes a new, empty `RankTree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_tree::RankTree;
    ///
    /// let mut tree = RankTree::new();
    /// tree.insert("a");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> RankTree<T> {
        RankTree {
            raw: RawRankTree::new(),
        }
    }

    /// Returns the number of values in the tree.
    ///
    /// # Complexity
    ///
    /// O(1): the root caches the size of the whole tree.
    #[must_use]
    pub fn count(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.root().is_none()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the smallest value, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first()
    }

    /// Returns the largest value, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last()
    }

    /// Walks every value in ascending order.
    ///
    /// Each call starts a new traversal from the smallest value.
    ///
    /// # Complexity
    ///
    /// O(log n) to start, O(n) to exhaust.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_tree::RankTree;
    ///
    /// let tree = RankTree::from([3, 1, 2]);
    /// let values: Vec<_> = tree.in_order().collect();
    /// assert_eq!(values, [&1, &2, &3]);
    /// ```
    pub fn in_order(&self) -> Iter<'_, T> {
        let mut stack = TraversalStack::new();
        self.raw.push_left_spine(self.raw.root(), &mut stack);
        Iter {
            tree: &self.raw,
            stack,
            remaining: self.count(),
        }
    }

    /// Walks the values in ascending order starting with the value at one-based `rank`.
    ///
    /// Yields nothing when `rank` is `0` or past the last value. Equivalent to
    /// `in_order().skip(rank - 1)` without walking the skipped values.
    ///
    /// # Complexity
    ///
    /// O(log n) to start.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_tree::RankTree;
    ///
    /// let tree: RankTree<u32> = (1..=10).collect();
    /// let window: Vec<_> = tree.iter_from_rank(4).take(3).copied().collect();
    /// assert_eq!(window, [4, 5, 6]);
    /// ```
    pub fn iter_from_rank(&self, rank: usize) -> Iter<'_, T> {
        let stack = self.raw.seek_rank(rank);
        let remaining = if stack.is_empty() { 0 } else { self.count() - rank + 1 };
        Iter {
            tree: &self.raw,
            stack,
            remaining,
        }
    }
}

impl<T: Ord> RankTree<T> {
    /// Adds a value to the tree.
    ///
    /// Returns whether the value was newly inserted. If an equal value is already present the
    /// tree is left unchanged and `false` is returned.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_tree::RankTree;
    ///
    /// let mut tree = RankTree::new();
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(2));
    /// assert_eq!(tree.count(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.raw.insert(value)
    }

    /// Replaces the entire contents of the tree with `values`.
    ///
    /// The input is sorted and equal values are collapsed to one, then a balanced tree is built
    /// directly from the sorted run. This is much faster than inserting the values one by one.
    ///
    /// # Complexity
    ///
    /// O(n log n) for the sort, O(n) for the build.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_tree::RankTree;
    ///
    /// let mut tree = RankTree::from([100]);
    /// tree.bulk_insert([5, 3, 5, 1]);
    ///
    /// let values: Vec<_> = tree.in_order().copied().collect();
    /// assert_eq!(values, [1, 3, 5]);
    /// ```
    pub fn bulk_insert<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let mut values: Vec<T> = values.into_iter().collect();
        values.sort_unstable();
        values.dedup();
        self.raw.build_from_sorted(values);
    }

    /// Removes the value equal to `value` and returns it, or returns `None` if it is absent.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_tree::RankTree;
    ///
    /// let mut tree = RankTree::from([1, 2, 3]);
    /// assert_eq!(tree.delete(&2), Some(2));
    /// assert_eq!(tree.delete(&2), None);
    /// assert_eq!(tree.get_rank(&3), Some(2));
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T> {
        self.raw.remove(value)
    }

    /// Returns `true` if the tree holds a value equal to `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.raw.find(value).is_some()
    }

    /// Returns the stored value equal to `value`, if any.
    #[must_use]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.raw.get(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for RankTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.in_order()).finish()
    }
}

impl<T> Default for RankTree<T> {
    fn default() -> Self {
        RankTree::new()
    }
}

impl<T: Ord> FromIterator<T> for RankTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RankTree::new();
        tree.bulk_insert(iter);
        tree
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RankTree<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Ord> Extend<T> for RankTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a RankTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.in_order()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let handle = self.tree.advance(&mut self.stack)?;
        self.remaining -= 1;
        Some(self.tree.value(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
