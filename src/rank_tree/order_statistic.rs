use core::ops::Index;

use super::RankTree;
use crate::Rank;

impl<T: Ord> RankTree<T> {
    /// Returns the value at one-based position `rank` in ascending order.
    ///
    /// Returns `None` if `rank` is `0` or greater than [`count`](RankTree::count).
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
    /// let tree = RankTree::from([10, 20, 30]);
    /// assert_eq!(tree.get_item_at_rank(2), Some(&20));
    /// assert!(tree.get_item_at_rank(0).is_none());
    /// assert!(tree.get_item_at_rank(4).is_none());
    /// ```
    #[must_use]
    pub fn get_item_at_rank(&self, rank: usize) -> Option<&T> {
        self.raw.get_by_rank(rank)
    }

    /// Returns the one-based rank of `value` in ascending order, or `None` if the value is not
    /// present.
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
    /// let tree = RankTree::from([10, 20]);
    ///
    /// assert_eq!(tree.get_rank(&20), Some(2));
    /// assert_eq!(tree.get_rank(&15), None);
    /// ```
    #[must_use]
    pub fn get_rank(&self, value: &T) -> Option<usize> {
        self.raw.rank_of(value)
    }
}

/// Indexes into the tree by one-based rank.
///
/// # Panics
///
/// Panics if `rank` is `0` or past the last value.
///
/// # Examples
///
/// ```
/// use ranked_tree::{RankTree, Rank};
///
/// let tree = RankTree::from([10, 20, 30]);
/// assert_eq!(tree[Rank(2)], 20);
/// ```
impl<T: Ord> Index<Rank> for RankTree<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_item_at_rank(rank.0).expect("rank out of bounds")
    }
}
