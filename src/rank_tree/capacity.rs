use super::RankTree;
use crate::raw::RawRankTree;

impl<T> RankTree<T> {
    /// Creates an empty tree with node storage for at least `capacity` values.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_tree::RankTree;
    ///
    /// let tree: RankTree<i32> = RankTree::with_capacity(16);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RankTree {
            raw: RawRankTree::with_capacity(capacity),
        }
    }

    /// Returns how many values the tree can hold before its node storage reallocates.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Reserves node storage for at least `additional` more values.
    pub fn reserve(&mut self, additional: usize) {
        self.raw.reserve(additional);
    }
}
