/// A one-based rank into the ascending order of a [`RankTree`](crate::RankTree).
///
/// Rank 1 is the smallest value under the tree's ordering. For a
/// [`Leaderboard`](crate::Leaderboard), whose players order best-first, rank 1 is the top
/// player.
///
/// # Examples
///
/// ```
/// use ranked_tree::{RankTree, Rank};
///
/// let tree = RankTree::from([30, 10, 20]);
///
/// assert_eq!(tree[Rank(1)], 10);
/// assert_eq!(tree[Rank(3)], 30);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
