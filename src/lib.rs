//! Order-statistic red-black tree and ranked leaderboard index for Rust.
//!
//! This crate provides [`RankTree`], an ordered set that answers rank queries in O(log n),
//! and [`Leaderboard`], a name-addressed index of [`Player`]s built on top of it.
//!
//! - [`get_rank`](RankTree::get_rank) - Get the one-based sorted position of a value
//! - [`get_item_at_rank`](RankTree::get_item_at_rank) - Get the value at a sorted position
//! - [`bulk_insert`](RankTree::bulk_insert) - Rebuild a balanced tree from a known set in one pass
//! - Indexing by [`Rank`] - e.g., `tree[Rank(1)]` for the smallest value
//!
//! # Example
//!
//! ```
//! use ranked_tree::{Leaderboard, Player, Tier};
//!
//! let mut board = Leaderboard::new();
//! board.bulk_add([
//!     Player::new("ada", 2310).with_record(40, 12),
//!     Player::new("bob", 1675),
//!     Player::new("cy", 1940),
//! ])?;
//!
//! // Rank 1 is the best player
//! assert_eq!(board.rank("cy"), Some(2));
//! assert_eq!(board.entity_at_rank(1).map(|p| p.name()), Some("ada"));
//!
//! // Rating changes move the player immediately
//! board.update_rating("bob", 2400)?;
//! assert_eq!(board.rank("bob"), Some(1));
//!
//! assert_eq!(board.distribution()[Tier::Diamond], 2);
//! # Ok::<(), ranked_tree::IndexError>(())
//! ```
//!
//! # Implementation
//!
//! The tree is a red-black tree stored in an arena and addressed by compact handles. Every
//! node caches the size of its subtree; insertions, deletions and rotations keep those sizes
//! exact, which lets rank and select walk a single root-to-leaf path.
//!
//! # Features
//!
//! - **`serde`** - `Serialize`/`Deserialize` for [`Player`], [`Tier`], [`Outcome`] and
//!   [`IndexConfig`]

// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod config;
mod error;
mod order_statistic;
mod player;
mod raw;

pub mod leaderboard;
pub mod rank_tree;

pub use config::IndexConfig;
pub use error::IndexError;
pub use leaderboard::{Distribution, Leaderboard};
pub use order_statistic::Rank;
pub use player::{Outcome, Player, Tier};
pub use rank_tree::RankTree;
