use core::iter::Map;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::rank_tree::{self, RankTree};
use crate::{IndexConfig, IndexError, Outcome, Player};

mod distribution;

pub use distribution::Distribution;

/// A ranked index of [`Player`]s addressed by name.
///
/// The leaderboard pairs a [`RankTree`] ordered best-first with a name lookup table. Both hold
/// the same shared player, so a rating change always unlinks the player from the tree, updates
/// it, and links it back at its new position. Callers never get mutable access to a live
/// player.
///
/// Rank 1 is the best player.
///
/// The leaderboard is `Send + Sync` but takes no locks of its own; share it behind a single
/// `Mutex` or `RwLock`.
///
/// # Examples
///
/// ```
/// use ranked_tree::{Leaderboard, Player};
///
/// let mut board = Leaderboard::new();
/// board.add_or_update(Player::new("A", 1000))?;
/// board.add_or_update(Player::new("B", 1200))?;
/// board.add_or_update(Player::new("C", 1200))?;
/// board.add_or_update(Player::new("D", 900))?;
///
/// assert_eq!(board.rank("B"), Some(1));
/// assert_eq!(board.rank("D"), Some(4));
///
/// board.update_rating("D", 1500)?;
/// assert_eq!(board.rank("D"), Some(1));
/// assert_eq!(board.entity_at_rank(2).map(|p| p.name()), Some("B"));
/// # Ok::<(), ranked_tree::IndexError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Leaderboard {
    ranking: RankTree<Arc<Player>>,
    players: FxHashMap<String, Arc<Player>>,
    config: IndexConfig,
}

impl Leaderboard {
    /// Creates an empty leaderboard with the default [`IndexConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty leaderboard, preallocated to `config.capacity` players.
    #[must_use]
    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            ranking: RankTree::with_capacity(config.capacity),
            players: FxHashMap::with_capacity_and_hasher(config.capacity, Default::default()),
            config,
        }
    }

    /// The settings this leaderboard was created with.
    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Number of players.
    #[must_use]
    pub fn count(&self) -> usize {
        debug_assert_eq!(self.ranking.count(), self.players.len(), "ranking and name table diverged");
        self.ranking.count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }

    /// Adds `player`, replacing any player with the same name.
    ///
    /// A replaced player is unlinked at its old rating before the new one is linked, so a name
    /// never holds two positions.
    ///
    /// # Errors
    ///
    /// [`IndexError::RatingOutOfBounds`] if the rating is outside the configured bounds. The
    /// leaderboard is unchanged.
    pub fn add_or_update(&mut self, player: Player) -> Result<(), IndexError> {
        self.check_rating(i64::from(player.rating()))?;

        if let Some(previous) = self.players.get(player.name()) {
            self.ranking.delete(previous);
        }
        let player = Arc::new(player);
        self.ranking.insert(Arc::clone(&player));
        self.players.insert(player.name().to_owned(), player);
        Ok(())
    }

    /// Replaces the whole leaderboard with `players`.
    ///
    /// When a name appears more than once, its first occurrence wins. Returns the number of
    /// players loaded.
    ///
    /// # Errors
    ///
    /// [`IndexError::RatingOutOfBounds`] for the first kept player whose rating is outside the
    /// configured bounds. Discarded duplicates are not checked. The leaderboard is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_tree::{Leaderboard, Player};
    ///
    /// let mut board = Leaderboard::new();
    /// let loaded = board.bulk_add([
    ///     Player::new("ada", 1500),
    ///     Player::new("bob", 1700),
    ///     Player::new("ada", 2500),
    /// ])?;
    ///
    /// assert_eq!(loaded, 2);
    /// assert_eq!(board.get("ada").map(Player::rating), Some(1500));
    /// # Ok::<(), ranked_tree::IndexError>(())
    /// ```
    pub fn bulk_add<I: IntoIterator<Item = Player>>(&mut self, players: I) -> Result<usize, IndexError> {
        let players = players.into_iter();
        let mut table: FxHashMap<String, Arc<Player>> =
            FxHashMap::with_capacity_and_hasher(players.size_hint().0, Default::default());
        let mut received = 0usize;

        for player in players {
            received += 1;
            if !table.contains_key(player.name()) {
                self.check_rating(i64::from(player.rating()))?;
                table.insert(player.name().to_owned(), Arc::new(player));
            }
        }

        self.ranking.bulk_insert(table.values().cloned());
        self.players = table;

        debug!(
            received,
            duplicates = received - self.players.len(),
            count = self.players.len(),
            "rebuilt leaderboard"
        );
        Ok(self.players.len())
    }

    /// Moves the named player to `rating`.
    ///
    /// Returns `Ok(false)` and changes nothing if no player has that name.
    ///
    /// # Errors
    ///
    /// [`IndexError::RatingOutOfBounds`] if `rating` is outside the configured bounds.
    pub fn update_rating(&mut self, name: &str, rating: i32) -> Result<bool, IndexError> {
        let rating = self.check_rating(i64::from(rating))?;
        Ok(self.relink(name, |player| player.set_rating(rating)))
    }

    /// Records a game for the named player and shifts their rating by `rating_delta`.
    ///
    /// Returns `Ok(false)` and changes nothing if no player has that name.
    ///
    /// # Errors
    ///
    /// [`IndexError::RatingOutOfBounds`] if the resulting rating is outside the configured
    /// bounds. The player is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_tree::{Leaderboard, Outcome, Player};
    ///
    /// let mut board = Leaderboard::new();
    /// board.bulk_add([Player::new("ada", 1500), Player::new("bob", 1510)])?;
    ///
    /// board.record_match("ada", Outcome::Win, 25)?;
    /// board.record_match("bob", Outcome::Loss, -25)?;
    ///
    /// let ada = board.get("ada").unwrap();
    /// assert_eq!((ada.rating(), ada.wins()), (1525, 1));
    /// assert_eq!(board.rank("ada"), Some(1));
    /// # Ok::<(), ranked_tree::IndexError>(())
    /// ```
    pub fn record_match(&mut self, name: &str, outcome: Outcome, rating_delta: i32) -> Result<bool, IndexError> {
        let Some(current) = self.players.get(name) else {
            return Ok(false);
        };
        let rating = self.check_rating(i64::from(current.rating()) + i64::from(rating_delta))?;
        Ok(self.relink(name, |player| {
            player.set_rating(rating);
            player.record(outcome);
        }))
    }

    /// Removes the named player and returns it.
    pub fn remove(&mut self, name: &str) -> Option<Player> {
        let player = self.players.remove(name)?;
        let unlinked = self.ranking.delete(&player);
        debug_assert!(unlinked.is_some(), "`{name}` was in the name table but not ranked");
        drop(unlinked);
        Some(Arc::unwrap_or_clone(player))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.get(name).map(|player| &**player)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.players.contains_key(name)
    }

    /// One-based rank of the named player, or `None` if there is no such player.
    #[must_use]
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.ranking.get_rank(self.players.get(name)?)
    }

    /// The player at one-based `rank`, or `None` if `rank` is `0` or past the last player.
    #[must_use]
    pub fn entity_at_rank(&self, rank: usize) -> Option<&Player> {
        self.ranking.get_item_at_rank(rank).map(|player| &**player)
    }

    /// The best `n` players, best first. Shorter than `n` when fewer players exist.
    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<&Player> {
        self.iter().take(n).collect()
    }

    /// Players ranked within `radius` of `rank`, best first.
    ///
    /// The window `max(1, rank - radius)..=min(count, rank + radius)` is clipped to the board.
    ///
    /// # Errors
    ///
    /// [`IndexError::RankOutOfRange`] if `rank` is `0` or past the last player.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_tree::{Leaderboard, Player};
    ///
    /// let mut board = Leaderboard::new();
    /// board.bulk_add((0..10).map(|i| Player::new(format!("p{i}"), 1000 + i)))?;
    ///
    /// let names: Vec<_> = board.around(1, 2)?.iter().map(|p| p.name()).collect();
    /// assert_eq!(names, ["p9", "p8", "p7"]);
    /// assert!(board.around(11, 2).is_err());
    /// # Ok::<(), ranked_tree::IndexError>(())
    /// ```
    pub fn around(&self, rank: usize, radius: usize) -> Result<Vec<&Player>, IndexError> {
        let count = self.count();
        if rank == 0 || rank > count {
            return Err(IndexError::RankOutOfRange {
                rank,
                count,
            });
        }

        let first = rank.saturating_sub(radius).max(1);
        let last = rank.saturating_add(radius).min(count);
        Ok(self.ranking.iter_from_rank(first).take(last - first + 1).map(|player| &**player).collect())
    }

    /// Counts the players in every tier in one pass.
    #[must_use]
    pub fn distribution(&self) -> Distribution {
        self.iter().collect()
    }

    /// Every player, best first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Player> + '_ {
        self.ranking.in_order().map(|player| &**player)
    }

    fn check_rating(&self, rating: i64) -> Result<i32, IndexError> {
        self.config.check_rating(rating).inspect_err(|error| warn!(%error, "rejected rating"))
    }

    /// Unlinks the named player from the ranking, applies `change`, and links it back.
    fn relink(&mut self, name: &str, change: impl FnOnce(&mut Player)) -> bool {
        let Some(entry) = self.players.get_mut(name) else {
            return false;
        };
        let from = entry.rating();

        // Dropping the ranking's handle leaves the table's `Arc` unique, so `make_mut` edits the
        // player in place.
        drop(self.ranking.delete(entry));
        change(Arc::make_mut(entry));
        self.ranking.insert(Arc::clone(entry));

        trace!(name, from, to = entry.rating(), "moved player");
        true
    }
}

impl<'a> IntoIterator for &'a Leaderboard {
    type Item = &'a Player;
    type IntoIter = Map<rank_tree::Iter<'a, Arc<Player>>, fn(&'a Arc<Player>) -> &'a Player>;

    fn into_iter(self) -> Self::IntoIter {
        let shared: fn(&'a Arc<Player>) -> &'a Player = |player| &**player;
        self.ranking.in_order().map(shared)
    }
}
