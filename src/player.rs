//! Ranked entities and the order they rank in.

use core::cmp::{Ordering, Reverse};
use core::fmt;
use core::hash::{Hash, Hasher};

/// A ranked player.
///
/// Players order best-first: higher rating ranks ahead, and equal ratings fall back to the name
/// in ascending order. Only `name` and `rating` take part in ordering and equality; the
/// win/loss counters are carried along for presentation.
///
/// # Examples
///
/// ```
/// use ranked_tree::{Player, Tier};
///
/// let ada = Player::new("ada", 1850).with_record(12, 4);
/// let bob = Player::new("bob", 1850);
///
/// assert!(ada < bob); // same rating, "ada" sorts first
/// assert!(Player::new("zed", 2000) < ada); // higher rating ranks first
/// assert_eq!(ada.tier(), Tier::Platinum);
/// assert_eq!(ada.win_percentage(), Some(75.0));
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    name: String,
    rating: i32,
    wins: u32,
    losses: u32,
}

impl Player {
    /// Creates a player with no recorded games.
    pub fn new(name: impl Into<String>, rating: i32) -> Self {
        Self {
            name: name.into(),
            rating,
            wins: 0,
            losses: 0,
        }
    }

    /// Sets the win/loss record.
    #[must_use]
    pub fn with_record(mut self, wins: u32, losses: u32) -> Self {
        self.wins = wins;
        self.losses = losses;
        self
    }

    /// The identity key, unique within a [`Leaderboard`](crate::Leaderboard).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn rating(&self) -> i32 {
        self.rating
    }

    #[must_use]
    pub const fn wins(&self) -> u32 {
        self.wins
    }

    #[must_use]
    pub const fn losses(&self) -> u32 {
        self.losses
    }

    /// The tier the current rating falls into.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        Tier::from_rating(self.rating)
    }

    /// Share of games won, in percent, or `None` before the first game.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_percentage(&self) -> Option<f64> {
        let games = u64::from(self.wins) + u64::from(self.losses);
        (games > 0).then(|| u64::from(self.wins) as f64 * 100.0 / games as f64)
    }

    // Rating changes must go through `Leaderboard`, which unlinks the player first.
    pub(crate) fn set_rating(&mut self, rating: i32) {
        self.rating = rating;
    }

    pub(crate) fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins = self.wins.saturating_add(1),
            Outcome::Loss => self.losses = self.losses.saturating_add(1),
        }
    }

    fn order_key(&self) -> (Reverse<i32>, &str) {
        (Reverse(self.rating), &self.name)
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.order_key() == other.order_key()
    }
}

impl Eq for Player {}

impl PartialOrd for Player {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Player {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.order_key().hash(state);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.rating, self.tier())
    }
}

/// The result of one game, from the player's side.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Win,
    Loss,
}

/// Rating bracket, derived from the rating alone.
///
/// Tiers are ordered from lowest to highest.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
}

impl Tier {
    /// Every tier, lowest first.
    pub const ALL: [Tier; 6] = [
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Diamond,
        Tier::Master,
    ];

    /// Lowest rating of each tier, in the same order as [`Tier::ALL`].
    pub const THRESHOLDS: [i32; 6] = [i32::MIN, 1000, 1400, 1800, 2200, 2600];

    /// Buckets a rating.
    ///
    /// ```
    /// use ranked_tree::Tier;
    ///
    /// assert_eq!(Tier::from_rating(-5), Tier::Bronze);
    /// assert_eq!(Tier::from_rating(1399), Tier::Silver);
    /// assert_eq!(Tier::from_rating(1400), Tier::Gold);
    /// assert_eq!(Tier::from_rating(9000), Tier::Master);
    /// ```
    #[must_use]
    pub const fn from_rating(rating: i32) -> Tier {
        let mut i = Self::THRESHOLDS.len() - 1;
        while rating < Self::THRESHOLDS[i] {
            i -= 1;
        }
        Self::ALL[i]
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
            Tier::Master => "Master",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn higher_rating_orders_first_then_name() {
        let mut players = vec![
            Player::new("A", 1000),
            Player::new("B", 1200),
            Player::new("C", 1200),
            Player::new("D", 900),
        ];
        players.sort();

        let names: Vec<_> = players.iter().map(Player::name).collect();
        assert_eq!(names, ["B", "C", "A", "D"]);
    }

    #[test]
    fn record_does_not_affect_equality() {
        let a = Player::new("a", 1500).with_record(3, 1);
        let b = Player::new("a", 1500);
        assert_eq!(a, b);
        assert_ne!(a, Player::new("a", 1501));
    }

    #[test]
    fn every_threshold_starts_its_tier() {
        for (tier, threshold) in Tier::ALL.into_iter().zip(Tier::THRESHOLDS).skip(1) {
            assert_eq!(Tier::from_rating(threshold), tier);
            assert!(Tier::from_rating(threshold - 1) < tier);
        }
        assert_eq!(Tier::from_rating(i32::MIN), Tier::Bronze);
        assert_eq!(Tier::from_rating(i32::MAX), Tier::Master);
    }

    #[test]
    fn win_percentage_needs_games() {
        assert_eq!(Player::new("x", 0).win_percentage(), None);
        assert_eq!(Player::new("x", 0).with_record(1, 3).win_percentage(), Some(25.0));

        let mut p = Player::new("x", 0);
        p.record(Outcome::Win);
        p.record(Outcome::Loss);
        p.record(Outcome::Loss);
        assert_eq!((p.wins(), p.losses()), (1, 2));
    }
}
