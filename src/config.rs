use core::ops::RangeInclusive;

use crate::IndexError;

/// Settings for a [`Leaderboard`](crate::Leaderboard).
///
/// # Examples
///
/// ```
/// use ranked_tree::{IndexConfig, Leaderboard, Player};
///
/// let config = IndexConfig::default().with_capacity(1_000_000).with_rating_bounds(0..=4000);
/// let mut board = Leaderboard::with_config(config);
///
/// assert!(board.add_or_update(Player::new("ada", 4001)).is_err());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "UncheckedIndexConfig"))]
pub struct IndexConfig {
    /// Number of players to preallocate room for.
    pub capacity: usize,
    /// Lowest accepted rating.
    pub min_rating: i32,
    /// Highest accepted rating.
    pub max_rating: i32,
}

impl IndexConfig {
    pub const DEFAULT_MIN_RATING: i32 = 0;
    pub const DEFAULT_MAX_RATING: i32 = 10_000;

    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Limits accepted ratings to `bounds`.
    ///
    /// # Panics
    ///
    /// Panics if `bounds` is empty.
    #[must_use]
    pub fn with_rating_bounds(mut self, bounds: RangeInclusive<i32>) -> Self {
        assert!(!bounds.is_empty(), "`IndexConfig::with_rating_bounds()` - `bounds` is empty!");
        self.min_rating = *bounds.start();
        self.max_rating = *bounds.end();
        self
    }

    /// Accepted ratings, inclusive.
    #[must_use]
    pub fn rating_bounds(&self) -> RangeInclusive<i32> {
        self.min_rating..=self.max_rating
    }

    pub(crate) fn check_rating(&self, rating: i64) -> Result<i32, IndexError> {
        i32::try_from(rating)
            .ok()
            .filter(|r| self.rating_bounds().contains(r))
            .ok_or(IndexError::RatingOutOfBounds {
                rating,
                min: self.min_rating,
                max: self.max_rating,
            })
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            capacity: 0,
            min_rating: Self::DEFAULT_MIN_RATING,
            max_rating: Self::DEFAULT_MAX_RATING,
        }
    }
}

/// Deserialized fields before the rating bounds are checked.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct UncheckedIndexConfig {
    capacity: usize,
    min_rating: i32,
    max_rating: i32,
}

#[cfg(feature = "serde")]
impl Default for UncheckedIndexConfig {
    fn default() -> Self {
        let IndexConfig {
            capacity,
            min_rating,
            max_rating,
        } = IndexConfig::default();
        Self {
            capacity,
            min_rating,
            max_rating,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedIndexConfig> for IndexConfig {
    type Error = IndexError;

    fn try_from(fields: UncheckedIndexConfig) -> Result<Self, IndexError> {
        if fields.min_rating > fields.max_rating {
            return Err(IndexError::EmptyRatingBounds {
                min: fields.min_rating,
                max: fields.max_rating,
            });
        }
        Ok(Self {
            capacity: fields.capacity,
            min_rating: fields.min_rating,
            max_rating: fields.max_rating,
        })
    }
}
