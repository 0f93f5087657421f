use thiserror::Error;

/// Rejected arguments to a [`Leaderboard`](crate::Leaderboard) operation or configuration.
///
/// Lookups that simply find nothing (an unknown name, a rank past the end) are not errors and
/// come back as `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// A rank window was centred on a rank outside `1..=count`.
    #[error("rank {rank} is outside 1..={count}")]
    RankOutOfRange {
        /// The requested centre rank.
        rank: usize,
        /// The number of players at the time of the request.
        count: usize,
    },

    /// A rating fell outside the configured bounds, or a rating change overflowed.
    #[error("rating {rating} is outside the accepted range {min}..={max}")]
    RatingOutOfBounds {
        /// The offending rating, widened so that an out-of-range sum is reported exactly.
        rating: i64,
        /// Lowest accepted rating.
        min: i32,
        /// Highest accepted rating.
        max: i32,
    },

    /// Deserialized rating bounds with `min_rating` above `max_rating`.
    #[error("rating bounds {min}..={max} are empty")]
    EmptyRatingBounds {
        /// Configured lowest rating.
        min: i32,
        /// Configured highest rating.
        max: i32,
    },
}
