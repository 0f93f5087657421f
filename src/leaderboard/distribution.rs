use core::ops::Index;
use std::collections::BTreeMap;

use crate::Tier;

/// Population of every [`Tier`], zero-count tiers included.
///
/// Created by [`Leaderboard::distribution`](crate::Leaderboard::distribution).
///
/// # Examples
///
/// ```
/// use ranked_tree::{Leaderboard, Player, Tier};
///
/// let mut board = Leaderboard::new();
/// board.bulk_add([Player::new("a", 950), Player::new("b", 1450), Player::new("c", 1500)])?;
///
/// let distribution = board.distribution();
/// assert_eq!(distribution[Tier::Gold], 2);
/// assert_eq!(distribution[Tier::Master], 0);
/// assert_eq!(distribution.total(), 3);
/// # Ok::<(), ranked_tree::IndexError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Distribution {
    counts: [usize; Tier::ALL.len()],
}

impl Distribution {
    pub(crate) fn add(&mut self, tier: Tier) {
        self.counts[tier as usize] += 1;
    }

    /// Number of players in `tier`.
    #[must_use]
    pub const fn get(&self, tier: Tier) -> usize {
        self.counts[tier as usize]
    }

    /// Number of players across all tiers.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Every tier with its population, lowest tier first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Tier, usize)> + '_ {
        Tier::ALL.into_iter().map(|tier| (tier, self.get(tier)))
    }
}

impl Index<Tier> for Distribution {
    type Output = usize;

    fn index(&self, tier: Tier) -> &usize {
        &self.counts[tier as usize]
    }
}

impl<'a> FromIterator<&'a crate::Player> for Distribution {
    fn from_iter<I: IntoIterator<Item = &'a crate::Player>>(players: I) -> Self {
        let mut distribution = Distribution::default();
        for player in players {
            distribution.add(player.tier());
        }
        distribution
    }
}

impl From<Distribution> for BTreeMap<Tier, usize> {
    fn from(distribution: Distribution) -> Self {
        distribution.iter().collect()
    }
}
