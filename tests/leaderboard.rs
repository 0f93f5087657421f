use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::thread;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use ranked_tree::{IndexConfig, IndexError, Leaderboard, Outcome, Player, RankTree, Tier};
use static_assertions::assert_impl_all;

assert_impl_all!(Leaderboard: Send, Sync, Clone);
assert_impl_all!(RankTree<std::sync::Arc<Player>>: Send, Sync);

fn names(players: &[&Player]) -> Vec<String> {
    players.iter().map(|p| p.name().to_owned()).collect()
}

fn seeded(count: i32) -> Leaderboard {
    let mut board = Leaderboard::new();
    board
        .bulk_add((0..count).map(|i| Player::new(format!("p{i:04}"), 1000 + (i * 37) % 2000)))
        .expect("ratings within default bounds");
    board
}

// ─── Scenarios ──────────────────────────────────────────────────────────────

#[test]
fn ties_break_by_name() {
    let mut board = Leaderboard::new();
    for (name, rating) in [("A", 1000), ("B", 1200), ("C", 1200), ("D", 900)] {
        board.add_or_update(Player::new(name, rating)).unwrap();
    }

    assert_eq!(board.rank("B"), Some(1));
    assert_eq!(board.rank("C"), Some(2));
    assert_eq!(board.rank("A"), Some(3));
    assert_eq!(board.rank("D"), Some(4));
    assert_eq!(names(&board.top_n(10)), ["B", "C", "A", "D"]);
}

#[test]
fn rating_jump_moves_only_that_player() {
    let mut board = seeded(500);
    let last = board.entity_at_rank(500).unwrap().name().to_owned();
    let before: Vec<String> = board.iter().map(|p| p.name().to_owned()).filter(|n| *n != last).collect();

    assert_eq!(board.update_rating(&last, 9_999), Ok(true));

    assert_eq!(board.rank(&last), Some(1));
    let after: Vec<String> = board.iter().skip(1).map(|p| p.name().to_owned()).collect();
    assert_eq!(after, before);
}

#[test]
fn add_or_update_twice_is_idempotent() {
    let mut board = seeded(50);
    let player = board.entity_at_rank(17).unwrap().clone();

    board.add_or_update(player.clone()).unwrap();
    board.add_or_update(player.clone()).unwrap();

    assert_eq!(board.count(), 50);
    assert_eq!(board.rank(player.name()), Some(17));
}

#[test]
fn add_or_update_replaces_stale_position() {
    let mut board = seeded(10);
    let name = board.entity_at_rank(10).unwrap().name().to_owned();

    board.add_or_update(Player::new(name.clone(), 5_000).with_record(3, 0)).unwrap();

    assert_eq!(board.count(), 10);
    assert_eq!(board.rank(&name), Some(1));
    assert_eq!(board.iter().filter(|p| p.name() == name).count(), 1);
    assert_eq!(board.get(&name).map(Player::wins), Some(3));
}

#[test]
fn distribution_covers_every_player() {
    let board = seeded(1_000);
    let distribution = board.distribution();

    assert_eq!(distribution.total(), 1_000);
    let map: BTreeMap<Tier, usize> = distribution.into();
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), Tier::ALL);

    let mut expected: BTreeMap<Tier, usize> = Tier::ALL.iter().map(|&t| (t, 0)).collect();
    for player in &board {
        *expected.get_mut(&player.tier()).unwrap() += 1;
    }
    assert_eq!(map, expected);
}

#[test]
fn empty_board_answers_not_found() {
    let board = Leaderboard::new();

    assert_eq!(board.count(), 0);
    assert_eq!(board.rank("nobody"), None);
    assert!(board.entity_at_rank(0).is_none());
    assert!(board.entity_at_rank(1).is_none());
    assert!(board.top_n(5).is_empty());
    assert_eq!(board.around(1, 3), Err(IndexError::RankOutOfRange { rank: 1, count: 0 }));
    assert_eq!(board.distribution().total(), 0);
}

#[test]
fn around_clips_at_both_ends() {
    let board = seeded(20);
    let all = names(&board.top_n(20));

    assert_eq!(names(&board.around(1, 3).unwrap()), all[0..4].to_vec());
    assert_eq!(names(&board.around(20, 3).unwrap()), all[16..20].to_vec());
    assert_eq!(names(&board.around(10, 2).unwrap()), all[7..12].to_vec());
    assert_eq!(names(&board.around(5, 0).unwrap()), all[4..5].to_vec());
    assert_eq!(names(&board.around(5, usize::MAX).unwrap()), all);

    assert_eq!(board.around(0, 1), Err(IndexError::RankOutOfRange { rank: 0, count: 20 }));
    assert_eq!(board.around(21, 1), Err(IndexError::RankOutOfRange { rank: 21, count: 20 }));
}

#[test]
fn top_n_is_capped_by_count() {
    let board = seeded(7);
    assert_eq!(board.top_n(3).len(), 3);
    assert_eq!(board.top_n(100).len(), 7);
    assert!(board.top_n(0).is_empty());
}

#[test]
fn unknown_names_are_no_ops() {
    let mut board = seeded(5);

    assert_eq!(board.update_rating("ghost", 1200), Ok(false));
    assert_eq!(board.record_match("ghost", Outcome::Win, 10), Ok(false));
    assert_eq!(board.remove("ghost"), None);
    assert_eq!(board.count(), 5);
}

#[test]
fn rejected_ratings_change_nothing() {
    let mut board = Leaderboard::with_config(IndexConfig::default().with_rating_bounds(100..=3000));
    board.add_or_update(Player::new("a", 200)).unwrap();
    assert_eq!(board.config().rating_bounds(), 100..=3000);

    assert!(matches!(
        board.add_or_update(Player::new("b", 99)),
        Err(IndexError::RatingOutOfBounds { rating: 99, min: 100, max: 3000 })
    ));
    assert!(board.update_rating("a", 3001).is_err());
    assert!(board.record_match("a", Outcome::Loss, -101).is_err());
    assert!(board.bulk_add([Player::new("c", 500), Player::new("d", 4000)]).is_err());

    assert_eq!(board.count(), 1);
    assert_eq!(board.get("a").map(Player::rating), Some(200));
    assert_eq!(board.get("a").map(Player::losses), Some(0));
}

#[test]
fn bulk_add_replaces_everything_and_keeps_first_duplicate() {
    let mut board = seeded(30);
    let loaded = board
        .bulk_add([
            Player::new("x", 1500),
            Player::new("y", 1600),
            Player::new("x", 2500),
            Player::new("z", 1400),
        ])
        .unwrap();

    assert_eq!(loaded, 3);
    assert_eq!(board.count(), 3);
    assert!(!board.contains("p0000"));
    assert_eq!(names(&board.top_n(3)), ["y", "x", "z"]);
}

#[test]
fn bulk_add_ignores_ratings_of_discarded_duplicates() {
    let mut board = Leaderboard::new();

    assert_eq!(board.bulk_add([Player::new("x", 1500), Player::new("x", 20_000)]), Ok(1));
    assert_eq!(board.get("x").map(Player::rating), Some(1500));

    assert!(board.bulk_add([Player::new("y", 20_000), Player::new("y", 1500)]).is_err());
    assert_eq!(board.count(), 1);
}

#[test]
fn remove_returns_the_player() {
    let mut board = seeded(10);
    let name = board.entity_at_rank(4).unwrap().name().to_owned();
    let fifth = board.entity_at_rank(5).unwrap().name().to_owned();

    let removed = board.remove(&name).unwrap();

    assert_eq!(removed.name(), name);
    assert_eq!(board.count(), 9);
    assert_eq!(board.rank(&name), None);
    assert_eq!(board.rank(&fifth), Some(4));
}

#[test]
fn record_match_updates_counters_and_position() {
    let mut board = Leaderboard::new();
    board.bulk_add([Player::new("a", 1500), Player::new("b", 1520)]).unwrap();

    assert_eq!(board.record_match("a", Outcome::Win, 30), Ok(true));
    assert_eq!(board.record_match("b", Outcome::Loss, -30), Ok(true));

    let a = board.get("a").unwrap();
    assert_eq!((a.rating(), a.wins(), a.losses()), (1530, 1, 0));
    assert_eq!(a.win_percentage(), Some(100.0));
    assert_eq!(board.rank("a"), Some(1));
    assert_eq!(board.get("b").map(Player::losses), Some(1));
}

#[test]
fn shared_behind_a_mutex() {
    let board = Arc::new(Mutex::new(seeded(100)));

    let workers: Vec<_> = (0..4)
        .map(|w| {
            let board = Arc::clone(&board);
            thread::spawn(move || {
                for i in (w..100).step_by(4) {
                    let name = format!("p{i:04}");
                    board.lock().unwrap().update_rating(&name, 3000 + i).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let board = board.lock().unwrap();
    assert_eq!(board.rank("p0099"), Some(1));
    assert_eq!(board.rank("p0000"), Some(100));
}

// ─── Randomized model checks ────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum BoardOp {
    Upsert(u8, i32),
    Update(u8, i32),
    Remove(u8),
}

fn board_op_strategy() -> impl Strategy<Value = BoardOp> {
    prop_oneof![
        4 => (any::<u8>(), 0i32..3000).prop_map(|(n, r)| BoardOp::Upsert(n, r)),
        4 => (any::<u8>(), 0i32..3000).prop_map(|(n, r)| BoardOp::Update(n, r)),
        1 => any::<u8>().prop_map(BoardOp::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// After every mutation the ranking matches a name → rating model sorted best-first.
    #[test]
    fn board_matches_model(ops in proptest::collection::vec(board_op_strategy(), 0..400)) {
        let mut board = Leaderboard::new();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                BoardOp::Upsert(n, rating) => {
                    let name = format!("n{n}");
                    board.add_or_update(Player::new(name.clone(), rating)).unwrap();
                    model.insert(name, rating);
                }
                BoardOp::Update(n, rating) => {
                    let name = format!("n{n}");
                    let known = board.update_rating(&name, rating).unwrap();
                    prop_assert_eq!(known, model.contains_key(&name));
                    if let Some(r) = model.get_mut(&name) {
                        *r = rating;
                    }
                }
                BoardOp::Remove(n) => {
                    let name = format!("n{n}");
                    prop_assert_eq!(board.remove(&name).is_some(), model.remove(&name).is_some());
                }
            }

            prop_assert_eq!(board.count(), model.len());
        }

        let mut expected: Vec<(i32, String)> = model.into_iter().map(|(n, r)| (r, n)).collect();
        expected.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        for (i, (rating, name)) in expected.iter().enumerate() {
            prop_assert_eq!(board.rank(name), Some(i + 1));
            let at = board.entity_at_rank(i + 1).unwrap();
            prop_assert_eq!((at.name(), at.rating()), (name.as_str(), *rating));
        }
        prop_assert_eq!(board.distribution().total(), expected.len());
    }
}
