#![cfg(feature = "serde")]

use pretty_assertions::assert_eq;
use ranked_tree::{IndexConfig, Leaderboard, Outcome, Player, Tier};

#[test]
fn player_round_trips_with_record() {
    let player = Player::new("ada", 1850).with_record(12, 4);

    let json = serde_json::to_string(&player).unwrap();
    let back: Player = serde_json::from_str(&json).unwrap();

    assert_eq!(back, player);
    assert_eq!((back.wins(), back.losses()), (12, 4));
}

#[test]
fn tiers_and_outcomes_serialize_by_name() {
    assert_eq!(serde_json::to_string(&Tier::Platinum).unwrap(), r#""Platinum""#);
    assert_eq!(serde_json::from_str::<Outcome>(r#""Loss""#).unwrap(), Outcome::Loss);
}

#[test]
fn config_fills_missing_fields_with_defaults() {
    let config: IndexConfig = serde_json::from_str(r#"{ "max_rating": 3000 }"#).unwrap();

    assert_eq!(config.capacity, 0);
    assert_eq!(config.rating_bounds(), IndexConfig::DEFAULT_MIN_RATING..=3000);
}

#[test]
fn config_with_empty_bounds_is_rejected() {
    let error = serde_json::from_str::<IndexConfig>(r#"{ "min_rating": 5000, "max_rating": 10 }"#).unwrap_err();
    assert!(error.to_string().contains("rating bounds 5000..=10 are empty"));

    let single: IndexConfig = serde_json::from_str(r#"{ "min_rating": 10, "max_rating": 10 }"#).unwrap();
    assert_eq!(single.rating_bounds(), 10..=10);
}

#[test]
fn exported_roster_reloads_into_the_same_ranking() {
    let mut board = Leaderboard::new();
    board
        .bulk_add([Player::new("a", 1200), Player::new("b", 1200), Player::new("c", 1500).with_record(2, 0)])
        .unwrap();

    let json = serde_json::to_string(&board.iter().collect::<Vec<_>>()).unwrap();
    let roster: Vec<Player> = serde_json::from_str(&json).unwrap();

    let mut reloaded = Leaderboard::new();
    reloaded.bulk_add(roster).unwrap();

    assert_eq!(reloaded.top_n(3), board.top_n(3));
    assert_eq!(reloaded.get("c").map(Player::wins), Some(2));
}
