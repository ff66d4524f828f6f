use serde_json::json;

use super::*;
use crate::testing::{MockBackend, player_json, player_read_json};

fn player(id: i64, name: &str, position: &str, team: &str, cost: f64, avg: Option<f64>) -> Player {
    serde_json::from_value(player_json(id, name, position, team, cost, avg)).unwrap()
}

fn ids(players: &[Player]) -> Vec<i64> {
    players.iter().map(|p| p.id).collect()
}

fn pool() -> Vec<Player> {
    vec![
        player(1, "LeBron James", "SF", "LAL", 15.0, Some(50.0)),
        player(2, "Bronny James", "SG", "LAL", 2.0, Some(5.0)),
        player(3, "James Harden", "PG", "LAC", 12.0, Some(40.0)),
        player(4, "Rui Hachimura", "SF", "LAL", 6.0, None),
        player(5, "Jayson Tatum", "SF", "BOS", 14.0, Some(45.0)),
        player(6, "Anthony Davis", "C", "LAL", 15.0, Some(48.0)),
    ]
}

// =============================================================================
// Filter
// =============================================================================

#[test]
fn filter_is_conjunctive() {
    let filter = PlayerFilter { position: Some("SF".into()), team: Some("LAL".into()), search: "james".into() };
    let matched: Vec<Player> = pool().into_iter().filter(|p| filter.matches(p)).collect();
    assert_eq!(ids(&matched), vec![1]);
}

#[test]
fn empty_filter_matches_everything() {
    let filter = PlayerFilter::default();
    assert!(pool().iter().all(|p| filter.matches(p)));
}

#[test]
fn filter_to_query_omits_blank_search() {
    let filter = PlayerFilter { position: Some("C".into()), team: None, search: "   ".into() };
    let query = filter.to_query();
    assert_eq!(query.position.as_deref(), Some("C"));
    assert!(query.search.is_none());
    assert_eq!(query.limit, 500);
}

// =============================================================================
// Sort
// =============================================================================

#[test]
fn name_sort_is_ascending_by_display_name() {
    let mut players = pool();
    sort_players(&mut players, SortKey::Name);
    let names: Vec<String> = players.iter().map(Player::display_name).collect();
    assert_eq!(
        names,
        vec!["Anthony Davis", "Bronny James", "James Harden", "Jayson Tatum", "LeBron James", "Rui Hachimura"]
    );
}

#[test]
fn price_desc_is_non_increasing_and_stable() {
    let mut players = pool();
    sort_players(&mut players, SortKey::PriceDesc);
    assert!(players.windows(2).all(|w| w[0].fantasy_cost >= w[1].fantasy_cost));
    // LeBron (1) and Davis (6) tie at 15.0 and keep their original order.
    assert_eq!(ids(&players[..2]), vec![1, 6]);
}

#[test]
fn price_asc_is_non_decreasing() {
    let mut players = pool();
    sort_players(&mut players, SortKey::PriceAsc);
    assert!(players.windows(2).all(|w| w[0].fantasy_cost <= w[1].fantasy_cost));
}

#[test]
fn score_sort_puts_missing_scores_last() {
    let mut players = pool();
    sort_players(&mut players, SortKey::Score);
    assert_eq!(ids(&players), vec![1, 6, 5, 3, 2, 4]);
}

#[test]
fn sort_key_parses_codes() {
    assert_eq!("price_desc".parse::<SortKey>().unwrap(), SortKey::PriceDesc);
    assert_eq!("NAME".parse::<SortKey>().unwrap(), SortKey::Name);
    assert!("cheapest".parse::<SortKey>().is_err());
    assert_eq!(SortKey::default(), SortKey::Name);
}

// =============================================================================
// View
// =============================================================================

#[tokio::test]
async fn refresh_keeps_only_players_matching_all_filters() {
    let backend = MockBackend::start().await;
    // Backend ignores the filters here; the view still enforces them.
    let body: Vec<serde_json::Value> = pool().iter().map(|p| serde_json::to_value(p).unwrap()).collect();
    backend.on("GET", "/players", 200, json!({ "players": body, "total": 6, "skip": 0, "limit": 500 }));
    let (api, _) = backend.anonymous_client();

    let mut view = PlayersView::new();
    let filter = PlayerFilter { position: Some("SF".into()), team: Some("LAL".into()), search: "james".into() };
    view.set_filter(&api, filter).await.unwrap();

    assert_eq!(ids(view.players()), vec![1]);
    assert_eq!(view.total_reported(), 6);
    let query = backend.requests()[0].query.clone().unwrap();
    assert!(query.contains("position=SF") && query.contains("team=LAL") && query.contains("search=james"));
}

#[tokio::test]
async fn refresh_failure_empties_list() {
    let backend = MockBackend::start().await;
    let body: Vec<serde_json::Value> = pool().iter().map(|p| serde_json::to_value(p).unwrap()).collect();
    backend.on("GET", "/players", 200, json!({ "players": body, "total": 6 }));
    let (api, _) = backend.anonymous_client();
    let mut view = PlayersView::new();
    view.refresh(&api).await.unwrap();
    assert_eq!(view.players().len(), 6);

    backend.on("GET", "/players", 500, json!({ "detail": "db down" }));
    let err = view.refresh(&api).await.unwrap_err();

    assert_eq!(err.to_string(), "db down");
    assert!(view.players().is_empty());
}

#[tokio::test]
async fn pagination_over_loaded_players() {
    let backend = MockBackend::start().await;
    let body: Vec<serde_json::Value> = (1..=45)
        .map(|i| player_json(i, &format!("Player {i:02}"), "PG", "NYK", 5.0, Some(10.0)))
        .collect();
    backend.on("GET", "/players", 200, json!({ "players": body, "total": 45 }));
    let (api, _) = backend.anonymous_client();
    let mut view = PlayersView::new();
    view.refresh(&api).await.unwrap();

    let first = view.page();
    assert_eq!(first.number, 1);
    assert_eq!(first.items.len(), 20);
    assert!(!first.has_previous);

    view.next_page();
    view.next_page();
    view.next_page();
    let last = view.page();
    assert_eq!(last.number, 3);
    assert_eq!(last.items.len(), 5);
    assert!(!last.has_next);
    assert_eq!(last.items[0].display_name(), "Player 41");

    view.previous_page();
    assert_eq!(view.page().number, 2);
}

#[tokio::test]
async fn changing_sort_refetches_and_resets_page() {
    let backend = MockBackend::start().await;
    let body: Vec<serde_json::Value> = (1..=30)
        .map(|i| player_json(i, &format!("Player {i:02}"), "C", "MIA", i as f64, None))
        .collect();
    backend.on("GET", "/players", 200, json!({ "players": body, "total": 30 }));
    let (api, _) = backend.anonymous_client();
    let mut view = PlayersView::new();
    view.refresh(&api).await.unwrap();
    view.go_to(2);

    assert_eq!(view.page().number, 2);

    view.set_sort(&api, SortKey::PriceDesc).await.unwrap();

    assert_eq!(view.page().number, 1);
    assert_eq!(view.players()[0].id, 30);
    assert_eq!(backend.requests().len(), 2);
}

#[test]
fn position_counts_follow_display_order() {
    let mut view = PlayersView::new();
    view.players = pool();
    let counts = view.position_counts();
    assert_eq!(counts, vec![("PG", 1), ("SG", 1), ("SF", 3), ("PF", 0), ("C", 1)]);
}

#[tokio::test]
async fn filters_apply_to_players_api_shape() {
    let backend = MockBackend::start().await;
    backend.on(
        "GET",
        "/players",
        200,
        json!({
            "players": [
                player_read_json(23, "LeBron", "James", "SF", "LAL", 15.0),
                player_read_json(3, "Anthony", "Davis", "C", "LAL", 15.0),
                player_read_json(7, "Bronny", "James", "SG", "LAL", 2.0),
            ],
            "total": 3
        }),
    );
    let (api, _) = backend.anonymous_client();
    let mut view = PlayersView::new();

    view.refresh(&api).await.unwrap();
    assert_eq!(view.position_counts(), vec![("PG", 0), ("SG", 1), ("SF", 1), ("PF", 0), ("C", 1)]);

    let filter = PlayerFilter { position: Some("SF".into()), team: Some("LAL".into()), search: "james".into() };
    view.set_filter(&api, filter).await.unwrap();
    assert_eq!(ids(view.players()), vec![23]);
}

#[tokio::test]
async fn preset_view_fetches_once() {
    let backend = MockBackend::start().await;
    let body: Vec<serde_json::Value> = pool().iter().map(|p| serde_json::to_value(p).unwrap()).collect();
    backend.on("GET", "/players", 200, json!({ "players": body, "total": 6 }));
    let (api, _) = backend.anonymous_client();
    let filter = PlayerFilter { position: None, team: Some("LAL".into()), search: String::new() };

    let mut view = PlayersView::with(filter, SortKey::PriceAsc);
    assert!(view.players().is_empty());
    view.refresh(&api).await.unwrap();

    assert_eq!(backend.requests().len(), 1);
    assert_eq!(ids(view.players()), vec![2, 4, 1, 6]);
    assert_eq!(view.sort(), SortKey::PriceAsc);
}
