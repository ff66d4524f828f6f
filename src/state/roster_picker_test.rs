use serde_json::{Value, json};

use super::*;
use crate::testing::{MockBackend, player_json, player_read_json, roster_json, team_json};

fn available(player: Value, affordable: bool) -> Value {
    json!({ "player": player, "is_affordable": affordable, "has_cooldown": false })
}

async fn team_with_sf(backend: &MockBackend) -> (ApiClient, TeamView) {
    backend.on("GET", "/teams/me", 200, json!([team_json(4, "Dunkers", 15.0)]));
    backend.on(
        "GET",
        "/teams/4/roster",
        200,
        roster_json(&[("SF", Some(player_json(23, "LeBron James", "SF", "LAL", 15.0, None)))], 15.0),
    );
    backend.on(
        "GET",
        "/teams/4/available-players",
        200,
        json!({
            "players": [
                available(player_json(1, "Jayson Tatum", "SF", "BOS", 14.0, None), true),
                available(player_json(2, "Jaylen Brown", "SG", "BOS", 11.0, None), true),
                available(player_json(3, "Kevin Durant", "SF", "PHX", 16.0, None), false),
            ],
            "total": 3,
            "salary_cap_remaining": 85.0
        }),
    );
    let (api, _) = backend.authed_client("t");
    let mut team = TeamView::new();
    team.load(&api).await.unwrap();
    (api, team)
}

#[test]
fn open_requires_a_team() {
    let team = TeamView::new();
    assert!(matches!(RosterPicker::open(&team, RosterSlot::Center), Err(ViewError::NoTeam)));
}

#[tokio::test]
async fn open_tracks_current_occupant_and_slot_position() {
    let backend = MockBackend::start().await;
    let (_, team) = team_with_sf(&backend).await;

    let sf = RosterPicker::open(&team, RosterSlot::SmallForward).unwrap();
    assert_eq!(sf.replacing(), Some(23));

    let util = RosterPicker::open(&team, RosterSlot::Utility).unwrap();
    assert_eq!(util.replacing(), None);
}

#[tokio::test]
async fn load_requests_one_hundred_players() {
    let backend = MockBackend::start().await;
    let (api, team) = team_with_sf(&backend).await;
    let mut picker = RosterPicker::open(&team, RosterSlot::Utility).unwrap();

    picker.load(&api).await.unwrap();

    let request = backend.requests().pop().unwrap();
    assert_eq!(request.path, "/teams/4/available-players");
    assert_eq!(request.query.as_deref(), Some("limit=100"));
    assert_eq!(picker.visible().len(), 3);
    assert!((picker.salary_cap_remaining() - 85.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn visible_applies_position_and_search_locally() {
    let backend = MockBackend::start().await;
    let (api, team) = team_with_sf(&backend).await;
    let mut picker = RosterPicker::open(&team, RosterSlot::SmallForward).unwrap();
    picker.load(&api).await.unwrap();
    let fetches = backend.requests().len();

    let ids: Vec<i64> = picker.visible().iter().map(|a| a.player.id).collect();
    assert_eq!(ids, vec![1, 3]);

    picker.set_search("DURANT");
    let ids: Vec<i64> = picker.visible().iter().map(|a| a.player.id).collect();
    assert_eq!(ids, vec![3]);

    picker.set_search("jay");
    picker.set_position(None);
    let ids: Vec<i64> = picker.visible().iter().map(|a| a.player.id).collect();
    assert_eq!(ids, vec![1, 2]);

    assert_eq!(backend.requests().len(), fetches);
}

#[tokio::test]
async fn choose_replaces_current_occupant() {
    let backend = MockBackend::start().await;
    let (api, mut team) = team_with_sf(&backend).await;
    backend.on("DELETE", "/teams/4/roster/23", 200, json!({ "message": "removed" }));
    backend.on("POST", "/teams/4/roster", 200, json!({ "message": "added" }));
    let picker = RosterPicker::open(&team, RosterSlot::SmallForward).unwrap();

    picker.choose(&api, &mut team, 1).await.unwrap();

    let calls = backend.calls();
    assert_eq!(
        &calls[2..],
        ["DELETE /teams/4/roster/23", "POST /teams/4/roster", "GET /teams/4/roster"]
    );
    let add = backend.requests().into_iter().find(|r| r.method == "POST").unwrap();
    assert_eq!(add.json(), json!({ "player_id": 1, "position_slot": "SF" }));
}

#[tokio::test]
async fn slot_position_filter_matches_players_api_shape() {
    let backend = MockBackend::start().await;
    let (api, team) = team_with_sf(&backend).await;
    backend.on(
        "GET",
        "/teams/4/available-players",
        200,
        json!({
            "players": [
                available(player_read_json(1, "Jayson", "Tatum", "SF", "BOS", 14.0), true),
                available(player_read_json(2, "Jaylen", "Brown", "SG", "BOS", 11.0), true),
            ],
            "total": 2,
            "salary_cap_remaining": 85.0
        }),
    );
    let mut picker = RosterPicker::open(&team, RosterSlot::SmallForward).unwrap();

    picker.load(&api).await.unwrap();

    let ids: Vec<i64> = picker.visible().iter().map(|a| a.player.id).collect();
    assert_eq!(ids, vec![1]);
}
