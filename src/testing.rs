//! In-process mock of the fantasy backend for client tests.
//!
//! An Axum router bound to `127.0.0.1:0` answers scripted responses keyed
//! by method + path and records every request it sees, so tests can assert
//! on headers, ordering and bodies without a live server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::config::{API_VERSION_PREFIX, ClientConfig};
use crate::net::api::ApiClient;
use crate::storage::{MemoryTokenStore, TokenStore};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path relative to the versioned API root.
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct Shared {
    routes: HashMap<(String, String), (u16, String)>,
    log: Vec<RecordedRequest>,
}

pub struct MockBackend {
    pub base_url: String,
    shared: Arc<Mutex<Shared>>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let shared = Arc::new(Mutex::new(Shared::default()));
        let app = Router::new().fallback(handle).with_state(shared.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { base_url: format!("http://{addr}"), shared }
    }

    /// Answer `method path` with a JSON body until replaced.
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) {
        self.on_raw(method, path, status, &body.to_string());
    }

    /// Answer `method path` with a verbatim body.
    pub fn on_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        let mut shared = self.shared.lock().unwrap();
        shared
            .routes
            .insert((method.to_uppercase(), path.to_owned()), (status, body.to_owned()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.lock().unwrap().log.clone()
    }

    /// Requests seen so far, rendered as `METHOD /path`.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::with_api_url(&self.base_url)
    }

    pub fn client(&self, tokens: Arc<dyn TokenStore>) -> ApiClient {
        ApiClient::new(&self.config(), tokens).unwrap()
    }

    pub fn anonymous_client(&self) -> (ApiClient, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::new());
        (self.client(store.clone()), store)
    }

    pub fn authed_client(&self, token: &str) -> (ApiClient, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::with_token(token));
        (self.client(store.clone()), store)
    }
}

async fn handle(
    State(shared): State<Arc<Mutex<Shared>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_VERSION_PREFIX)
        .unwrap_or(uri.path())
        .to_owned();
    let header_str = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(ToOwned::to_owned);

    let mut shared = shared.lock().unwrap();
    shared.log.push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(ToOwned::to_owned),
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body,
    });

    let (status, body) = shared
        .routes
        .get(&(method.to_string(), path))
        .cloned()
        .unwrap_or((404, r#"{"detail":"Not Found"}"#.to_owned()));
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

// =============================================================================
// FIXTURES
// =============================================================================

pub fn user_json(id: i64, username: &str, is_admin: bool) -> Value {
    serde_json::json!({
        "id": id,
        "nom_utilisateur": username,
        "date_creation": "2025-10-18T10:30:00Z",
        "is_admin": is_admin
    })
}

pub fn player_json(id: i64, full_name: &str, position: &str, team: &str, cost: f64, avg: Option<f64>) -> Value {
    let mut parts = full_name.splitn(2, ' ');
    let first = parts.next().unwrap_or_default();
    let last = parts.next().unwrap_or_default();
    serde_json::json!({
        "id": id,
        "first_name": first,
        "last_name": last,
        "full_name": full_name,
        "player_position": position,
        "team": team,
        "team_abbreviation": team,
        "fantasy_cost": cost,
        "avg_fantasy_score_last_15": avg,
        "is_injured": false,
        "is_active": true
    })
}

/// Player as the players API serializes it: `position`, the team code in
/// `team`, and no abbreviation field.
pub fn player_read_json(id: i64, first: &str, last: &str, position: &str, team: &str, cost: f64) -> Value {
    serde_json::json!({
        "id": id,
        "external_api_id": 1000 + id,
        "first_name": first,
        "last_name": last,
        "position": position,
        "team": team,
        "fantasy_cost": cost,
        "is_active": true,
        "avg_fantasy_score_last_15": null,
        "games_played_last_20": null,
        "full_name": format!("{first} {last}")
    })
}

pub fn team_json(id: i64, name: &str, salary_cap_used: f64) -> Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "owner_id": 1,
        "league_id": 1,
        "salary_cap_used": salary_cap_used,
        "transfers_this_week": 0,
        "is_roster_complete": 0,
        "date_creation": "2025-10-18T10:30:00Z"
    })
}

pub fn roster_json(entries: &[(&str, Option<Value>)], salary_cap_used: f64) -> Value {
    let roster: Vec<Value> = entries
        .iter()
        .map(|(slot, player)| serde_json::json!({ "position_slot": slot, "player": player }))
        .collect();
    serde_json::json!({
        "roster": roster,
        "salary_cap_used": salary_cap_used,
        "salary_cap_remaining": 100.0 - salary_cap_used,
        "roster_status": "incomplete",
        "is_roster_complete": false,
        "transfers_this_week": 0
    })
}
