//! REST client for the fantasy backend.
//!
//! DESIGN
//! ======
//! `ApiClient` is the only component that performs network I/O. Every
//! request goes through `request` (URL + headers) and `execute` (status
//! check + decode), so bearer authorization and error normalization have
//! exactly one implementation.
//!
//! ERROR HANDLING
//! ==============
//! Any failure reaches the caller as an [`ApiError`] whose `Display` is a
//! single human-readable `detail` string. Non-success responses are read
//! as `{ "detail": ... }`; see [`normalize_error`] for the fallbacks.
//! Nothing is retried, cached or deduplicated.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{
    AddPlayerRequest, AuthResponse, AvailablePlayers, AvailablePlayersQuery, CreateTeamRequest, Credentials,
    DEFAULT_PLAYER_SCORES_LIMIT, FantasyTeam, LeaderboardEntry, League, LeagueListBody, MessageResponse, Player,
    PlayerGameScore, PlayerListResponse, PlayerQuery, RegisterResponse, Roster, ScoreRange, TeamDayScore, TeamScore,
    User,
};
use crate::config::ClientConfig;
use crate::storage::{StorageError, TokenStore};

// =============================================================================
// ERROR
// =============================================================================

/// Failure of any API call. `Display` yields the `detail` string.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("{detail}")]
    Status { status: u16, detail: String },

    /// The request never produced a response (connection refused, timeout).
    #[error("{0}")]
    Transport(String),

    /// A success response body did not match the expected shape.
    #[error("{0}")]
    Decode(String),

    /// The token slot could not be written or cleared.
    #[error("{0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// The one message surfaced to users.
    #[must_use]
    pub fn detail(&self) -> String {
        self.to_string()
    }

    /// HTTP status, when the backend answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the backend rejected the credential itself.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Turn a failed response into a single `detail` string.
///
/// - `{ "detail": "text" }` yields `text` unchanged
/// - a non-string `detail` (validation arrays, objects) is rendered as JSON
/// - JSON without `detail` yields `HTTP Error: <status>`
/// - a body that is not JSON yields `HTTP Error: <status> <reason>`
#[must_use]
pub fn normalize_error(status: u16, reason: Option<&str>, body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return match reason {
            Some(reason) if !reason.is_empty() => format!("HTTP Error: {status} {reason}"),
            _ => format!("HTTP Error: {status}"),
        };
    };

    match value.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Null) | None => format!("HTTP Error: {status}"),
        Some(other) => other.to_string(),
    }
}

fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    // Bodiless acknowledgements decode as an empty object.
    let text = if text.trim().is_empty() { "{}" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(format!("malformed response: {e}")))
}

// =============================================================================
// CLIENT
// =============================================================================

/// Typed wrapper over the backend REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    root: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Build a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Transport(format!("http client build failed: {e}")))?;
        Ok(Self { http, root: config.api_root(), tokens })
    }

    /// Versioned API root this client targets.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    #[must_use]
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.tokens.load().is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.root)
    }

    /// Start a request with the JSON content type and, when a token is
    /// persisted, the bearer header. The token is read per request.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .http
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json");
        match self.tokens.load() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("response read failed: {e}")))?;

        if !status.is_success() {
            let detail = normalize_error(status.as_u16(), status.canonical_reason(), &text);
            tracing::debug!(status = status.as_u16(), %detail, "api request rejected");
            return Err(ApiError::Status { status: status.as_u16(), detail });
        }

        decode_body(&text)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(Method::GET, path)).await
    }

    fn persist_token(&self, auth: &AuthResponse) -> Result<(), ApiError> {
        self.tokens.save(&auth.access_token)?;
        Ok(())
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// `POST /auth/connexion`. Persists the returned token.
    ///
    /// # Errors
    ///
    /// Returns the backend's `detail` on rejection, or a transport error.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let auth: AuthResponse = self
            .execute(self.request(Method::POST, "/auth/connexion").json(credentials))
            .await?;
        self.persist_token(&auth)?;
        tracing::info!(username = %credentials.username, "logged in");
        Ok(auth)
    }

    /// `POST /auth/inscription`. Persists the returned token. When the
    /// backend answers with the created account instead of a token, logs in
    /// with the same credentials to obtain one.
    ///
    /// # Errors
    ///
    /// Returns the backend's `detail` on rejection, or a transport error.
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let body: RegisterResponse = self
            .execute(self.request(Method::POST, "/auth/inscription").json(credentials))
            .await?;
        match body {
            RegisterResponse::Token(auth) => {
                self.persist_token(&auth)?;
                tracing::info!(username = %credentials.username, "registered");
                Ok(auth)
            }
            RegisterResponse::Account(user) => {
                tracing::info!(user_id = user.id, "registered; exchanging credentials for a token");
                self.login(credentials).await
            }
        }
    }

    /// `GET /utilisateurs/me`.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get("/utilisateurs/me").await
    }

    // =========================================================================
    // PLAYERS
    // =========================================================================

    /// `GET /players` with optional position/team/search filters.
    pub async fn list_players(&self, query: &PlayerQuery) -> Result<PlayerListResponse, ApiError> {
        self.execute(self.request(Method::GET, "/players").query(query)).await
    }

    /// `GET /players/{id}`.
    pub async fn player(&self, player_id: i64) -> Result<Player, ApiError> {
        self.get(&format!("/players/{player_id}")).await
    }

    /// `GET /players/{id}/scores`, most recent games first. `limit`
    /// defaults to 10.
    pub async fn player_scores(&self, player_id: i64, limit: Option<u32>) -> Result<Vec<PlayerGameScore>, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_PLAYER_SCORES_LIMIT);
        self.execute(
            self.request(Method::GET, &format!("/players/{player_id}/scores"))
                .query(&[("limit", limit)]),
        )
        .await
    }

    // =========================================================================
    // TEAM
    // =========================================================================

    /// `GET /teams/me`.
    pub async fn my_teams(&self) -> Result<Vec<FantasyTeam>, ApiError> {
        self.get("/teams/me").await
    }

    /// `POST /teams`.
    pub async fn create_team(&self, request: &CreateTeamRequest) -> Result<FantasyTeam, ApiError> {
        self.execute(self.request(Method::POST, "/teams").json(request)).await
    }

    /// `GET /teams/{id}/roster`.
    pub async fn roster(&self, team_id: i64) -> Result<Roster, ApiError> {
        self.get(&format!("/teams/{team_id}/roster")).await
    }

    /// `GET /teams/{id}/available-players`.
    pub async fn available_players(
        &self,
        team_id: i64,
        query: &AvailablePlayersQuery,
    ) -> Result<AvailablePlayers, ApiError> {
        self.execute(
            self.request(Method::GET, &format!("/teams/{team_id}/available-players"))
                .query(query),
        )
        .await
    }

    /// `POST /teams/{id}/roster`.
    pub async fn add_to_roster(&self, team_id: i64, request: &AddPlayerRequest) -> Result<MessageResponse, ApiError> {
        self.execute(
            self.request(Method::POST, &format!("/teams/{team_id}/roster"))
                .json(request),
        )
        .await
    }

    /// `DELETE /teams/{id}/roster/{player_id}`.
    pub async fn remove_from_roster(&self, team_id: i64, player_id: i64) -> Result<MessageResponse, ApiError> {
        self.execute(self.request(Method::DELETE, &format!("/teams/{team_id}/roster/{player_id}")))
            .await
    }

    // =========================================================================
    // SCORES
    // =========================================================================

    /// `GET /scores/team`, optionally bounded by dates (`YYYY-MM-DD`).
    pub async fn team_scores(&self, range: &ScoreRange) -> Result<Vec<TeamScore>, ApiError> {
        self.execute(self.request(Method::GET, "/scores/team").query(range))
            .await
    }

    /// `GET /scores/team/{date}`.
    pub async fn team_score_on(&self, date: &str) -> Result<TeamDayScore, ApiError> {
        self.get(&format!("/scores/team/{date}")).await
    }

    // =========================================================================
    // LEAGUES
    // =========================================================================

    /// `GET /leagues`.
    pub async fn leagues(&self) -> Result<Vec<League>, ApiError> {
        let body: LeagueListBody = self.get("/leagues").await?;
        Ok(body.into_leagues())
    }

    /// `GET /leagues/{id}`.
    pub async fn league(&self, league_id: i64) -> Result<League, ApiError> {
        self.get(&format!("/leagues/{league_id}")).await
    }

    /// `GET /leagues/solo/leaderboard`.
    pub async fn solo_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        self.get("/leagues/solo/leaderboard").await
    }

    /// `GET /leagues/{id}/leaderboard`.
    pub async fn league_leaderboard(&self, league_id: i64) -> Result<Vec<LeaderboardEntry>, ApiError> {
        self.get(&format!("/leagues/{league_id}/leaderboard")).await
    }

    // =========================================================================
    // ADMIN
    // =========================================================================

    /// `GET /utilisateurs`. Admin only.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/utilisateurs").await
    }

    /// `POST /utilisateurs/{id}/promote`. Admin only.
    pub async fn promote_user(&self, user_id: i64) -> Result<MessageResponse, ApiError> {
        self.execute(self.request(Method::POST, &format!("/utilisateurs/{user_id}/promote")))
            .await
    }

    /// `POST /utilisateurs/{id}/demote`. Admin only.
    pub async fn demote_user(&self, user_id: i64) -> Result<MessageResponse, ApiError> {
        self.execute(self.request(Method::POST, &format!("/utilisateurs/{user_id}/demote")))
            .await
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
