//! Wire types shared with the fantasy backend.
//!
//! The backend speaks French field names for accounts (`nom_utilisateur`,
//! `mot_de_passe`, `date_creation`); they are renamed here so the rest of
//! the crate reads in one language. Optional and defaulted fields mirror
//! what the backend omits in practice.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// AUTH
// =============================================================================

/// Username + password pair for `/auth/connexion` and `/auth/inscription`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    #[serde(rename = "nom_utilisateur")]
    pub username: String,
    #[serde(rename = "mot_de_passe")]
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: &str, password: &str) -> Self {
        Self { username: username.to_owned(), password: password.to_owned() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// Registration answers with either a token or the created account,
/// depending on backend version.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RegisterResponse {
    Token(AuthResponse),
    Account(User),
}

/// Authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nom_utilisateur")]
    pub username: String,
    #[serde(rename = "date_creation", default)]
    pub created_at: String,
    #[serde(default)]
    pub is_admin: bool,
}

// =============================================================================
// PLAYERS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    #[serde(default)]
    pub external_api_id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    /// One of PG, SG, SF, PF, C. The players API sends it as `position`.
    #[serde(default, alias = "position")]
    pub player_position: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub team_abbreviation: String,
    #[serde(default)]
    pub jersey_number: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    pub fantasy_cost: f64,
    #[serde(default)]
    pub avg_fantasy_score_last_15: Option<f64>,
    #[serde(default)]
    pub games_played_last_20: Option<i64>,
    #[serde(default)]
    pub is_injured: bool,
    #[serde(default)]
    pub injury_status: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Player {
    /// Full display name, falling back to `first last` when the backend
    /// leaves `full_name` empty.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.full_name.trim().is_empty() {
            format!("{} {}", self.first_name, self.last_name).trim().to_owned()
        } else {
            self.full_name.clone()
        }
    }

    /// Case-insensitive name match over first, last and full name.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.first_name.to_lowercase().contains(&needle)
            || self.last_name.to_lowercase().contains(&needle)
            || self.display_name().to_lowercase().contains(&needle)
    }

    /// True when the player belongs to the given NBA team, matched against
    /// either the abbreviation or the full team name.
    #[must_use]
    pub fn plays_for(&self, team: &str) -> bool {
        self.team_abbreviation.eq_ignore_ascii_case(team) || self.team.eq_ignore_ascii_case(team)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerListResponse {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub skip: i64,
    #[serde(default)]
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerGameScore {
    pub id: i64,
    pub player_id: i64,
    pub game_date: String,
    #[serde(default)]
    pub opponent: String,
    #[serde(default)]
    pub minutes_played: f64,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub rebounds: i64,
    #[serde(default)]
    pub assists: i64,
    #[serde(default)]
    pub steals: i64,
    #[serde(default)]
    pub blocks: i64,
    #[serde(default)]
    pub turnovers: i64,
    pub fantasy_score: f64,
}

/// Server-side filters for `GET /players`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub limit: u32,
}

/// Listing limit used when the caller does not choose one.
pub const DEFAULT_PLAYER_LIMIT: u32 = 500;
pub const DEFAULT_PLAYER_SCORES_LIMIT: u32 = 10;

// =============================================================================
// TEAMS & ROSTER
// =============================================================================

/// The six roster labels: five positions plus one flexible slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RosterSlot {
    #[serde(rename = "PG")]
    PointGuard,
    #[serde(rename = "SG")]
    ShootingGuard,
    #[serde(rename = "SF")]
    SmallForward,
    #[serde(rename = "PF")]
    PowerForward,
    #[serde(rename = "C")]
    Center,
    #[serde(rename = "UTIL")]
    Utility,
}

impl RosterSlot {
    pub const ALL: [Self; 6] = [
        Self::PointGuard,
        Self::ShootingGuard,
        Self::SmallForward,
        Self::PowerForward,
        Self::Center,
        Self::Utility,
    ];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::PointGuard => "PG",
            Self::ShootingGuard => "SG",
            Self::SmallForward => "SF",
            Self::PowerForward => "PF",
            Self::Center => "C",
            Self::Utility => "UTIL",
        }
    }

    /// Player position that fits this slot. `None` for the flexible slot.
    #[must_use]
    pub fn position(self) -> Option<&'static str> {
        match self {
            Self::Utility => None,
            other => Some(other.code()),
        }
    }
}

impl fmt::Display for RosterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown roster slot `{0}` (expected PG, SG, SF, PF, C or UTIL)")]
pub struct UnknownSlot(pub String);

impl FromStr for RosterSlot {
    type Err = UnknownSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSlot(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FantasyTeam {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub owner_id: i64,
    #[serde(default)]
    pub league_id: i64,
    #[serde(default)]
    pub salary_cap_used: f64,
    #[serde(default)]
    pub waiver_priority: Option<i64>,
    #[serde(default)]
    pub transfers_this_week: i64,
    /// Stored as 0/1 by some backend versions.
    #[serde(default, deserialize_with = "bool_or_int")]
    pub is_roster_complete: bool,
    #[serde(default)]
    pub total_score: Option<f64>,
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(default)]
    pub date_creation: String,
    #[serde(default)]
    pub last_updated: Option<String>,
}

fn bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub league_id: i64,
}

/// League every new team joins unless the caller picks another.
pub const SOLO_LEAGUE_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub position_slot: RosterSlot,
    #[serde(default)]
    pub player: Option<Player>,
    #[serde(default)]
    pub acquired_salary: Option<f64>,
    #[serde(default)]
    pub date_acquired: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub team_id: Option<i64>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
    #[serde(default)]
    pub salary_cap_used: f64,
    #[serde(default)]
    pub salary_cap_remaining: f64,
    #[serde(default)]
    pub roster_status: String,
    #[serde(default)]
    pub is_roster_complete: bool,
    #[serde(default)]
    pub transfers_this_week: i64,
}

impl Roster {
    /// Entry for a slot, if the backend listed it.
    #[must_use]
    pub fn slot(&self, slot: RosterSlot) -> Option<&RosterEntry> {
        self.roster.iter().find(|entry| entry.position_slot == slot)
    }

    /// Slot currently holding the given player.
    #[must_use]
    pub fn slot_of(&self, player_id: i64) -> Option<RosterSlot> {
        self.roster
            .iter()
            .find(|entry| entry.player.as_ref().is_some_and(|p| p.id == player_id))
            .map(|entry| entry.position_slot)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailablePlayer {
    pub player: Player,
    #[serde(default)]
    pub is_affordable: bool,
    #[serde(default)]
    pub has_cooldown: bool,
    #[serde(default)]
    pub cooldown_ends: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
}

impl AvailablePlayer {
    /// Price to sign the player; the listing cost when given, else the
    /// player's fantasy cost.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.cost.unwrap_or(self.player.fantasy_cost)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailablePlayers {
    #[serde(default)]
    pub players: Vec<AvailablePlayer>,
    #[serde(default, alias = "total_count")]
    pub total: i64,
    #[serde(default)]
    pub salary_cap_remaining: f64,
}

/// Server-side filters for `GET /teams/{id}/available-players`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AvailablePlayersQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_nba: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddPlayerRequest {
    pub player_id: i64,
    pub position_slot: RosterSlot,
}

/// Acknowledgement body. Extra fields the backend sends are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// SCORES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamScore {
    pub fantasy_team_id: i64,
    pub score_date: String,
    pub total_score: f64,
    #[serde(default)]
    pub players_who_played: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDayScore {
    pub player: Player,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDayScore {
    pub team_score: f64,
    #[serde(default)]
    pub players: Vec<PlayerDayScore>,
}

// =============================================================================
// LEAGUES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeagueKind {
    Solo,
    Private,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LeagueKind,
    #[serde(default)]
    pub commissioner_id: Option<i64>,
    #[serde(default)]
    pub max_teams: i64,
    #[serde(default)]
    pub salary_cap: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// `GET /leagues` returns a bare array or a paginated wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum LeagueListBody {
    Bare(Vec<League>),
    Wrapped { leagues: Vec<League> },
}

impl LeagueListBody {
    pub(crate) fn into_leagues(self) -> Vec<League> {
        match self {
            Self::Bare(leagues) | Self::Wrapped { leagues } => leagues,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[serde(other)]
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub team_id: i64,
    pub team_name: String,
    #[serde(default)]
    pub owner_username: String,
    pub total_score: f64,
    #[serde(default)]
    pub last_7_days_score: f64,
    #[serde(default)]
    pub games_played: i64,
    #[serde(default)]
    pub average_score: f64,
    pub trend: Trend,
    pub rank: i64,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
