//! Player browser: filters, sort order and pagination over the NBA pool.
//!
//! Filters are sent to the backend and re-applied locally, so the listed
//! players always satisfy every active filter at once. Sorting happens on
//! the client because the backend only orders by a few columns.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::pagination::{PAGE_SIZE, Page, clamp_page, paginate};
use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{DEFAULT_PLAYER_LIMIT, Player, PlayerQuery};

/// Player positions in display order.
pub const POSITIONS: [&str; 5] = ["PG", "SG", "SF", "PF", "C"];

// =============================================================================
// SORT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Full name, A to Z.
    #[default]
    Name,
    /// Average fantasy score over the last 15 games, best first.
    Score,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Score => "score",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort `{0}` (expected name, score, price_asc or price_desc)")]
pub struct UnknownSort(pub String);

impl FromStr for SortKey {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "score" => Ok(Self::Score),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            _ => Err(UnknownSort(s.to_owned())),
        }
    }
}

/// Stable in-place sort; equal keys keep their relative order.
pub fn sort_players(players: &mut [Player], key: SortKey) {
    match key {
        SortKey::Name => players.sort_by(compare_names),
        SortKey::Score => players.sort_by(|a, b| score(b).total_cmp(&score(a))),
        SortKey::PriceAsc => players.sort_by(|a, b| a.fantasy_cost.total_cmp(&b.fantasy_cost)),
        SortKey::PriceDesc => players.sort_by(|a, b| b.fantasy_cost.total_cmp(&a.fantasy_cost)),
    }
}

fn compare_names(a: &Player, b: &Player) -> Ordering {
    a.display_name()
        .to_lowercase()
        .cmp(&b.display_name().to_lowercase())
}

fn score(player: &Player) -> f64 {
    player.avg_fantasy_score_last_15.unwrap_or(0.0)
}

// =============================================================================
// FILTER
// =============================================================================

/// Conjunctive filter set. `None`/empty means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    pub position: Option<String>,
    pub team: Option<String>,
    pub search: String,
}

impl PlayerFilter {
    #[must_use]
    pub fn matches(&self, player: &Player) -> bool {
        let position_ok = self
            .position
            .as_deref()
            .is_none_or(|pos| player.player_position.eq_ignore_ascii_case(pos));
        let team_ok = self.team.as_deref().is_none_or(|team| player.plays_for(team));
        position_ok && team_ok && player.matches_search(&self.search)
    }

    /// Server-side form of the filter. Blank search is omitted.
    #[must_use]
    pub fn to_query(&self) -> PlayerQuery {
        let search = self.search.trim();
        PlayerQuery {
            position: self.position.clone(),
            team: self.team.clone(),
            search: (!search.is_empty()).then(|| search.to_owned()),
            limit: DEFAULT_PLAYER_LIMIT,
        }
    }
}

// =============================================================================
// VIEW
// =============================================================================

#[derive(Debug, Default)]
pub struct PlayersView {
    filter: PlayerFilter,
    sort: SortKey,
    page: usize,
    players: Vec<Player>,
    total_reported: i64,
}

impl PlayersView {
    #[must_use]
    pub fn new() -> Self {
        Self { page: 1, ..Self::default() }
    }

    /// View with filter and sort preset; nothing is fetched until
    /// [`PlayersView::refresh`].
    #[must_use]
    pub fn with(filter: PlayerFilter, sort: SortKey) -> Self {
        Self { filter, sort, ..Self::new() }
    }

    /// Fetch players for the current filter, then filter, sort and reset to
    /// page 1. On failure the list is emptied.
    ///
    /// # Errors
    ///
    /// Returns the API error after clearing the list.
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        match api.list_players(&self.filter.to_query()).await {
            Ok(resp) => {
                self.total_reported = resp.total;
                self.players = resp.players;
                self.rederive();
                tracing::debug!(count = self.players.len(), total = resp.total, "players loaded");
                Ok(())
            }
            Err(e) => {
                self.players.clear();
                self.total_reported = 0;
                self.page = 1;
                Err(e)
            }
        }
    }

    /// Replace the filter and refetch.
    ///
    /// # Errors
    ///
    /// See [`PlayersView::refresh`].
    pub async fn set_filter(&mut self, api: &ApiClient, filter: PlayerFilter) -> Result<(), ApiError> {
        self.filter = filter;
        self.refresh(api).await
    }

    /// Change the sort order and refetch.
    ///
    /// # Errors
    ///
    /// See [`PlayersView::refresh`].
    pub async fn set_sort(&mut self, api: &ApiClient, sort: SortKey) -> Result<(), ApiError> {
        self.sort = sort;
        self.refresh(api).await
    }

    fn rederive(&mut self) {
        let filter = &self.filter;
        self.players.retain(|p| filter.matches(p));
        sort_players(&mut self.players, self.sort);
        self.page = 1;
    }

    #[must_use]
    pub fn filter(&self) -> &PlayerFilter {
        &self.filter
    }

    #[must_use]
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Every player matching the filter, in sort order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Count the backend reported before local filtering.
    #[must_use]
    pub fn total_reported(&self) -> i64 {
        self.total_reported
    }

    #[must_use]
    pub fn page(&self) -> Page<'_, Player> {
        paginate(&self.players, self.page, PAGE_SIZE)
    }

    pub fn go_to(&mut self, page: usize) {
        self.page = clamp_page(page, self.players.len(), PAGE_SIZE);
    }

    pub fn next_page(&mut self) {
        self.go_to(self.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    /// Listed players per position, in [`POSITIONS`] order.
    #[must_use]
    pub fn position_counts(&self) -> Vec<(&'static str, usize)> {
        POSITIONS
            .iter()
            .map(|pos| (*pos, self.players.iter().filter(|p| p.player_position == *pos).count()))
            .collect()
    }
}

#[cfg(test)]
#[path = "players_test.rs"]
mod tests;
