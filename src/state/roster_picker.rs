//! Player picker for one roster slot.
//!
//! Opened from a [`TeamView`] for a given slot. The available-player pool is
//! fetched once (up to [`PICKER_LIMIT`] entries) and narrowed locally as the
//! user types. Choosing a player runs the team's add or replace flow.

use super::ViewError;
use super::team::TeamView;
use crate::net::api::ApiClient;
use crate::net::types::{AvailablePlayer, AvailablePlayersQuery, RosterSlot};

pub const PICKER_LIMIT: u32 = 100;

#[derive(Debug)]
pub struct RosterPicker {
    team_id: i64,
    slot: RosterSlot,
    replacing: Option<i64>,
    available: Vec<AvailablePlayer>,
    salary_cap_remaining: f64,
    search: String,
    position: Option<String>,
}

impl RosterPicker {
    /// Picker for `slot` of the loaded team. The position filter starts at
    /// the slot's position; UTIL starts unfiltered.
    ///
    /// # Errors
    ///
    /// [`ViewError::NoTeam`] when the team view is empty.
    pub fn open(team: &TeamView, slot: RosterSlot) -> Result<Self, ViewError> {
        let team_id = team.team().map(|t| t.id).ok_or(ViewError::NoTeam)?;
        Ok(Self {
            team_id,
            slot,
            replacing: team.occupant(slot).map(|p| p.id),
            available: Vec::new(),
            salary_cap_remaining: team.roster().map_or(0.0, |r| r.salary_cap_remaining),
            search: String::new(),
            position: slot.position().map(str::to_owned),
        })
    }

    /// Fetch the pool of players the team can sign.
    ///
    /// # Errors
    ///
    /// Returns the API error; the previous pool is kept.
    pub async fn load(&mut self, api: &ApiClient) -> Result<(), ViewError> {
        let query = AvailablePlayersQuery { limit: Some(PICKER_LIMIT), ..AvailablePlayersQuery::default() };
        let page = api.available_players(self.team_id, &query).await?;
        tracing::debug!(team_id = self.team_id, slot = %self.slot, count = page.players.len(), "available players loaded");
        self.salary_cap_remaining = page.salary_cap_remaining;
        self.available = page.players;
        Ok(())
    }

    pub fn set_search(&mut self, search: &str) {
        search.clone_into(&mut self.search);
    }

    /// `None` shows every position.
    pub fn set_position(&mut self, position: Option<&str>) {
        self.position = position.map(str::to_owned);
    }

    /// Pool entries passing the search and position filters, in fetch order.
    #[must_use]
    pub fn visible(&self) -> Vec<&AvailablePlayer> {
        self.available
            .iter()
            .filter(|a| {
                self.position
                    .as_deref()
                    .is_none_or(|pos| a.player.player_position.eq_ignore_ascii_case(pos))
            })
            .filter(|a| a.player.matches_search(&self.search))
            .collect()
    }

    #[must_use]
    pub fn slot(&self) -> RosterSlot {
        self.slot
    }

    /// Player being swapped out, when the slot was occupied.
    #[must_use]
    pub fn replacing(&self) -> Option<i64> {
        self.replacing
    }

    #[must_use]
    pub fn salary_cap_remaining(&self) -> f64 {
        self.salary_cap_remaining
    }

    /// Sign `player_id` into the slot through the team's replace flow.
    ///
    /// # Errors
    ///
    /// See [`TeamView::place_player`].
    pub async fn choose(&self, api: &ApiClient, team: &mut TeamView, player_id: i64) -> Result<(), ViewError> {
        team.place_player(api, self.slot, player_id, self.replacing).await
    }
}

#[cfg(test)]
#[path = "roster_picker_test.rs"]
mod tests;
