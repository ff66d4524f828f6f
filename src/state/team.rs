//! "My team" screen: the signed-in user's fantasy team and its roster.
//!
//! DESIGN
//! ======
//! A user has at most one team in practice; the first team returned by
//! `GET /teams/me` is the one shown. Every roster mutation is followed by a
//! roster refetch, and the team's `salary_cap_used` is patched from the
//! fresh roster so the two never disagree.
//!
//! REPLACE FLOW
//! ============
//! Placing a player into an occupied slot is two calls: remove the current
//! occupant, then add the newcomer. If the remove fails the add is never
//! sent and the local roster is left untouched.

use super::ViewError;
use super::forms::validate_team_name;
use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{AddPlayerRequest, CreateTeamRequest, FantasyTeam, Player, Roster, RosterSlot, SOLO_LEAGUE_ID};

#[derive(Debug, Default)]
pub struct TeamView {
    team: Option<FantasyTeam>,
    roster: Option<Roster>,
}

impl TeamView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the first of the user's teams and its roster. Having no team is
    /// not an error; the view just stays empty.
    ///
    /// # Errors
    ///
    /// Returns the API error if either request fails.
    pub async fn load(&mut self, api: &ApiClient) -> Result<(), ViewError> {
        let teams = api.my_teams().await?;
        let Some(team) = teams.into_iter().next() else {
            tracing::debug!("user has no team");
            self.team = None;
            self.roster = None;
            return Ok(());
        };

        let team_id = team.id;
        self.team = Some(team);
        self.refresh_roster(api, team_id).await?;
        Ok(())
    }

    /// Create a team in the solo league and load its (empty) roster.
    ///
    /// # Errors
    ///
    /// [`ViewError::Invalid`] when the name is too short; nothing is sent.
    pub async fn create_team(&mut self, api: &ApiClient, name: &str) -> Result<&FantasyTeam, ViewError> {
        let name = name.trim();
        validate_team_name(name)?;

        let request = CreateTeamRequest { name: name.to_owned(), league_id: SOLO_LEAGUE_ID };
        let team = api.create_team(&request).await?;
        tracing::info!(team_id = team.id, name = %team.name, "team created");

        let team_id = team.id;
        self.team = Some(team);
        self.refresh_roster(api, team_id).await?;
        self.team.as_ref().ok_or(ViewError::NoTeam)
    }

    /// Release a player from the roster.
    ///
    /// # Errors
    ///
    /// [`ViewError::NoTeam`] before a team is loaded, else the API error.
    pub async fn remove_player(&mut self, api: &ApiClient, player_id: i64) -> Result<(), ViewError> {
        let team_id = self.team_id()?;
        api.remove_from_roster(team_id, player_id).await?;
        tracing::info!(team_id, player_id, "player removed");
        self.refresh_roster(api, team_id).await?;
        Ok(())
    }

    /// Put `player_id` into `slot`, releasing `replacing` first when the slot
    /// is occupied.
    ///
    /// # Errors
    ///
    /// A failed remove is returned as-is and the add is skipped. A failed add
    /// is returned after the roster has been refetched, since the remove
    /// already changed it on the server; the add error wins even when that
    /// refetch fails too.
    pub async fn place_player(
        &mut self,
        api: &ApiClient,
        slot: RosterSlot,
        player_id: i64,
        replacing: Option<i64>,
    ) -> Result<(), ViewError> {
        let team_id = self.team_id()?;

        if let Some(old_id) = replacing {
            api.remove_from_roster(team_id, old_id).await?;
            tracing::debug!(team_id, old_id, %slot, "slot vacated for replacement");
        }

        let request = AddPlayerRequest { player_id, position_slot: slot };
        if let Err(e) = api.add_to_roster(team_id, &request).await {
            if replacing.is_some() {
                if let Err(refresh) = self.refresh_roster(api, team_id).await {
                    tracing::warn!(team_id, detail = %refresh, "roster refetch after failed add failed");
                }
            }
            return Err(e.into());
        }

        tracing::info!(team_id, player_id, %slot, "player placed");
        self.refresh_roster(api, team_id).await?;
        Ok(())
    }

    async fn refresh_roster(&mut self, api: &ApiClient, team_id: i64) -> Result<(), ApiError> {
        let roster = api.roster(team_id).await?;
        if let Some(team) = self.team.as_mut() {
            team.salary_cap_used = roster.salary_cap_used;
        }
        self.roster = Some(roster);
        Ok(())
    }

    fn team_id(&self) -> Result<i64, ViewError> {
        self.team.as_ref().map(|t| t.id).ok_or(ViewError::NoTeam)
    }

    #[must_use]
    pub fn team(&self) -> Option<&FantasyTeam> {
        self.team.as_ref()
    }

    #[must_use]
    pub fn roster(&self) -> Option<&Roster> {
        self.roster.as_ref()
    }

    /// All six slots in display order with their current occupant.
    #[must_use]
    pub fn slots(&self) -> Vec<(RosterSlot, Option<&Player>)> {
        RosterSlot::ALL
            .into_iter()
            .map(|slot| {
                let player = self
                    .roster
                    .as_ref()
                    .and_then(|r| r.slot(slot))
                    .and_then(|entry| entry.player.as_ref());
                (slot, player)
            })
            .collect()
    }

    /// Player currently in `slot`, if any.
    #[must_use]
    pub fn occupant(&self, slot: RosterSlot) -> Option<&Player> {
        self.roster.as_ref()?.slot(slot)?.player.as_ref()
    }
}

#[cfg(test)]
#[path = "team_test.rs"]
mod tests;
