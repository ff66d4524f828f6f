//! Leaderboards: the public solo ranking or one private league's.

use super::ViewError;
use crate::net::api::ApiClient;
use crate::net::types::{LeaderboardEntry, League};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    Solo,
    League(i64),
}

#[derive(Debug)]
pub struct LeaderboardView {
    board: Board,
    league: Option<League>,
    entries: Vec<LeaderboardEntry>,
}

impl LeaderboardView {
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self { board, league: None, entries: Vec::new() }
    }

    /// Fetch the board, ordered by rank. League boards also fetch the
    /// league's details.
    ///
    /// # Errors
    ///
    /// Returns the API error; the previous entries are kept.
    pub async fn load(&mut self, api: &ApiClient) -> Result<(), ViewError> {
        let mut entries = match self.board {
            Board::Solo => api.solo_leaderboard().await?,
            Board::League(league_id) => {
                self.league = Some(api.league(league_id).await?);
                api.league_leaderboard(league_id).await?
            }
        };
        entries.sort_by_key(|e| e.rank);
        tracing::debug!(board = ?self.board, count = entries.len(), "leaderboard loaded");
        self.entries = entries;
        Ok(())
    }

    #[must_use]
    pub fn board(&self) -> Board {
        self.board
    }

    #[must_use]
    pub fn league(&self) -> Option<&League> {
        self.league.as_ref()
    }

    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Entry owned by `username`, if that user has a ranked team.
    #[must_use]
    pub fn entry_for(&self, username: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.owner_username == username)
    }
}

#[cfg(test)]
#[path = "leaderboard_test.rs"]
mod tests;
