//! Team score history and single-day breakdowns.

use super::ViewError;
use crate::net::api::ApiClient;
use crate::net::types::{PlayerDayScore, ScoreRange, TeamDayScore, TeamScore};

#[derive(Debug, Default)]
pub struct ScoresView {
    history: Vec<TeamScore>,
    day: Option<(String, TeamDayScore)>,
}

impl ScoresView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch daily team totals, newest first.
    ///
    /// # Errors
    ///
    /// Returns the API error; the previous history is kept.
    pub async fn load_history(&mut self, api: &ApiClient, range: &ScoreRange) -> Result<(), ViewError> {
        let mut history = api.team_scores(range).await?;
        history.sort_by(|a, b| b.score_date.cmp(&a.score_date));
        self.history = history;
        Ok(())
    }

    /// Fetch one day's per-player breakdown. `date` is `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns the API error; the previous breakdown is kept.
    pub async fn load_day(&mut self, api: &ApiClient, date: &str) -> Result<(), ViewError> {
        let mut day = api.team_score_on(date).await?;
        day.players.sort_by(|a, b| b.score.total_cmp(&a.score));
        self.day = Some((date.to_owned(), day));
        Ok(())
    }

    #[must_use]
    pub fn history(&self) -> &[TeamScore] {
        &self.history
    }

    /// Sum of the loaded daily totals.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.history.iter().map(|s| s.total_score).sum()
    }

    #[must_use]
    pub fn best_day(&self) -> Option<&TeamScore> {
        self.history.iter().max_by(|a, b| a.total_score.total_cmp(&b.total_score))
    }

    /// Date and breakdown of the last loaded day, best scorer first.
    #[must_use]
    pub fn day(&self) -> Option<(&str, &TeamDayScore)> {
        self.day.as_ref().map(|(date, day)| (date.as_str(), day))
    }

    #[must_use]
    pub fn top_scorer(&self) -> Option<&PlayerDayScore> {
        self.day.as_ref()?.1.players.first()
    }
}

#[cfg(test)]
#[path = "scores_test.rs"]
mod tests;
