//! Domain service behind the read-only stats endpoints.

use crate::models::{Competition, CompetitionFilter, Event, Match, Player, TopPlayer};
use crate::services::source::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("{0}")]
    Upstream(#[from] SourceError),

    #[error("{0}")]
    Validation(String),
}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait StatsService: Send + Sync {
    /// All competition seasons. Unparsable update timestamps are returned as null.
    async fn list_competitions(&self) -> Result<Vec<Competition>, StatsError>;

    async fn list_matches(
        &self,
        competition_id: i64,
        season_id: i64,
    ) -> Result<Vec<Match>, StatsError>;

    /// Top five goal scorers of the competition season.
    ///
    /// An empty list is returned when nobody scored.
    async fn top_scorers(&self, filter: &CompetitionFilter) -> Result<Vec<TopPlayer>, StatsError>;

    /// Top five assist providers of the competition season.
    async fn top_assists(&self, filter: &CompetitionFilter) -> Result<Vec<TopPlayer>, StatsError>;

    /// Every player that appears in a lineup of the competition season.
    ///
    /// Players are deduplicated by id; the first sighting wins and later
    /// sightings are ignored even when their attributes differ.
    async fn list_players(
        &self,
        competition_id: i64,
        season_id: i64,
    ) -> Result<Vec<Player>, StatsError>;

    async fn match_events(&self, match_id: i64) -> Result<Vec<Event>, StatsError>;
}
