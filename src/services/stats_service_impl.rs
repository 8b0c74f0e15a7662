//! `StatsService` backed by any [`DataSource`].

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::models::row::validate_row;
use crate::models::{Cell, Competition, CompetitionFilter, Event, Match, Player, Row, TopPlayer};
use crate::services::aggregate::{LEADERBOARD_SIZE, is_goal, is_goal_assist, top_players};
use crate::services::normalize::{normalize_competition, normalize_match, normalize_player};
use crate::services::source::{DataSource, EventKind, match_ids};
use crate::services::stats_service::{StatsError, StatsService};

pub struct OpenDataStatsService {
    source: Arc<dyn DataSource>,
    lineup_concurrency: usize,
}

impl OpenDataStatsService {
    /// `lineup_concurrency` bounds the number of lineup requests in flight while
    /// listing players. A value of 1 fetches lineups strictly one at a time.
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>, lineup_concurrency: usize) -> Self {
        Self {
            source,
            lineup_concurrency: lineup_concurrency.max(1),
        }
    }

    async fn leaderboard<F>(
        &self,
        filter: &CompetitionFilter,
        kind: EventKind,
        qualifies: F,
    ) -> Result<Vec<TopPlayer>, StatsError>
    where
        F: Fn(&Row) -> bool,
    {
        let rows = self.source.competition_events(filter, kind).await?;
        debug!(
            table = kind.table_name(),
            rows = rows.len(),
            %filter,
            "Ranking competition events"
        );

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        Ok(top_players(&rows, qualifies, LEADERBOARD_SIZE))
    }
}

fn validate_all<T: serde::de::DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, StatsError> {
    rows.into_iter()
        .map(|row| validate_row(row).map_err(StatsError::from))
        .collect()
}

#[async_trait]
impl StatsService for OpenDataStatsService {
    async fn list_competitions(&self) -> Result<Vec<Competition>, StatsError> {
        let rows = self.source.competitions().await?;
        validate_all(rows.into_iter().map(normalize_competition).collect())
    }

    async fn list_matches(
        &self,
        competition_id: i64,
        season_id: i64,
    ) -> Result<Vec<Match>, StatsError> {
        let rows = self.source.matches(competition_id, season_id).await?;
        let normalized = rows
            .into_iter()
            .map(normalize_match)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StatsError::Validation)?;
        validate_all(normalized)
    }

    async fn top_scorers(&self, filter: &CompetitionFilter) -> Result<Vec<TopPlayer>, StatsError> {
        self.leaderboard(filter, EventKind::Shot, is_goal).await
    }

    async fn top_assists(&self, filter: &CompetitionFilter) -> Result<Vec<TopPlayer>, StatsError> {
        self.leaderboard(filter, EventKind::Pass, is_goal_assist).await
    }

    async fn list_players(
        &self,
        competition_id: i64,
        season_id: i64,
    ) -> Result<Vec<Player>, StatsError> {
        let matches = self.source.matches(competition_id, season_id).await?;
        let match_ids = match_ids(&matches)?;

        let source = &self.source;
        // `buffered` yields in input order, so first-seen stays match order.
        let lineups: Vec<_> = stream::iter(match_ids)
            .map(|match_id| async move { source.lineups(match_id).await })
            .buffered(self.lineup_concurrency)
            .try_collect()
            .await?;

        let mut seen = HashSet::new();
        let mut players = Vec::new();

        for team in lineups.into_iter().flatten() {
            debug!(
                team = %team.team_name,
                players = team.players.len(),
                "Collecting lineup"
            );

            for row in team.players {
                let player_id = row
                    .get("player_id")
                    .and_then(Cell::as_i64)
                    .ok_or_else(|| StatsError::Validation("lineup row without player_id".into()))?;

                if seen.insert(player_id) {
                    players.push(validate_row::<Player>(normalize_player(row))?);
                }
            }
        }

        Ok(players)
    }

    async fn match_events(&self, match_id: i64) -> Result<Vec<Event>, StatsError> {
        let rows = self.source.events(match_id).await?;
        validate_all(rows)
    }
}
