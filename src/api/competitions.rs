use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_id;
use crate::api::{ApiError, AppState};
use crate::models::{Competition, Match, Player};

#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    pub competition_id: i64,
    pub season_id: i64,
}

impl SeasonQuery {
    fn validated(self) -> Result<(i64, i64), ApiError> {
        Ok((
            validate_id("competition_id", self.competition_id)?,
            validate_id("season_id", self.season_id)?,
        ))
    }
}

/// `GET /api/competitions`
pub async fn list_competitions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Competition>>, ApiError> {
    let competitions = state.stats.list_competitions().await?;
    Ok(Json(competitions))
}

/// `GET /api/matches?competition_id=&season_id=`
pub async fn list_matches(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SeasonQuery>, QueryRejection>,
) -> Result<Json<Vec<Match>>, ApiError> {
    let Query(query) = query?;
    let (competition_id, season_id) = query.validated()?;

    let matches = state.stats.list_matches(competition_id, season_id).await?;
    Ok(Json(matches))
}

/// `GET /api/players?competition_id=&season_id=`
///
/// Every player listed in a lineup of the season, once per player id.
pub async fn list_players(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SeasonQuery>, QueryRejection>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let Query(query) = query?;
    let (competition_id, season_id) = query.validated()?;

    let players = state.stats.list_players(competition_id, season_id).await?;
    Ok(Json(players))
}
