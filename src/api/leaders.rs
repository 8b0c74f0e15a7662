//! Top scorer and top assist leaderboards.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use super::validation::validate_filter;
use crate::api::{ApiError, AppState};
use crate::models::{CompetitionFilter, TopPlayer};
use crate::services::source::EventKind;

/// `GET /api/top_scorers?country=&division=&season=&gender=`
pub async fn top_scorers(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CompetitionFilter>, QueryRejection>,
) -> Result<Json<Vec<TopPlayer>>, ApiError> {
    let Query(filter) = query?;
    let filter = validate_filter(filter)?;

    let scorers = state.stats.top_scorers(&filter).await?;
    Ok(Json(scorers))
}

/// `GET /api/top_assists?country=&division=&season=&gender=`
///
/// Failures echo the request filters to make upstream mismatches easy to spot.
pub async fn top_assists(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CompetitionFilter>, QueryRejection>,
) -> Result<Json<Vec<TopPlayer>>, ApiError> {
    let Query(filter) = query?;
    let filter = validate_filter(filter)?;

    let assists = state.stats.top_assists(&filter).await.map_err(|e| {
        ApiError::bad_request(format!(
            "Error fetching top assists: {} with filters {}, type={}",
            e,
            filter,
            EventKind::Pass.type_name()
        ))
    })?;
    Ok(Json(assists))
}
