use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use super::validation::validate_id;
use crate::api::{ApiError, AppState};
use crate::models::Event;

#[derive(Debug, Deserialize)]
pub struct MatchEventsQuery {
    pub match_id: i64,
}

/// `GET /api/match_events?match_id=`
pub async fn list_match_events(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MatchEventsQuery>, QueryRejection>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let Query(query) = query?;
    let match_id = validate_id("match_id", query.match_id)?;

    let events = state.stats.match_events(match_id).await.map_err(|e| {
        error!(match_id, error = %e, "Error fetching events");
        ApiError::from(e)
    })?;

    Ok(Json(events))
}
