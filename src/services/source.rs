//! Seam between the stats service and the upstream statistics provider.
//!
//! Implementations return raw tabular [`Row`]s. All typing and validation happens
//! on the service side, so a fake source only has to produce rows.

use crate::models::{Cell, CompetitionFilter, Row};
use thiserror::Error;

/// Errors raised while fetching or decoding upstream data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("Upstream returned {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed upstream data: {0}")]
    Decode(String),

    #[error("No competition found for {0}")]
    CompetitionNotFound(CompetitionFilter),

    #[error("Background task failed: {0}")]
    Task(String),
}

/// Event families that can be queried across a whole competition season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Shot,
    Pass,
}

impl EventKind {
    /// Value of the `type` column for this family.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Shot => "Shot",
            Self::Pass => "Pass",
        }
    }

    /// Name of the split table holding this family.
    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Shot => "shots",
            Self::Pass => "passes",
        }
    }
}

/// A team's lineup for one match.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamLineup {
    pub team_name: String,
    pub players: Vec<Row>,
}

/// Match ids of `matches`, in row order.
///
/// # Errors
///
/// Returns [`SourceError::Decode`] when a row has no integer `match_id`.
pub fn match_ids(matches: &[Row]) -> Result<Vec<i64>, SourceError> {
    matches
        .iter()
        .map(|row| {
            row.get("match_id")
                .and_then(Cell::as_i64)
                .ok_or_else(|| SourceError::Decode("match row without match_id".into()))
        })
        .collect()
}

#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    async fn competitions(&self) -> Result<Vec<Row>, SourceError>;

    async fn matches(&self, competition_id: i64, season_id: i64) -> Result<Vec<Row>, SourceError>;

    /// Lineups for both teams, in the order the source lists them.
    async fn lineups(&self, match_id: i64) -> Result<Vec<TeamLineup>, SourceError>;

    async fn events(&self, match_id: i64) -> Result<Vec<Row>, SourceError>;

    /// Every event of `kind` over all matches of the competition season named
    /// by `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::CompetitionNotFound`] when no competition season
    /// matches the filter.
    async fn competition_events(
        &self,
        filter: &CompetitionFilter,
        kind: EventKind,
    ) -> Result<Vec<Row>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    #[test]
    fn test_match_ids_keep_row_order() {
        let rows = vec![row! { "match_id" => 7i64 }, row! { "match_id" => 3.0f64 }];
        assert_eq!(match_ids(&rows).unwrap(), vec![7, 3]);
        assert!(match_ids(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_match_ids_reject_rows_without_id() {
        let rows = vec![row! { "match_id" => 7i64 }, row! { "home_team" => "Italy" }];
        let err = match_ids(&rows).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
        assert!(err.to_string().contains("match_id"));
    }
}
