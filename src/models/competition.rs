use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One season of one competition available from the data source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Competition {
    pub competition_id: i64,

    pub season_id: i64,

    pub country_name: String,

    pub competition_name: String,

    pub competition_gender: String,

    pub competition_youth: bool,

    pub competition_international: bool,

    pub season_name: String,

    pub match_updated: Option<NaiveDateTime>,

    pub match_available: Option<NaiveDateTime>,

    #[serde(default)]
    pub match_updated_360: Option<NaiveDateTime>,

    #[serde(default)]
    pub match_available_360: Option<NaiveDateTime>,
}

/// Identifies a competition season by its display names, as used by the
/// leaderboard endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompetitionFilter {
    pub country: String,
    pub division: String,
    pub season: String,
    pub gender: String,
}

impl std::fmt::Display for CompetitionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "country={}, division={}, season={}, gender={}",
            self.country, self.division, self.season, self.gender
        )
    }
}
