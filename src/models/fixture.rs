use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single match of a competition season.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    pub match_id: i64,

    pub match_date: NaiveDateTime,

    pub kick_off: Option<NaiveTime>,

    pub competition: Option<String>,

    pub season: Option<String>,

    pub home_team: Option<String>,

    pub away_team: Option<String>,

    pub home_score: i64,

    pub away_score: i64,

    /// "Unknown" when the source leaves it blank.
    pub match_status: String,

    pub match_week: Option<i64>,

    pub competition_stage: Option<String>,

    pub stadium: Option<String>,

    pub referee: Option<String>,

    #[serde(default)]
    pub home_managers: Option<String>,

    #[serde(default)]
    pub away_managers: Option<String>,

    #[serde(default)]
    pub last_updated: Option<NaiveDateTime>,
}
