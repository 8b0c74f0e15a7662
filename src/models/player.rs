use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub player_id: i64,

    pub player_name: String,

    #[serde(default)]
    pub player_nickname: Option<String>,

    #[serde(default)]
    pub birth_date: Option<NaiveDate>,

    #[serde(default)]
    pub player_gender: Option<String>,

    #[serde(default)]
    pub player_height: Option<f64>,

    #[serde(default)]
    pub player_weight: Option<f64>,

    #[serde(default)]
    pub jersey_number: Option<i64>,

    #[serde(default)]
    pub country: Option<String>,
}

/// One entry of a top scorers or top assists leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopPlayer {
    pub player: String,

    pub team: Option<String>,

    pub number: i64,
}
