//! Per-match event feed.
//!
//! Events are wide and sparse: the columns that are present depend on the event
//! type. Locations are kept as coordinate arrays (`[x, y]`, or `[x, y, z]` for
//! shot end locations), which is the shape the dashboard plots directly.

use serde::{Deserialize, Serialize};

pub type Location = Vec<f64>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdName {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tactics {
    pub formation: Option<i64>,
    #[serde(default)]
    pub lineup: Vec<TacticsEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TacticsEntry {
    pub jersey_number: Option<i64>,
    pub player: IdName,
    pub position: IdName,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FreezeFrameEntry {
    pub location: Location,
    pub player: Option<IdName>,
    pub position: Option<IdName>,
    pub teammate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: Option<String>,
    pub index: i64,
    pub period: i64,
    pub timestamp: String,
    pub minute: i64,
    pub second: i64,
    #[serde(rename = "type")]
    pub event_type: String,
    pub match_id: Option<i64>,
    pub possession: Option<i64>,
    pub possession_team: Option<String>,
    pub possession_team_id: Option<i64>,
    pub play_pattern: Option<String>,
    pub team: String,
    pub team_id: Option<i64>,
    pub player: Option<String>,
    pub player_id: Option<i64>,
    pub position: Option<String>,
    pub location: Option<Location>,
    pub duration: Option<f64>,
    pub related_events: Option<Vec<String>>,
    pub under_pressure: Option<bool>,
    pub counterpress: Option<bool>,
    pub off_camera: Option<bool>,
    pub out: Option<bool>,
    pub tactics: Option<Tactics>,

    pub ball_receipt_outcome: Option<String>,
    pub ball_recovery_recovery_failure: Option<bool>,
    pub block_deflection: Option<bool>,

    pub carry_end_location: Option<Location>,

    pub clearance_aerial_won: Option<bool>,
    pub clearance_body_part: Option<String>,
    pub clearance_head: Option<bool>,
    pub clearance_left_foot: Option<bool>,
    pub clearance_right_foot: Option<bool>,

    pub dribble_no_touch: Option<bool>,
    pub dribble_outcome: Option<String>,
    pub dribble_overrun: Option<bool>,

    pub duel_outcome: Option<String>,
    pub duel_type: Option<String>,

    pub foul_committed_advantage: Option<bool>,
    pub foul_committed_card: Option<String>,
    pub foul_committed_penalty: Option<bool>,
    pub foul_committed_type: Option<String>,
    pub foul_won_advantage: Option<bool>,
    pub foul_won_defensive: Option<bool>,
    pub foul_won_penalty: Option<bool>,

    pub goalkeeper_body_part: Option<String>,
    pub goalkeeper_end_location: Option<Location>,
    pub goalkeeper_outcome: Option<String>,
    pub goalkeeper_position: Option<String>,
    pub goalkeeper_punched_out: Option<bool>,
    pub goalkeeper_technique: Option<String>,
    pub goalkeeper_type: Option<String>,

    pub interception_outcome: Option<String>,

    pub pass_aerial_won: Option<bool>,
    pub pass_angle: Option<f64>,
    pub pass_assisted_shot_id: Option<String>,
    pub pass_backheel: Option<bool>,
    pub pass_body_part: Option<String>,
    pub pass_cross: Option<bool>,
    pub pass_cut_back: Option<bool>,
    pub pass_deflected: Option<bool>,
    pub pass_end_location: Option<Location>,
    pub pass_goal_assist: Option<bool>,
    pub pass_height: Option<String>,
    pub pass_length: Option<f64>,
    pub pass_miscommunication: Option<bool>,
    pub pass_outcome: Option<String>,
    pub pass_outswinging: Option<bool>,
    pub pass_recipient: Option<String>,
    pub pass_recipient_id: Option<i64>,
    pub pass_shot_assist: Option<bool>,
    pub pass_switch: Option<bool>,
    pub pass_technique: Option<String>,
    pub pass_through_ball: Option<bool>,
    pub pass_type: Option<String>,

    pub shot_aerial_won: Option<bool>,
    pub shot_body_part: Option<String>,
    pub shot_blocked: Option<bool>,
    pub shot_deflected: Option<bool>,
    pub shot_end_location: Option<Location>,
    pub shot_first_time: Option<bool>,
    pub shot_freeze_frame: Option<Vec<FreezeFrameEntry>>,
    pub shot_key_pass_id: Option<String>,
    pub shot_one_on_one: Option<bool>,
    pub shot_outcome: Option<String>,
    pub shot_redirect: Option<bool>,
    pub shot_statsbomb_xg: Option<f64>,
    pub shot_technique: Option<String>,
    pub shot_type: Option<String>,

    pub substitution_outcome: Option<String>,
    pub substitution_replacement: Option<String>,
    pub substitution_replacement_id: Option<i64>,
}
