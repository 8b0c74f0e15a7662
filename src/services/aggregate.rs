//! Top-N leaderboards over raw event rows.

use std::collections::BTreeMap;

use crate::models::{Cell, Row, TopPlayer};

pub const LEADERBOARD_SIZE: usize = 5;

/// Row counts as a goal when the shot outcome is "Goal".
#[must_use]
pub fn is_goal(row: &Row) -> bool {
    row.get("shot_outcome").and_then(Cell::as_str) == Some("Goal")
}

/// Row counts as an assist when the pass is flagged as a goal assist.
#[must_use]
pub fn is_goal_assist(row: &Row) -> bool {
    row.get("pass_goal_assist").and_then(Cell::as_bool) == Some(true)
}

fn text(row: &Row, column: &str) -> Option<String> {
    row.get(column)
        .and_then(Cell::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Counts qualifying rows per (player, team) and returns the `limit` highest.
///
/// Rows without a player or team are skipped. Equal counts keep (player, team)
/// ascending order.
#[must_use]
pub fn top_players<F>(rows: &[Row], qualifies: F, limit: usize) -> Vec<TopPlayer>
where
    F: Fn(&Row) -> bool,
{
    let mut counts: BTreeMap<(String, String), i64> = BTreeMap::new();

    for row in rows.iter().filter(|&row| qualifies(row)) {
        let (Some(player), Some(team)) = (text(row, "player"), text(row, "team")) else {
            continue;
        };
        *counts.entry((player, team)).or_default() += 1;
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|((player, team), number)| TopPlayer {
            player,
            team: Some(team),
            number,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    fn shots(scorers: &[(&str, &str, usize)]) -> Vec<Row> {
        let mut rows = Vec::new();
        for (player, team, goals) in scorers {
            for _ in 0..*goals {
                rows.push(row! {
                    "player" => *player,
                    "team" => *team,
                    "shot_outcome" => "Goal",
                });
            }
            rows.push(row! {
                "player" => *player,
                "team" => *team,
                "shot_outcome" => "Saved",
            });
        }
        rows
    }

    #[test]
    fn test_top_five_sorted_descending() {
        let rows = shots(&[
            ("Gini", "A", 1),
            ("Alba", "B", 5),
            ("Costa", "C", 4),
            ("Diaz", "D", 4),
            ("Eto", "E", 3),
            ("Figo", "F", 2),
            ("Hazard", "G", 1),
        ]);

        let top = top_players(&rows, is_goal, LEADERBOARD_SIZE);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].player, "Alba");
        assert_eq!(top[0].number, 5);
        let counts: Vec<i64> = top.iter().map(|t| t.number).collect();
        assert_eq!(counts, vec![5, 4, 4, 3, 2]);
        assert_eq!(top[1].player, "Costa");
        assert_eq!(top[2].player, "Diaz");
    }

    #[test]
    fn test_no_goals_is_empty() {
        let rows = shots(&[("Alba", "B", 0), ("Costa", "C", 0)]);
        assert!(top_players(&rows, is_goal, LEADERBOARD_SIZE).is_empty());
        assert!(top_players(&[], is_goal, LEADERBOARD_SIZE).is_empty());
    }

    #[test]
    fn test_same_player_different_teams_counted_separately() {
        let rows = shots(&[("Alba", "B", 2), ("Alba", "C", 1)]);
        let top = top_players(&rows, is_goal, LEADERBOARD_SIZE);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].team.as_deref(), Some("B"));
    }

    #[test]
    fn test_assists_require_true_flag() {
        let rows = vec![
            row! { "player" => "Xavi", "team" => "Spain", "pass_goal_assist" => true },
            row! { "player" => "Xavi", "team" => "Spain", "pass_goal_assist" => f64::NAN },
            row! { "player" => "Iniesta", "team" => "Spain" },
            row! { "team" => "Spain", "pass_goal_assist" => true },
        ];
        let top = top_players(&rows, is_goal_assist, LEADERBOARD_SIZE);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].number, 1);
    }
}
