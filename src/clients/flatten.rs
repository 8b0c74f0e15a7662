//! Turns the nested open-data JSON documents into flat rows.

use serde_json::{Map, Value};

use crate::models::{Cell, Row};

/// Columns kept as nested records instead of being flattened.
const NESTED_COLUMNS: [&str; 1] = ["tactics"];

fn is_named_reference(fields: &Map<String, Value>) -> bool {
    fields.get("name").is_some_and(Value::is_string)
}

fn flatten_into(row: &mut Row, prefix: &str, fields: Map<String, Value>) {
    for (key, value) in fields {
        let column = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}_{key}")
        };

        match value {
            Value::Object(inner) if NESTED_COLUMNS.contains(&column.as_str()) => {
                row.insert(column, Cell::from(Value::Object(inner)));
            }
            Value::Object(mut inner) if is_named_reference(&inner) => {
                if let Some(id) = inner.remove("id") {
                    row.insert(format!("{column}_id"), Cell::from(id));
                }
                let name = inner.remove("name").unwrap_or(Value::Null);
                row.insert(column, Cell::from(name));
            }
            Value::Object(inner) => flatten_into(row, &column, inner),
            other => {
                row.insert(column, Cell::from(other));
            }
        }
    }
}

/// Flattens one event. `{id, name}` references become `<col>` and `<col>_id`,
/// type-specific objects are prefixed (`pass.outcome` becomes `pass_outcome`).
#[must_use]
pub fn flatten_event(event: Map<String, Value>, match_id: i64) -> Row {
    let mut row = Row::new();
    flatten_into(&mut row, "", event);
    row.insert("match_id".to_string(), Cell::Int(match_id));
    row
}

/// Flattens a lineup entry; `country` becomes the country name.
#[must_use]
pub fn flatten_lineup_player(player: Map<String, Value>) -> Row {
    let mut row = Row::new();
    for (key, value) in player {
        match value {
            Value::Object(mut inner) if is_named_reference(&inner) => {
                if let Some(id) = inner.remove("id") {
                    row.insert(format!("{key}_id"), Cell::from(id));
                }
                row.insert(key, Cell::from(inner.remove("name").unwrap_or(Value::Null)));
            }
            other => {
                row.insert(key, Cell::from(other));
            }
        }
    }
    row
}

fn field<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(*key))
}

fn text_field(value: &Value, path: &[&str]) -> Cell {
    field(value, path)
        .and_then(Value::as_str)
        .map_or(Cell::Null, Cell::from)
}

fn manager_names(value: &Value, team: &str) -> Cell {
    let names: Vec<&str> = field(value, &[team, "managers"])
        .and_then(Value::as_array)
        .map(|managers| {
            managers
                .iter()
                .filter_map(|m| m.get("name").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if names.is_empty() {
        Cell::Null
    } else {
        Cell::from(names.join(", "))
    }
}

/// Flattens one match into the column layout the match endpoints expect.
#[must_use]
pub fn flatten_match(value: &Value) -> Row {
    let mut row = Row::new();

    for column in [
        "match_id",
        "match_date",
        "kick_off",
        "home_score",
        "away_score",
        "match_status",
        "match_status_360",
        "last_updated",
        "last_updated_360",
        "match_week",
    ] {
        let cell = value.get(column).cloned().map_or(Cell::Null, Cell::from);
        row.insert(column.to_string(), cell);
    }

    let competition = match (
        field(value, &["competition", "country_name"]).and_then(Value::as_str),
        field(value, &["competition", "competition_name"]).and_then(Value::as_str),
    ) {
        (Some(country), Some(name)) => Cell::from(format!("{country} - {name}")),
        (None, Some(name)) => Cell::from(name),
        _ => Cell::Null,
    };
    row.insert("competition".to_string(), competition);

    row.insert(
        "season".to_string(),
        text_field(value, &["season", "season_name"]),
    );
    row.insert(
        "home_team".to_string(),
        text_field(value, &["home_team", "home_team_name"]),
    );
    row.insert(
        "away_team".to_string(),
        text_field(value, &["away_team", "away_team_name"]),
    );
    row.insert("home_managers".to_string(), manager_names(value, "home_team"));
    row.insert("away_managers".to_string(), manager_names(value, "away_team"));
    row.insert(
        "competition_stage".to_string(),
        text_field(value, &["competition_stage", "name"]),
    );
    row.insert("stadium".to_string(), text_field(value, &["stadium", "name"]));
    row.insert("referee".to_string(), text_field(value, &["referee", "name"]));

    row
}
