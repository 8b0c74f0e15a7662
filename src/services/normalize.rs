//! Per-entity cleanup of loosely typed upstream rows.
//!
//! Optional fields that fail to parse become null. Only a malformed required
//! field (the match date) is reported as an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{Cell, Row};

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Explicit fallback for match dates the ISO parser rejects.
const MATCH_DATE_FALLBACK_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Fallback format as reported to clients when a match date is rejected.
pub const MATCH_DATE_FORMAT_LABEL: &str = "%Y-%m-%dT%H:%M:%S.%f";

const KICK_OFF_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M:%S"];

const COMPETITION_DATE_FIELDS: [&str; 4] = [
    "match_updated",
    "match_available",
    "match_updated_360",
    "match_available_360",
];

pub const UNKNOWN_STATUS: &str = "Unknown";

/// Parses an ISO-8601 date or date-time. Offsets are converted to UTC.
#[must_use]
pub fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for format in [DATETIME_FORMAT, "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[must_use]
pub fn parse_kick_off(cell: &Cell) -> Option<NaiveTime> {
    let value = cell.as_str()?.trim();
    if value.is_empty() {
        return None;
    }

    KICK_OFF_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}

#[must_use]
pub fn parse_match_week(cell: &Cell) -> Option<i64> {
    match cell {
        Cell::Text(s) => s.trim().parse().ok(),
        other => other.as_i64(),
    }
}

fn parse_birth_date(cell: &Cell) -> Option<NaiveDate> {
    let value = cell.as_str()?.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| parse_iso_datetime(value).map(|dt| dt.date()))
}

fn datetime_cell(dt: Option<NaiveDateTime>) -> Cell {
    dt.map(|dt| dt.format(DATETIME_FORMAT).to_string()).into()
}

fn optional_datetime(cell: Option<&Cell>) -> Cell {
    datetime_cell(cell.and_then(Cell::as_str).and_then(parse_iso_datetime))
}

pub fn normalize_competition(mut row: Row) -> Row {
    for field in COMPETITION_DATE_FIELDS {
        let parsed = optional_datetime(row.get(field));
        row.insert(field.to_string(), parsed);
    }
    row
}

/// # Errors
///
/// Returns a message when `match_date` is present but unparsable.
pub fn normalize_match(mut row: Row) -> Result<Row, String> {
    let match_date = match row.get("match_date") {
        Some(Cell::Text(s)) if !s.is_empty() => {
            let parsed = parse_iso_datetime(s)
                .or_else(|| NaiveDateTime::parse_from_str(s, MATCH_DATE_FALLBACK_FORMAT).ok())
                .ok_or_else(|| {
                    format!("time data '{s}' does not match format '{MATCH_DATE_FORMAT_LABEL}'")
                })?;
            datetime_cell(Some(parsed))
        }
        Some(cell) if !cell.is_missing() && cell.as_str().is_none() => {
            return Err(format!("match_date must be a string, got {cell:?}"));
        }
        _ => Cell::Null,
    };
    row.insert("match_date".to_string(), match_date);

    let kick_off = row
        .get("kick_off")
        .and_then(parse_kick_off)
        .map(|t| t.format(TIME_FORMAT).to_string());
    row.insert("kick_off".to_string(), kick_off.into());

    let last_updated = optional_datetime(row.get("last_updated"));
    row.insert("last_updated".to_string(), last_updated);

    let match_week = row.get("match_week").and_then(parse_match_week);
    row.insert("match_week".to_string(), match_week.into());

    let status = match row.get("match_status").and_then(Cell::as_str) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => UNKNOWN_STATUS.to_string(),
    };
    row.insert("match_status".to_string(), status.into());

    Ok(row)
}

pub fn normalize_player(mut row: Row) -> Row {
    let birth_date = row
        .get("birth_date")
        .and_then(parse_birth_date)
        .map(|d| d.format(DATE_FORMAT).to_string());
    row.insert("birth_date".to_string(), birth_date.into());
    row
}
