use super::ApiError;
use crate::models::CompetitionFilter;

pub fn validate_id(name: &str, id: i64) -> Result<i64, ApiError> {
    if id <= 0 {
        return Err(ApiError::bad_request(format!(
            "Invalid {}: {}. ID must be a positive integer",
            name, id
        )));
    }
    Ok(id)
}

pub fn validate_filter(filter: CompetitionFilter) -> Result<CompetitionFilter, ApiError> {
    let fields = [
        ("country", &filter.country),
        ("division", &filter.division),
        ("season", &filter.season),
        ("gender", &filter.gender),
    ];

    if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ApiError::bad_request(format!("{} cannot be empty", name)));
    }

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("match_id", 1).is_ok());
        assert!(validate_id("match_id", 3_788_741).is_ok());
        assert!(validate_id("match_id", 0).is_err());
        assert!(validate_id("season_id", -1).is_err());
    }

    #[test]
    fn test_validate_filter() {
        let filter = CompetitionFilter {
            country: "Spain".into(),
            division: "La Liga".into(),
            season: "2015/2016".into(),
            gender: "male".into(),
        };
        assert!(validate_filter(filter.clone()).is_ok());

        let blank = CompetitionFilter {
            gender: " ".into(),
            ..filter
        };
        assert!(validate_filter(blank).is_err());
    }
}
