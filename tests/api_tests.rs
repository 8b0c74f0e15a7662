use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use matchstats::api::AppState;
use matchstats::config::Config;
use matchstats::models::{Cell, CompetitionFilter, Row};
use matchstats::row;
use matchstats::services::OpenDataStatsService;
use matchstats::services::source::{DataSource, EventKind, SourceError, TeamLineup};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Default, Clone)]
struct FakeSource {
    competitions: Vec<Row>,
    matches: Vec<Row>,
    lineups: HashMap<i64, Vec<TeamLineup>>,
    events: Vec<Row>,
}

#[async_trait::async_trait]
impl DataSource for FakeSource {
    async fn competitions(&self) -> Result<Vec<Row>, SourceError> {
        Ok(self.competitions.clone())
    }

    async fn matches(&self, _: i64, _: i64) -> Result<Vec<Row>, SourceError> {
        Ok(self.matches.clone())
    }

    async fn lineups(&self, match_id: i64) -> Result<Vec<TeamLineup>, SourceError> {
        self.lineups.get(&match_id).cloned().ok_or(SourceError::Status {
            url: format!("lineups/{match_id}.json"),
            status: 404,
        })
    }

    async fn events(&self, _: i64) -> Result<Vec<Row>, SourceError> {
        Ok(self.events.clone())
    }

    async fn competition_events(
        &self,
        filter: &CompetitionFilter,
        kind: EventKind,
    ) -> Result<Vec<Row>, SourceError> {
        if filter.country != "Europe" {
            return Err(SourceError::CompetitionNotFound(filter.clone()));
        }

        Ok(self
            .events
            .iter()
            .filter(|row| row.get("type").and_then(Cell::as_str) == Some(kind.type_name()))
            .cloned()
            .collect())
    }
}

fn spawn_app(source: FakeSource) -> Router {
    let stats = Arc::new(OpenDataStatsService::new(Arc::new(source), 2));
    let state = Arc::new(AppState::new(Config::default(), stats, None));
    matchstats::api::router(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn match_row(match_id: i64, kick_off: Cell, week: Cell, status: &str) -> Row {
    row! {
        "match_id" => match_id,
        "match_date" => "2021-06-11",
        "kick_off" => kick_off,
        "competition" => "Europe - UEFA Euro",
        "season" => "2020",
        "home_team" => "Turkey",
        "away_team" => "Italy",
        "home_score" => 0i64,
        "away_score" => 3i64,
        "match_status" => status,
        "match_week" => week,
        "competition_stage" => "Group Stage",
        "stadium" => f64::NAN,
        "referee" => "Danny Desmond Makkelie",
    }
}

fn shot(player: &str, team: &str, outcome: &str) -> Row {
    row! {
        "type" => "Shot",
        "player" => player,
        "team" => team,
        "shot_outcome" => outcome,
    }
}

#[tokio::test]
async fn test_competitions_with_bad_dates() {
    let source = FakeSource {
        competitions: vec![row! {
            "competition_id" => 55i64,
            "season_id" => 43i64,
            "country_name" => "Europe",
            "competition_name" => "UEFA Euro",
            "competition_gender" => "male",
            "competition_youth" => false,
            "competition_international" => true,
            "season_name" => "2020",
            "match_updated" => "garbage",
            "match_available" => 1.5f64,
            "match_updated_360" => "2024-02-13T01:29:57.911477",
        }],
        ..FakeSource::default()
    };

    let (status, body) = get(spawn_app(source), "/api/competitions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["competition_id"], 55);
    assert!(body[0]["match_updated"].is_null());
    assert!(body[0]["match_available"].is_null());
    assert!(body[0]["match_updated_360"].is_string());
}

#[tokio::test]
async fn test_matches_are_normalized() {
    let source = FakeSource {
        matches: vec![
            match_row(1, Cell::from("15:00:00"), Cell::from("5"), "available"),
            match_row(2, Cell::from("15:00:00.000"), Cell::from(""), ""),
            match_row(3, Cell::from(""), Cell::from("fifth"), "available"),
            match_row(4, Cell::Null, Cell::Int(2), "available"),
        ],
        ..FakeSource::default()
    };

    let (status, body) = get(
        spawn_app(source),
        "/api/matches?competition_id=55&season_id=43",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let matches = body.as_array().unwrap();
    assert_eq!(matches.len(), 4);

    assert_eq!(matches[0]["kick_off"], matches[1]["kick_off"]);
    assert!(matches[0]["kick_off"].is_string());
    assert!(matches[2]["kick_off"].is_null());
    assert!(matches[3]["kick_off"].is_null());

    assert_eq!(matches[0]["match_week"], 5);
    assert!(matches[1]["match_week"].is_null());
    assert!(matches[2]["match_week"].is_null());
    assert_eq!(matches[3]["match_week"], 2);

    assert_eq!(matches[0]["match_status"], "available");
    assert_eq!(matches[1]["match_status"], "Unknown");

    assert!(matches[0]["stadium"].is_null());
    assert_eq!(matches[0]["referee"], "Danny Desmond Makkelie");
}

#[tokio::test]
async fn test_malformed_ids_are_client_errors() {
    let app = spawn_app(FakeSource::default());

    for uri in [
        "/api/matches?competition_id=abc&season_id=43",
        "/api/matches?competition_id=55",
        "/api/players?competition_id=55&season_id=4.3",
        "/api/match_events?match_id=",
        "/api/match_events?match_id=-3",
    ] {
        let (status, body) = get(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["detail"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_unparsable_match_date_is_a_client_error() {
    let mut row = match_row(1, Cell::from("15:00:00"), Cell::from("5"), "available");
    row.insert("match_date".to_string(), Cell::from("11th of June"));
    let source = FakeSource {
        matches: vec![row],
        ..FakeSource::default()
    };

    let (status, body) = get(
        spawn_app(source),
        "/api/matches?competition_id=55&season_id=43",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("11th of June"));
}

#[tokio::test]
async fn test_top_scorers_keeps_five() {
    let mut events = Vec::new();
    for (player, team, goals) in [
        ("Cristiano Ronaldo", "Portugal", 5),
        ("Patrik Schick", "Czech Republic", 4),
        ("Harry Kane", "England", 4),
        ("Romelu Lukaku", "Belgium", 3),
        ("Álvaro Morata", "Spain", 2),
        ("Ciro Immobile", "Italy", 1),
        ("Gareth Bale", "Wales", 1),
    ] {
        for _ in 0..goals {
            events.push(shot(player, team, "Goal"));
        }
        events.push(shot(player, team, "Saved"));
    }
    let source = FakeSource {
        events,
        ..FakeSource::default()
    };

    let (status, body) = get(
        spawn_app(source),
        "/api/top_scorers?country=Europe&division=UEFA%20Euro&season=2020&gender=male",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let top = body.as_array().unwrap();
    assert_eq!(top.len(), 5);
    assert_eq!(top[0]["player"], "Cristiano Ronaldo");
    assert_eq!(top[0]["team"], "Portugal");
    assert_eq!(top[0]["number"], 5);

    let counts: Vec<i64> = top.iter().map(|t| t["number"].as_i64().unwrap()).collect();
    assert_eq!(counts, vec![5, 4, 4, 3, 2]);
}

#[tokio::test]
async fn test_top_scorers_without_goals_is_empty() {
    let source = FakeSource {
        events: vec![
            shot("Harry Kane", "England", "Saved"),
            shot("Harry Kane", "England", "Off T"),
        ],
        ..FakeSource::default()
    };

    let (status, body) = get(
        spawn_app(source),
        "/api/top_scorers?country=Europe&division=UEFA%20Euro&season=2020&gender=male",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_top_assists() {
    let source = FakeSource {
        events: vec![
            row! { "type" => "Pass", "player" => "Luke Shaw", "team" => "England", "pass_goal_assist" => true },
            row! { "type" => "Pass", "player" => "Luke Shaw", "team" => "England", "pass_goal_assist" => true },
            row! { "type" => "Pass", "player" => "Jorginho", "team" => "Italy", "pass_goal_assist" => f64::NAN },
            row! { "type" => "Pass", "player" => "Federico Chiesa", "team" => "Italy", "pass_goal_assist" => true },
            row! { "type" => "Shot", "player" => "Harry Kane", "team" => "England", "shot_outcome" => "Goal" },
        ],
        ..FakeSource::default()
    };
    let app = spawn_app(source);

    let (status, body) = get(
        app.clone(),
        "/api/top_assists?country=Europe&division=UEFA%20Euro&season=2020&gender=male",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!([
            {"player": "Luke Shaw", "team": "England", "number": 2},
            {"player": "Federico Chiesa", "team": "Italy", "number": 1},
        ])
    );

    let (status, body) = get(
        app,
        "/api/top_assists?country=Mars&division=UEFA%20Euro&season=2020&gender=male",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("Error fetching top assists"));
    assert!(detail.contains("country=Mars"));
    assert!(detail.contains("gender=male"));
}

#[tokio::test]
async fn test_leaderboard_requires_all_filters() {
    let (status, _) = get(
        spawn_app(FakeSource::default()),
        "/api/top_scorers?country=Europe&division=UEFA%20Euro",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_players_are_deduplicated() {
    let player = |id: i64, name: &str, jersey: i64| {
        row! {
            "player_id" => id,
            "player_name" => name,
            "player_nickname" => Cell::Null,
            "jersey_number" => jersey,
            "country" => "Italy",
            "player_height" => f64::NAN,
        }
    };
    let source = FakeSource {
        matches: vec![row! { "match_id" => 10i64 }, row! { "match_id" => 20i64 }],
        lineups: HashMap::from([
            (
                10,
                vec![TeamLineup {
                    team_name: "Italy".into(),
                    players: vec![player(1, "Gianluigi Donnarumma", 21), player(2, "Jorginho", 8)],
                }],
            ),
            (
                20,
                vec![TeamLineup {
                    team_name: "Italy".into(),
                    players: vec![player(2, "Jorginho", 99), player(3, "Marco Verratti", 6)],
                }],
            ),
        ]),
        ..FakeSource::default()
    };

    let (status, body) = get(
        spawn_app(source),
        "/api/players?competition_id=55&season_id=43",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let players = body.as_array().unwrap();
    let ids: Vec<i64> = players.iter().map(|p| p["player_id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(players[1]["jersey_number"], 8);
    assert!(players[1]["player_height"].is_null());
}

#[tokio::test]
async fn test_players_fail_on_missing_lineup() {
    let source = FakeSource {
        matches: vec![row! { "match_id" => 10i64 }],
        ..FakeSource::default()
    };

    let (status, body) = get(
        spawn_app(source),
        "/api/players?competition_id=55&season_id=43",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_match_events_replace_nan_with_null() {
    let source = FakeSource {
        events: vec![
            row! {
                "id" => "9f6a2d4e",
                "index" => 1i64,
                "period" => 1i64,
                "timestamp" => "00:00:00.000",
                "minute" => 0i64,
                "second" => 0i64,
                "type" => "Pass",
                "team" => "Italy",
                "player" => "Lorenzo Insigne",
                "location" => Cell::List(vec![Cell::Float(60.0), Cell::Float(40.0)]),
                "pass_length" => f64::NAN,
                "pass_goal_assist" => f64::NAN,
                "under_pressure" => true,
                "match_id" => 3_788_741i64,
            },
            row! {
                "id" => "1b2c3d4e",
                "index" => 2i64,
                "period" => 1i64,
                "timestamp" => "00:00:01.200",
                "minute" => 0i64,
                "second" => 1i64,
                "type" => "Shot",
                "team" => "Italy",
                "player" => f64::NAN,
                "shot_statsbomb_xg" => 0.12f64,
                "shot_outcome" => "Goal",
            },
        ],
        ..FakeSource::default()
    };

    let (status, body) = get(spawn_app(source), "/api/match_events?match_id=3788741").await;
    assert_eq!(status, StatusCode::OK);

    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["type"], "Pass");
    assert_eq!(events[0]["location"], serde_json::json!([60.0, 40.0]));
    assert!(events[0]["pass_length"].is_null());
    assert!(events[0]["pass_goal_assist"].is_null());
    assert_eq!(events[0]["under_pressure"], true);
    assert!(events[1]["player"].is_null());
    assert_eq!(events[1]["shot_outcome"], "Goal");
}

#[tokio::test]
async fn test_invalid_event_row_is_a_client_error() {
    let source = FakeSource {
        events: vec![row! { "id" => "x", "type" => "Pass" }],
        ..FakeSource::default()
    };

    let (status, body) = get(spawn_app(source), "/api/match_events?match_id=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = spawn_app(FakeSource::default());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("Origin", "http://localhost:4200")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert!(
        response
            .headers()
            .get("access-control-allow-credentials")
            .is_none()
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, body) = get(spawn_app(FakeSource::default()), "/api/standings").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("/api/standings"));
}

#[tokio::test]
async fn test_responses_carry_a_request_id() {
    let app = spawn_app(FakeSource::default());

    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let request_id = response.headers().get("x-request-id").unwrap();
    assert_eq!(request_id.to_str().unwrap().len(), 36);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}
