//! Client for the StatsBomb open-data repository.
//!
//! Documents are plain JSON files served over HTTPS. Decoding and flattening
//! large documents is CPU work, so it runs on the blocking pool.

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::clients::flatten::{flatten_event, flatten_lineup_player, flatten_match};
use crate::config::UpstreamConfig;
use crate::models::{Cell, CompetitionFilter, Row};
use crate::services::source::{DataSource, EventKind, SourceError, TeamLineup, match_ids};

/// HTTP settings for the upstream client, handed to [`OpenDataClient::new`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub user_agent: String,
    pub accept: String,
    pub timeout: Duration,
}

impl From<&UpstreamConfig> for HttpConfig {
    fn from(config: &UpstreamConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
            accept: config.accept.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }
}

#[derive(Clone)]
pub struct OpenDataClient {
    client: Client,
    base_url: String,
    fetch_concurrency: usize,
}

impl OpenDataClient {
    /// # Errors
    ///
    /// Returns an error if the accept header is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(config: HttpConfig, fetch_concurrency: usize) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        let accept = HeaderValue::from_str(&config.accept).map_err(|e| SourceError::Http {
            url: config.base_url.clone(),
            message: format!("invalid accept header: {e}"),
        })?;
        headers.insert(ACCEPT, accept);

        let client = Client::builder()
            .user_agent(config.user_agent)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Http {
                url: config.base_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fetch_concurrency: fetch_concurrency.max(1),
        })
    }

    async fn fetch<T, F>(&self, path: &str, decode: F) -> Result<T, SourceError>
    where
        T: Send + 'static,
        F: FnOnce(Value) -> Result<T, SourceError> + Send + 'static,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "Fetching upstream document");

        let http_error = |e: reqwest::Error| SourceError::Http {
            url: url.clone(),
            message: e.to_string(),
        };

        let response = self.client.get(&url).send().await.map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Upstream request failed");
            return Err(SourceError::Status {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(http_error)?;

        // CPU-intensive: offloaded to blocking thread
        tokio::task::spawn_blocking(move || {
            let value: Value =
                serde_json::from_slice(&body).map_err(|e| SourceError::Decode(e.to_string()))?;
            decode(value)
        })
        .await
        .map_err(|e| SourceError::Task(e.to_string()))?
    }

    async fn find_competition(&self, filter: &CompetitionFilter) -> Result<(i64, i64), SourceError> {
        let competitions = self.competitions().await?;

        competitions
            .iter()
            .find(|row| {
                let text = |column: &str| row.get(column).and_then(Cell::as_str);
                text("country_name") == Some(filter.country.as_str())
                    && text("competition_name") == Some(filter.division.as_str())
                    && text("season_name") == Some(filter.season.as_str())
                    && text("competition_gender") == Some(filter.gender.as_str())
            })
            .and_then(|row| {
                let competition_id = row.get("competition_id").and_then(Cell::as_i64)?;
                let season_id = row.get("season_id").and_then(Cell::as_i64)?;
                Some((competition_id, season_id))
            })
            .ok_or_else(|| SourceError::CompetitionNotFound(filter.clone()))
    }
}

fn into_array(value: Value) -> Result<Vec<Value>, SourceError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(SourceError::Decode(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

fn into_objects(value: Value) -> Result<Vec<serde_json::Map<String, Value>>, SourceError> {
    into_array(value)?
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(map),
            other => Err(SourceError::Decode(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        })
        .collect()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl DataSource for OpenDataClient {
    async fn competitions(&self) -> Result<Vec<Row>, SourceError> {
        self.fetch("competitions.json", |value| {
            Ok(into_array(value)?.into_iter().map(to_row).collect::<Vec<_>>())
        })
        .await
    }

    async fn matches(&self, competition_id: i64, season_id: i64) -> Result<Vec<Row>, SourceError> {
        let path = format!("matches/{competition_id}/{season_id}.json");
        self.fetch(&path, |value| {
            Ok(into_array(value)?.iter().map(flatten_match).collect::<Vec<_>>())
        })
        .await
    }

    async fn lineups(&self, match_id: i64) -> Result<Vec<TeamLineup>, SourceError> {
        let path = format!("lineups/{match_id}.json");
        self.fetch(&path, |value| {
            into_objects(value)?
                .into_iter()
                .map(|mut team| -> Result<TeamLineup, SourceError> {
                    let team_name = team
                        .get("team_name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    let players = into_objects(team.remove("lineup").unwrap_or(Value::Null))?
                        .into_iter()
                        .map(flatten_lineup_player)
                        .collect();
                    Ok(TeamLineup { team_name, players })
                })
                .collect()
        })
        .await
    }

    async fn events(&self, match_id: i64) -> Result<Vec<Row>, SourceError> {
        let path = format!("events/{match_id}.json");
        self.fetch(&path, move |value| {
            Ok(into_objects(value)?
                .into_iter()
                .map(|event| flatten_event(event, match_id))
                .collect::<Vec<_>>())
        })
        .await
    }

    async fn competition_events(
        &self,
        filter: &CompetitionFilter,
        kind: EventKind,
    ) -> Result<Vec<Row>, SourceError> {
        let (competition_id, season_id) = self.find_competition(filter).await?;
        let match_ids = match_ids(&self.matches(competition_id, season_id).await?)?;

        debug!(
            competition_id,
            season_id,
            matches = match_ids.len(),
            table = kind.table_name(),
            "Collecting competition events"
        );

        let per_match: Vec<Vec<Row>> = stream::iter(match_ids)
            .map(|match_id| self.events(match_id))
            .buffered(self.fetch_concurrency)
            .try_collect()
            .await?;

        let type_name = kind.type_name();
        Ok(per_match
            .into_iter()
            .flatten()
            .filter(|row| row.get("type").and_then(Cell::as_str) == Some(type_name))
            .collect())
    }
}

fn to_row(value: Value) -> Row {
    match value {
        Value::Object(fields) => fields.into_iter().map(|(k, v)| (k, Cell::from(v))).collect(),
        _ => Row::new(),
    }
}
