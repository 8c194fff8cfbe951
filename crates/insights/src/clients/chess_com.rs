use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::InsightsConfig;

#[derive(Debug, Error)]
pub enum ChessComError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Deserialize)]
struct ArchivesResponse {
    #[serde(default)]
    archives: Vec<String>,
}

#[derive(Deserialize)]
struct GamesResponse {
    #[serde(default)]
    games: Vec<Value>,
}

/// Client for the chess.com published-data API.
pub struct ChessComClient {
    client: Client,
    base_url: String,
    request_delay: Duration,
}

impl ChessComClient {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
        request_delay: Duration,
    ) -> Result<Self, ChessComError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(ChessComError::Build)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_delay,
        })
    }

    pub fn from_config(config: &InsightsConfig) -> Result<Self, ChessComError> {
        Self::new(
            config.base_url.clone(),
            &config.user_agent,
            config.http_timeout,
            config.request_delay,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Monthly archive URLs for a player, oldest first as the API lists them.
    pub async fn fetch_archives(&self, username: &str) -> Result<Vec<String>, ChessComError> {
        let url = format!(
            "{}/player/{}/games/archives",
            self.base_url,
            username.to_lowercase()
        );
        let data: ArchivesResponse = self.get_json(&url).await?;
        Ok(data.archives)
    }

    /// Every game in one monthly archive, as the raw JSON objects the API returns.
    pub async fn fetch_archive(&self, archive_url: &str) -> Result<Vec<Value>, ChessComError> {
        let data: GamesResponse = self.get_json(archive_url).await?;
        Ok(data.games)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ChessComError> {
        // Rate limit
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        debug!(%url, "GET");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ChessComError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChessComError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|source| ChessComError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
