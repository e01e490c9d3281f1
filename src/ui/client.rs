//! Typed HTTP client for the FanHub REST API.

use axum::http::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::entities::{characters, episodes, quotes, seasons, shows};

#[derive(Debug, Error)]
pub enum UiError {
    #[error("FanHub API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{0}")]
    NotFound(String),

    #[error("FanHub API returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl UiError {
    /// 404 when the API rejected what the page asked for, 502 for everything
    /// upstream that went wrong.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Api { status, .. } if *status >= 400 && *status < 500 => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct FanHubClient {
    http: reqwest::Client,
    base_url: Url,
}

impl FanHubClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UiError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("FanHub-UI/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, UiError> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, UiError> {
        let url = self.endpoint(path, query)?;
        tracing::debug!(%url, "Fetching from API");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        let envelope: Envelope<T> = if status.is_success() {
            response.json().await?
        } else {
            // Error bodies may not be JSON if a proxy sits in between.
            let message = response
                .json::<Envelope<serde_json::Value>>()
                .await
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| status.to_string());

            return Err(if status == reqwest::StatusCode::NOT_FOUND {
                UiError::NotFound(message)
            } else {
                UiError::Api {
                    status: status.as_u16(),
                    message,
                }
            });
        };

        match envelope {
            Envelope {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            Envelope { error, .. } => Err(UiError::Api {
                status: status.as_u16(),
                message: error.unwrap_or_else(|| "Response carried no data".to_string()),
            }),
        }
    }

    pub async fn list_shows(&self) -> Result<Vec<shows::Model>, UiError> {
        self.get("api/shows", &[]).await
    }

    pub async fn get_show(&self, id: i32) -> Result<shows::Model, UiError> {
        self.get(&format!("api/shows/{id}"), &[]).await
    }

    pub async fn list_seasons(&self, show_id: i32) -> Result<Vec<seasons::Model>, UiError> {
        self.get("api/seasons", &[("show_id", show_id.to_string())])
            .await
    }

    pub async fn get_season(&self, id: i32) -> Result<seasons::Model, UiError> {
        self.get(&format!("api/seasons/{id}"), &[]).await
    }

    pub async fn list_episodes(&self, season_id: i32) -> Result<Vec<episodes::Model>, UiError> {
        self.get("api/episodes", &[("season_id", season_id.to_string())])
            .await
    }

    pub async fn list_characters(
        &self,
        show_id: Option<i32>,
        search: Option<&str>,
    ) -> Result<Vec<characters::Model>, UiError> {
        let mut query = Vec::new();
        if let Some(show_id) = show_id {
            query.push(("show_id", show_id.to_string()));
        }
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        self.get("api/characters", &query).await
    }

    pub async fn list_quotes(&self, famous: Option<bool>) -> Result<Vec<quotes::Model>, UiError> {
        let query: Vec<_> = famous
            .map(|famous| ("famous", famous.to_string()))
            .into_iter()
            .collect();
        self.get("api/quotes", &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> FanHubClient {
        FanHubClient::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_under_base_path() {
        let c = client("http://localhost:5000");
        assert_eq!(
            c.endpoint("api/shows", &[]).unwrap().as_str(),
            "http://localhost:5000/api/shows"
        );

        let c = client("http://proxy.local/fanhub");
        assert_eq!(
            c.endpoint("api/shows/3", &[]).unwrap().as_str(),
            "http://proxy.local/fanhub/api/shows/3"
        );
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let c = client("http://localhost:5000/");
        let url = c
            .endpoint("api/characters", &[("search", "white & co".to_string())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/characters?search=white+%26+co"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(FanHubClient::new("not a url", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            UiError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            UiError::Api {
                status: 500,
                message: "boom".into()
            }
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            UiError::Api {
                status: 400,
                message: "id must be positive".into()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
