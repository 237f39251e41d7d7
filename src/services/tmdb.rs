//! TMDB metadata client
//!
//! Injects the API key and response locale into every request and returns
//! the upstream JSON payload untouched. No retries and no caching: each call
//! goes straight to the API.

use reqwest::Client as HttpClient;
use serde_json::Value;
use std::time::Duration;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::upstream::{MetadataSource, UpstreamRequest},
};

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbClient {
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            language: language.into(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_language.clone(),
            config.upstream_timeout(),
        )
    }

    fn url(&self, request: &UpstreamRequest) -> String {
        format!("{}{}", self.api_url, request.path())
    }

    fn query(&self, request: &UpstreamRequest) -> Vec<(&'static str, String)> {
        let mut query = request.query();
        query.push(("api_key", self.api_key.clone()));
        query.push(("language", self.language.clone()));
        query
    }
}

#[async_trait::async_trait]
impl MetadataSource for TmdbClient {
    async fn fetch(&self, request: &UpstreamRequest) -> AppResult<Value> {
        let response = self
            .http_client
            .get(self.url(request))
            .query(&self.query(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                operation = request.operation(),
                media_type = %request.media_type(),
                "Metadata API returned an error"
            );
            return Err(AppError::Upstream {
                status: status.as_u16(),
                operation: request.operation(),
            });
        }

        let body: Value = response.json().await?;

        tracing::debug!(
            operation = request.operation(),
            provider = self.name(),
            "Upstream request completed"
        );

        Ok(body)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
