use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::Value;

use super::{route::ProxyRoute, ClientError};

/// Fallback message when the proxy's error body cannot be read
const REQUEST_FAILED: &str = "Request failed.";

/// One GET against the proxy, returning its JSON payload
#[async_trait::async_trait]
pub trait ProxyTransport: Send + Sync {
    async fn get_json(&self, route: &ProxyRoute) -> Result<Value, ClientError>;
}

/// Normalized error body emitted by the proxy
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// reqwest-backed transport talking to a running proxy
#[derive(Clone)]
pub struct HttpTransport {
    http_client: HttpClient,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl ProxyTransport for HttpTransport {
    async fn get_json(&self, route: &ProxyRoute) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, route.path());
        let response = self
            .http_client
            .get(&url)
            .query(&route.query())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| REQUEST_FAILED.to_string());

            tracing::warn!(status = status.as_u16(), path = %route.path(), "Proxy returned an error");
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
