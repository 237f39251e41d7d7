use std::sync::Arc;

use crate::{config::Config, error::AppResult, services::MetadataSource, services::TmdbClient};

/// Shared application state.
///
/// Holds no request data: every request is resolved and forwarded on its own.
#[derive(Clone)]
pub struct AppState {
    pub metadata: Arc<dyn MetadataSource>,
    pub cors_origin: String,
}

impl AppState {
    /// Creates state around any metadata source, allowing every origin
    pub fn new(metadata: Arc<dyn MetadataSource>) -> Self {
        Self {
            metadata,
            cors_origin: "*".to_string(),
        }
    }

    /// Builds the TMDB-backed state described by `config`
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = TmdbClient::from_config(config)?;
        Ok(Self::new(Arc::new(client)).with_cors_origin(&config.cors_origin))
    }

    pub fn with_cors_origin(mut self, origin: &str) -> Self {
        self.cors_origin = origin.to_string();
        self
    }
}
