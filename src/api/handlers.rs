use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::MediaType,
    services::{
        upstream::{parse_id, parse_media_type},
        Subresource, UpstreamRequest,
    },
};

use super::{ApiQuery, AppState};

// Request types

/// Query string accepted by `/api/movies`
#[derive(Debug, Default, Deserialize)]
pub struct LegacyProxyParams {
    pub query: Option<String>,
    pub endpoint: Option<String>,
    pub movie_id: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

impl LegacyProxyParams {
    /// Query wins, then the endpoint template, then the popular listing
    pub fn resolve(self) -> AppResult<UpstreamRequest> {
        let media_type = match self.media_type.as_deref() {
            Some(value) => parse_media_type(value)?,
            None => MediaType::Movie,
        };

        if let Some(query) = self.query.filter(|q| !q.trim().is_empty()) {
            return Ok(UpstreamRequest::search(media_type, query));
        }

        match self.endpoint.filter(|e| !e.trim().is_empty()) {
            Some(endpoint) => UpstreamRequest::from_template(&endpoint, self.movie_id.as_deref()),
            None => Ok(UpstreamRequest::popular(media_type)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct DetailParams {
    pub append: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// `GET /api/movies?query=&endpoint=&movie_id=&type=`
pub async fn legacy_proxy(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiQuery(params): ApiQuery<LegacyProxyParams>,
) -> AppResult<Json<Value>> {
    let request = params.resolve()?;
    forward(&state, &request_id, request).await
}

/// `GET /api/v1/{type}/popular`
pub async fn popular(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(media_type): Path<String>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<Json<Value>> {
    let request = UpstreamRequest::Popular {
        media_type: parse_media_type(&media_type)?,
        page: params.page,
    };
    forward(&state, &request_id, request).await
}

/// `GET /api/v1/{type}/search?query=`
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(media_type): Path<String>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> AppResult<Json<Value>> {
    let media_type = parse_media_type(&media_type)?;
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("query must not be empty".to_string()))?;

    let request = UpstreamRequest::Search {
        media_type,
        query,
        page: params.page,
    };
    forward(&state, &request_id, request).await
}

/// `GET /api/v1/{type}/{id}?append=credits,recommendations,watch/providers`
pub async fn details(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path((media_type, id)): Path<(String, String)>,
    ApiQuery(params): ApiQuery<DetailParams>,
) -> AppResult<Json<Value>> {
    let append = match params.append.as_deref() {
        Some(list) => Subresource::parse_list(list)?,
        None => Vec::new(),
    };

    let request = UpstreamRequest::Details {
        media_type: parse_media_type(&media_type)?,
        id: parse_id(&id)?,
        append,
    };
    forward(&state, &request_id, request).await
}

/// `GET /api/v1/{type}/{id}/credits`
pub async fn credits(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path((media_type, id)): Path<(String, String)>,
) -> AppResult<Json<Value>> {
    let request = UpstreamRequest::Credits {
        media_type: parse_media_type(&media_type)?,
        id: parse_id(&id)?,
    };
    forward(&state, &request_id, request).await
}

/// `GET /api/v1/{type}/{id}/recommendations`
pub async fn recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path((media_type, id)): Path<(String, String)>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<Json<Value>> {
    let request = UpstreamRequest::Recommendations {
        media_type: parse_media_type(&media_type)?,
        id: parse_id(&id)?,
        page: params.page,
    };
    forward(&state, &request_id, request).await
}

/// `GET /api/v1/{type}/{id}/watch/providers`
pub async fn watch_providers(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path((media_type, id)): Path<(String, String)>,
) -> AppResult<Json<Value>> {
    let request = UpstreamRequest::WatchProviders {
        media_type: parse_media_type(&media_type)?,
        id: parse_id(&id)?,
    };
    forward(&state, &request_id, request).await
}

/// Sends one request upstream and passes the payload through unchanged
async fn forward(
    state: &AppState,
    request_id: &RequestId,
    request: UpstreamRequest,
) -> AppResult<Json<Value>> {
    tracing::info!(
        request_id = %request_id,
        operation = request.operation(),
        media_type = %request.media_type(),
        provider = state.metadata.name(),
        "Forwarding request upstream"
    );

    let body = state.metadata.fetch(&request).await.map_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Upstream request failed");
        e
    })?;

    Ok(Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::upstream::MockMetadataSource;
    use std::sync::Arc;

    fn state(source: MockMetadataSource) -> AppState {
        AppState::new(Arc::new(source))
    }

    fn mock_source() -> MockMetadataSource {
        let mut source = MockMetadataSource::new();
        source.expect_name().return_const("mock");
        source
    }

    fn params(query: Option<&str>, endpoint: Option<&str>, movie_id: Option<&str>) -> LegacyProxyParams {
        LegacyProxyParams {
            query: query.map(String::from),
            endpoint: endpoint.map(String::from),
            movie_id: movie_id.map(String::from),
            media_type: None,
        }
    }

    #[test]
    fn test_resolve_defaults_to_popular() {
        let request = params(None, None, None).resolve().unwrap();
        assert_eq!(request, UpstreamRequest::popular(MediaType::Movie));
    }

    #[test]
    fn test_resolve_query_wins_over_endpoint() {
        let request = params(Some("batman"), Some("/movie/{movie_id}"), Some("550"))
            .resolve()
            .unwrap();
        assert_eq!(request, UpstreamRequest::search(MediaType::Movie, "batman"));
    }

    #[test]
    fn test_resolve_blank_query_falls_through() {
        let request = params(Some("   "), Some("/movie/{movie_id}/recommendations"), Some("550"))
            .resolve()
            .unwrap();
        assert_eq!(request.operation(), "recommendations");
    }

    #[test]
    fn test_resolve_uses_type() {
        let mut p = params(Some("the"), None, None);
        p.media_type = Some("tv".to_string());
        assert_eq!(p.resolve().unwrap(), UpstreamRequest::search(MediaType::Tv, "the"));

        let mut p = params(None, None, None);
        p.media_type = Some("person".to_string());
        assert!(p.resolve().is_err());
    }

    #[tokio::test]
    async fn test_popular_forwards_page() {
        let mut source = mock_source();
        source
            .expect_fetch()
            .withf(|request| {
                *request
                    == UpstreamRequest::Popular {
                        media_type: MediaType::Tv,
                        page: Some(2),
                    }
            })
            .times(1)
            .returning(|_| Ok(json!({ "page": 2, "results": [] })));

        let Json(body) = popular(
            State(state(source)),
            Extension(RequestId::generate()),
            Path("tv".to_string()),
            ApiQuery(PageParams { page: Some(2) }),
        )
        .await
        .unwrap();

        assert_eq!(body["page"], 2);
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        let mut source = mock_source();
        source.expect_fetch().times(1).returning(|_| {
            Err(AppError::Upstream {
                status: 404,
                operation: "credits",
            })
        });

        let result = credits(
            State(state(source)),
            Extension(RequestId::generate()),
            Path(("movie".to_string(), "999999999".to_string())),
        )
        .await;

        assert!(matches!(result, Err(AppError::Upstream { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query_before_fetching() {
        let mut source = MockMetadataSource::new();
        source.expect_fetch().never();

        let result = search(
            State(state(source)),
            Extension(RequestId::generate()),
            Path("movie".to_string()),
            ApiQuery(SearchParams {
                query: Some("  ".to_string()),
                page: None,
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
