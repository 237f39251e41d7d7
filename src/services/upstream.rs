//! Typed upstream requests
//!
//! The proxy only ever issues one of a closed set of read-only TMDB calls.
//! Each variant renders its own path and query parameters; credentials and
//! locale are added by the `MetadataSource` implementation, never here.

use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::MediaType,
};

/// Placeholders accepted in legacy endpoint templates
const ID_PLACEHOLDERS: &[&str] = &["{movie_id}", "{tv_id}", "{id}"];

/// Sub-resources that can be appended to a detail lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subresource {
    Credits,
    Recommendations,
    WatchProviders,
}

impl Subresource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subresource::Credits => "credits",
            Subresource::Recommendations => "recommendations",
            Subresource::WatchProviders => "watch/providers",
        }
    }

    /// Parses a comma separated `append` list, rejecting unknown names
    pub fn parse_list(list: &str) -> AppResult<Vec<Subresource>> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| match name {
                "credits" => Ok(Subresource::Credits),
                "recommendations" => Ok(Subresource::Recommendations),
                "watch/providers" | "watch_providers" => Ok(Subresource::WatchProviders),
                other => Err(AppError::InvalidInput(format!(
                    "unsupported sub-resource '{}'",
                    other
                ))),
            })
            .collect()
    }
}

/// One logical upstream operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamRequest {
    Popular {
        media_type: MediaType,
        page: Option<u32>,
    },
    Search {
        media_type: MediaType,
        query: String,
        page: Option<u32>,
    },
    Details {
        media_type: MediaType,
        id: u64,
        append: Vec<Subresource>,
    },
    Credits {
        media_type: MediaType,
        id: u64,
    },
    Recommendations {
        media_type: MediaType,
        id: u64,
        page: Option<u32>,
    },
    WatchProviders {
        media_type: MediaType,
        id: u64,
    },
}

impl UpstreamRequest {
    pub fn popular(media_type: MediaType) -> Self {
        UpstreamRequest::Popular {
            media_type,
            page: None,
        }
    }

    pub fn search(media_type: MediaType, query: impl Into<String>) -> Self {
        UpstreamRequest::Search {
            media_type,
            query: query.into(),
            page: None,
        }
    }

    pub fn details(media_type: MediaType, id: u64) -> Self {
        UpstreamRequest::Details {
            media_type,
            id,
            append: Vec::new(),
        }
    }

    /// Name of the operation, for logs
    pub fn operation(&self) -> &'static str {
        match self {
            UpstreamRequest::Popular { .. } => "popular",
            UpstreamRequest::Search { .. } => "search",
            UpstreamRequest::Details { .. } => "details",
            UpstreamRequest::Credits { .. } => "credits",
            UpstreamRequest::Recommendations { .. } => "recommendations",
            UpstreamRequest::WatchProviders { .. } => "watch_providers",
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            UpstreamRequest::Popular { media_type, .. }
            | UpstreamRequest::Search { media_type, .. }
            | UpstreamRequest::Details { media_type, .. }
            | UpstreamRequest::Credits { media_type, .. }
            | UpstreamRequest::Recommendations { media_type, .. }
            | UpstreamRequest::WatchProviders { media_type, .. } => *media_type,
        }
    }

    /// Upstream path relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            UpstreamRequest::Popular { media_type, .. } => format!("/{}/popular", media_type),
            UpstreamRequest::Search { media_type, .. } => format!("/search/{}", media_type),
            UpstreamRequest::Details { media_type, id, .. } => format!("/{}/{}", media_type, id),
            UpstreamRequest::Credits { media_type, id } => {
                format!("/{}/{}/credits", media_type, id)
            }
            UpstreamRequest::Recommendations { media_type, id, .. } => {
                format!("/{}/{}/recommendations", media_type, id)
            }
            UpstreamRequest::WatchProviders { media_type, id } => {
                format!("/{}/{}/watch/providers", media_type, id)
            }
        }
    }

    /// Operation-specific query parameters
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        match self {
            UpstreamRequest::Search { query, page, .. } => {
                params.push(("query", query.clone()));
                push_page(&mut params, *page);
            }
            UpstreamRequest::Popular { page, .. }
            | UpstreamRequest::Recommendations { page, .. } => push_page(&mut params, *page),
            UpstreamRequest::Details { append, .. } if !append.is_empty() => {
                let joined = append
                    .iter()
                    .map(Subresource::as_str)
                    .collect::<Vec<_>>()
                    .join(",");
                params.push(("append_to_response", joined));
            }
            _ => {}
        }
        params
    }

    /// Builds a request from a legacy endpoint template such as
    /// `/movie/{movie_id}/credits`.
    ///
    /// The identifier may come from `id` (substituted into the placeholder) or
    /// be written literally into the template. Anything outside the known
    /// operation set is rejected.
    pub fn from_template(template: &str, id: Option<&str>) -> AppResult<Self> {
        let segments: Vec<&str> = template
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let unsupported =
            || AppError::InvalidInput(format!("unsupported endpoint '{}'", template.trim()));

        match segments.as_slice() {
            ["search", _] => Err(AppError::InvalidInput(
                "search endpoints require a query".to_string(),
            )),
            [media_type, "popular"] => Ok(UpstreamRequest::popular(parse_media_type(media_type)?)),
            [media_type, id_segment, rest @ ..] => {
                let media_type = parse_media_type(media_type)?;
                let id = resolve_id(id_segment, id)?;
                match rest {
                    [] => Ok(UpstreamRequest::details(media_type, id)),
                    ["credits"] => Ok(UpstreamRequest::Credits { media_type, id }),
                    ["recommendations"] => Ok(UpstreamRequest::Recommendations {
                        media_type,
                        id,
                        page: None,
                    }),
                    ["watch", "providers"] => Ok(UpstreamRequest::WatchProviders { media_type, id }),
                    _ => Err(unsupported()),
                }
            }
            _ => Err(unsupported()),
        }
    }
}

fn push_page(params: &mut Vec<(&'static str, String)>, page: Option<u32>) {
    if let Some(page) = page {
        params.push(("page", page.to_string()));
    }
}

pub fn parse_media_type(value: &str) -> AppResult<MediaType> {
    value.parse().map_err(AppError::InvalidInput)
}

pub fn parse_id(value: &str) -> AppResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("invalid identifier '{}'", value)))
}

fn resolve_id(segment: &str, id: Option<&str>) -> AppResult<u64> {
    if ID_PLACEHOLDERS.contains(&segment) {
        let id = id.ok_or_else(|| {
            AppError::InvalidInput("endpoint requires an identifier".to_string())
        })?;
        parse_id(id)
    } else {
        parse_id(segment)
    }
}

/// Source of upstream metadata
///
/// Implementations inject credentials and locale, issue the call and return
/// the JSON payload untouched. Non-success statuses surface as
/// `AppError::Upstream` carrying the upstream status code.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch(&self, request: &UpstreamRequest) -> AppResult<Value>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
