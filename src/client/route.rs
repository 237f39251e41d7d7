use crate::models::MediaType;

/// Typed proxy route, the client-side counterpart of `/api/v1/{type}/...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyRoute {
    Popular { media_type: MediaType },
    Search { media_type: MediaType, query: String },
    Details { media_type: MediaType, id: u64 },
    Credits { media_type: MediaType, id: u64 },
    Recommendations { media_type: MediaType, id: u64 },
    WatchProviders { media_type: MediaType, id: u64 },
}

impl ProxyRoute {
    /// Search when `query` has content after trimming, popular otherwise
    pub fn listing(media_type: MediaType, query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            ProxyRoute::Popular { media_type }
        } else {
            ProxyRoute::Search {
                media_type,
                query: query.to_string(),
            }
        }
    }

    /// The four routes a detail view is built from, in join order
    pub fn detail_set(media_type: MediaType, id: u64) -> [ProxyRoute; 4] {
        [
            ProxyRoute::Details { media_type, id },
            ProxyRoute::Credits { media_type, id },
            ProxyRoute::Recommendations { media_type, id },
            ProxyRoute::WatchProviders { media_type, id },
        ]
    }

    pub fn path(&self) -> String {
        match self {
            ProxyRoute::Popular { media_type } => format!("/api/v1/{}/popular", media_type),
            ProxyRoute::Search { media_type, .. } => format!("/api/v1/{}/search", media_type),
            ProxyRoute::Details { media_type, id } => format!("/api/v1/{}/{}", media_type, id),
            ProxyRoute::Credits { media_type, id } => {
                format!("/api/v1/{}/{}/credits", media_type, id)
            }
            ProxyRoute::Recommendations { media_type, id } => {
                format!("/api/v1/{}/{}/recommendations", media_type, id)
            }
            ProxyRoute::WatchProviders { media_type, id } => {
                format!("/api/v1/{}/{}/watch/providers", media_type, id)
            }
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            ProxyRoute::Search { query, .. } => vec![("query", query.clone())],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_chooses_search_only_for_real_queries() {
        assert_eq!(
            ProxyRoute::listing(MediaType::Movie, "   "),
            ProxyRoute::Popular {
                media_type: MediaType::Movie
            }
        );
        assert_eq!(
            ProxyRoute::listing(MediaType::Tv, " the "),
            ProxyRoute::Search {
                media_type: MediaType::Tv,
                query: "the".to_string()
            }
        );
    }

    #[test]
    fn test_detail_set_paths() {
        let paths: Vec<String> = ProxyRoute::detail_set(MediaType::Tv, 1399)
            .iter()
            .map(ProxyRoute::path)
            .collect();
        assert_eq!(
            paths,
            vec![
                "/api/v1/tv/1399",
                "/api/v1/tv/1399/credits",
                "/api/v1/tv/1399/recommendations",
                "/api/v1/tv/1399/watch/providers",
            ]
        );
    }
}
