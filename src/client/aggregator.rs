use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::{route::ProxyRoute, transport::ProxyTransport, ClientError};
use crate::models::{CastMember, Credits, MediaItem, MediaType, Page, WatchProviders};

/// Client-side deadline for a single proxy call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a listing load
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Results(Vec<MediaItem>),
    NoResults,
}

/// Everything the detail view needs, merged from four proxy calls
#[derive(Debug, Clone, PartialEq)]
pub struct DetailBundle {
    pub media_type: MediaType,
    pub item: MediaItem,
    pub cast: Vec<CastMember>,
    pub recommendations: Vec<MediaItem>,
    pub providers: WatchProviders,
}

/// Issues proxy calls on behalf of the UI and merges their payloads
pub struct Aggregator<T> {
    transport: T,
    timeout: Duration,
}

impl<T: ProxyTransport> Aggregator<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// One proxy call under the client deadline. On expiry the pending call
    /// is dropped and `ClientError::Timeout` is returned.
    pub async fn fetch_proxy(&self, route: &ProxyRoute) -> Result<Value, ClientError> {
        match tokio::time::timeout(self.timeout, self.transport.get_json(route)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    path = %route.path(),
                    timeout_secs = self.timeout.as_secs(),
                    "Proxy call timed out"
                );
                Err(ClientError::Timeout)
            }
        }
    }

    /// Popular listing for an empty query, search otherwise
    pub async fn load_listing(
        &self,
        media_type: MediaType,
        query: &str,
    ) -> Result<Listing, ClientError> {
        let route = ProxyRoute::listing(media_type, query);
        let page: Page<MediaItem> = decode(self.fetch_proxy(&route).await?)?;

        tracing::debug!(
            media_type = %media_type,
            results = page.results.len(),
            "Listing loaded"
        );

        if page.results.is_empty() {
            Ok(Listing::NoResults)
        } else {
            Ok(Listing::Results(page.results))
        }
    }

    /// Runs the detail, credits, recommendations and providers calls
    /// concurrently and waits for all four to settle. Any failure fails the
    /// whole load; a title with no provider data for a region is not a
    /// failure.
    pub async fn load_details(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<DetailBundle, ClientError> {
        let [details, credits, recommendations, providers] = ProxyRoute::detail_set(media_type, id);

        let (details, credits, recommendations, providers) = tokio::join!(
            self.fetch_proxy(&details),
            self.fetch_proxy(&credits),
            self.fetch_proxy(&recommendations),
            self.fetch_proxy(&providers),
        );

        let item: MediaItem = decode(details?)?;
        let credits: Credits = decode(credits?)?;
        let recommendations: Page<MediaItem> = decode(recommendations?)?;
        let providers: WatchProviders = decode(providers?)?;

        Ok(DetailBundle {
            media_type,
            item,
            cast: credits.cast,
            recommendations: recommendations.results,
            providers,
        })
    }
}

fn decode<D: DeserializeOwned>(value: Value) -> Result<D, ClientError> {
    Ok(serde_json::from_value(value)?)
}
