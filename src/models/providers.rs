use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Streaming service entry inside a region's offer list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    #[serde(default)]
    pub provider_id: Option<u64>,
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

/// Offers for a single region.
///
/// Only the subscription ("flatrate") tier is kept; rent and buy offers are
/// dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionProviders {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Vec<Provider>,
}

/// Watch-provider availability keyed by ISO 3166-1 region code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchProviders {
    #[serde(default)]
    pub results: HashMap<String, RegionProviders>,
}

impl WatchProviders {
    /// Subscription providers for `region`, or `None` when the region or its
    /// flatrate tier is missing
    pub fn flatrate(&self, region: &str) -> Option<&[Provider]> {
        self.results
            .get(region)
            .map(|offers| offers.flatrate.as_slice())
            .filter(|providers| !providers.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> WatchProviders {
        serde_json::from_value(json!({
            "id": 550,
            "results": {
                "BR": {
                    "link": "https://www.themoviedb.org/movie/550/watch?locale=BR",
                    "flatrate": [
                        {"provider_id": 8, "provider_name": "Netflix", "logo_path": "/netflix.jpg"}
                    ],
                    "rent": [
                        {"provider_id": 2, "provider_name": "Apple TV", "logo_path": "/apple.jpg"}
                    ]
                },
                "US": {
                    "buy": [
                        {"provider_id": 3, "provider_name": "Google Play", "logo_path": "/gp.jpg"}
                    ]
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_flatrate_for_region() {
        let providers = sample();
        let br = providers.flatrate("BR").unwrap();
        assert_eq!(br.len(), 1);
        assert_eq!(br[0].provider_name, "Netflix");
    }

    #[test]
    fn test_region_without_flatrate_tier() {
        assert!(sample().flatrate("US").is_none());
    }

    #[test]
    fn test_missing_region() {
        assert!(sample().flatrate("PT").is_none());
        assert!(WatchProviders::default().flatrate("BR").is_none());
    }
}
