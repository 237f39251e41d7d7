use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Media type discriminator shared by the proxy routes and the upstream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment used by TMDB and by the proxy routes
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// The other media type, used by the type toggle
    pub fn toggled(&self) -> Self {
        match self {
            MediaType::Movie => MediaType::Tv,
            MediaType::Tv => MediaType::Movie,
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(format!("unsupported media type '{}'", other)),
        }
    }
}

/// Genre entry as returned by detail lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

/// A movie or TV show, as returned by listings, searches, details and
/// recommendations.
///
/// Movies use `title`/`release_date`/`runtime`, series use
/// `name`/`first_air_date`/`episode_run_time`. Both shapes land here and the
/// accessors below resolve the aliasing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub budget: Option<u64>,
}

/// Runtime in minutes, flagged when it comes from the per-episode list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runtime {
    Exact(u32),
    Approximate(u32),
}

impl MediaItem {
    /// Movie title, falling back to the series name
    pub fn display_title(&self) -> &str {
        non_empty(&self.title)
            .or_else(|| non_empty(&self.name))
            .unwrap_or("")
    }

    /// Release date, falling back to the first air date
    pub fn display_date(&self) -> Option<&str> {
        non_empty(&self.release_date).or_else(|| non_empty(&self.first_air_date))
    }

    /// Scalar runtime, falling back to the first episode runtime.
    /// TMDB reports unknown runtimes as 0, which counts as absent.
    pub fn runtime(&self) -> Option<Runtime> {
        match self.runtime {
            Some(minutes) if minutes > 0 => Some(Runtime::Exact(minutes)),
            _ => self
                .episode_run_time
                .first()
                .filter(|minutes| **minutes > 0)
                .map(|minutes| Runtime::Approximate(*minutes)),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Paginated result list (popular, search and recommendations)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}
