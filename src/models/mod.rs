//! Data structures mirrored from the TMDB API
//!
//! Everything here is request-scoped: items are deserialized from an upstream
//! payload, rendered and dropped. Nothing is stored between requests.

mod credits;
mod media;
mod providers;

pub use credits::{CastMember, Credits};
pub use media::{Genre, MediaItem, MediaType, Page, Runtime};
pub use providers::{Provider, RegionProviders, WatchProviders};
