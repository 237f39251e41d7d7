pub mod tmdb;
pub mod upstream;

pub use tmdb::TmdbClient;
pub use upstream::{MetadataSource, Subresource, UpstreamRequest};
