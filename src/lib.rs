//! Cinescope - a thin proxy in front of the TMDB metadata API, plus the
//! client-side pieces that browse it.
//!
//! # Modules
//!
//! - `config` - environment configuration for the proxy server
//! - `error` - server error type and its JSON rendering
//! - `api` - axum router, state and handlers
//! - `middleware` - request id propagation
//! - `models` - media items, credits and watch providers
//! - `services` - typed upstream requests and the TMDB client
//! - `client` - proxy transport and the detail/listing aggregator
//! - `render` - pure HTML fragment renderers
//! - `ui` - session state, intents and the command runtime

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod render;
pub mod services;
pub mod ui;

pub use client::{Aggregator, ClientError, DetailBundle, HttpTransport, Listing, ProxyRoute};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{CastMember, MediaItem, MediaType, WatchProviders};
pub use services::{MetadataSource, TmdbClient, UpstreamRequest};
