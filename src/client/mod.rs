//! Client side of the proxy
//!
//! - `route` - typed proxy routes
//! - `transport` - the HTTP seam (`ProxyTransport`) and its reqwest implementation
//! - `aggregator` - timeout-bounded calls, listing loads and the four-way detail join

mod aggregator;
mod error;
mod route;
mod transport;

pub use aggregator::{Aggregator, DetailBundle, Listing, REQUEST_TIMEOUT};
pub use error::{ClientError, ErrorKind};
pub use route::ProxyRoute;
pub use transport::{HttpTransport, ProxyTransport};
