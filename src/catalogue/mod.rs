//! Field catalogue sources and token-gated refresh.
//!
//! A category change makes the current catalogue (boolean and numeric fields,
//! legal countries) stale. The engine issues a [`RefreshTicket`] carrying a
//! monotonically increasing [`RequestToken`]; the host runs the fetch on any
//! thread through a [`CatalogueSource`] and hands the result back. Results for
//! anything but the latest token are dropped.

#[cfg(feature = "http-catalogue")]
mod cache;
#[cfg(feature = "http-catalogue")]
mod http;
mod refresh;
mod source;

#[cfg(feature = "http-catalogue")]
pub use cache::CatalogueCache;
#[cfg(feature = "http-catalogue")]
pub use http::HttpCatalogueSource;
pub use refresh::{CatalogueRefresher, RefreshOutcome, RefreshTicket, RequestToken};
pub use source::{CatalogueSource, NoOpCatalogueSource, StaticCatalogueSource};
