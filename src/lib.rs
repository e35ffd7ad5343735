//! `weatherfeed` - fetch a weather feed, cache its icons, print a forecast
//!
//! This library provides the feed fetching, XML extraction, icon caching and
//! formatting behind the `weatherfeed` command.

pub mod config;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod forecast;
pub mod icons;
pub mod logging;
pub mod models;
pub mod report;
pub mod service;

// Re-export core types for public API
pub use config::{FeedConfig, Units};
pub use error::FeedError;
pub use feed::{FeedDocument, FeedElement};
pub use fetch::{Fetcher, HttpFetcher};
pub use forecast::{astronomy_entries, extract_forecast, geo_coordinate};
pub use icons::{FsImageCache, ImageCache};
pub use models::{AstronomyEntry, ForecastDay, GeoCoordinate};
pub use service::ForecastService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
