//! Forecast run
//!
//! One pull-parse-print cycle: fetch the feed, extract the days (populating
//! the icon cache), print them, then print the coordinate and the astronomy
//! lines. Output is written as soon as each part is available, so a failure
//! late in the run leaves the earlier lines printed.

use std::io::Write;
use std::time::Instant;

use tracing::{info, instrument, warn};

use crate::config::FeedConfig;
use crate::feed::FeedDocument;
use crate::fetch::{Fetcher, HttpFetcher, fetch_feed};
use crate::forecast::{astronomy_entries, extract_forecast, geo_coordinate};
use crate::icons::{FsImageCache, ImageCache};
use crate::report;
use crate::Result;

/// Forecast service wiring the configuration to its fetch and cache capabilities
#[derive(Debug)]
pub struct ForecastService<F, C> {
    config: FeedConfig,
    fetcher: F,
    cache: C,
}

impl ForecastService<HttpFetcher, FsImageCache> {
    /// Service backed by HTTP and the configured images directory
    pub fn from_config(config: FeedConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.http)?;
        let cache = FsImageCache::new(config.icons.images_path.clone());
        Ok(Self::new(config, fetcher, cache))
    }
}

impl<F: Fetcher, C: ImageCache> ForecastService<F, C> {
    pub fn new(config: FeedConfig, fetcher: F, cache: C) -> Self {
        Self {
            config,
            fetcher,
            cache,
        }
    }

    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Run one forecast cycle, writing the report to `out`
    #[instrument(name = "forecast_run", skip_all, fields(location = %self.config.feed.location_code()))]
    pub fn run<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<()> {
        let start_time = Instant::now();
        info!("Fetching forecast from {}", self.config.feed_url());

        let body = fetch_feed(&self.config, &self.fetcher)?;
        let document = FeedDocument::parse(&body)?;

        let days = extract_forecast(
            &document,
            &self.config.icons.base_url,
            &self.fetcher,
            &mut self.cache,
        )?;
        report::write_days(out, &days)?;

        let coordinate = geo_coordinate(&document)?;
        if coordinate.as_degrees().is_none() {
            warn!(
                "Feed coordinate ({}, {}) is not a valid latitude/longitude",
                coordinate.lat, coordinate.long
            );
        }
        report::write_coordinate(out, &coordinate)?;

        let astronomy = astronomy_entries(&document)?;
        report::write_astronomy(out, &astronomy)?;

        info!(
            "Printed {} forecast days in {:.3}s",
            days.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(())
    }
}
