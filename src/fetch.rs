//! Network access for the feed document and icon images
//!
//! Everything that touches the network goes through the [`Fetcher`]
//! capability so the extractor can be driven with canned responses.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use tracing::{debug, instrument, warn};

use crate::config::{FeedConfig, HttpSettings};
use crate::{FeedError, Result};

/// Blocking "GET this URL and give me the body" capability
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

/// Builds `<weather_url><location>.xml`
#[must_use]
pub fn feed_url(weather_url: &str, location: &str) -> String {
    format!("{weather_url}{}.xml", urlencoding::encode(location))
}

/// Fetch the raw feed document for the configured location
pub fn fetch_feed<F: Fetcher + ?Sized>(config: &FeedConfig, fetcher: &F) -> Result<Vec<u8>> {
    fetcher.fetch(&config.feed_url())
}

/// [`Fetcher`] backed by a blocking reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new fetcher. Without a configured timeout requests never time out.
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let timeout = settings.timeout_seconds.map(Duration::from_secs);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| FeedError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(name = "fetch", level = "debug", skip(self))]
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let start_time = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FeedError::network(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error {} for {}", status, url);
            return Err(FeedError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .map_err(|e| FeedError::network(url, format!("failed to read body: {e}")))?;

        debug!(
            "Received {} bytes in {:.3}s",
            body.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(body.to_vec())
    }
}
