//! Forecast extraction
//!
//! Turns a parsed [`FeedDocument`] into flat records. The per-day walk also
//! populates the icon cache: every condition code seen for the first time is
//! downloaded before the next day is looked at.

use tracing::{debug, info, instrument};

use crate::feed::{FeedDocument, tags};
use crate::fetch::Fetcher;
use crate::icons::{ImageCache, icon_url};
use crate::models::{AstronomyEntry, ForecastDay, GeoCoordinate};
use crate::{FeedError, Result};

/// Extract every `yweather:forecast` day in document order, downloading
/// missing icons from `icons_base_url` into `cache` along the way.
///
/// Downloaded bytes are stored as received; nothing checks that they are an
/// image, and a failed write is not cleaned up.
#[instrument(level = "debug", skip_all, fields(icons_base_url = %icons_base_url))]
pub fn extract_forecast<F, C>(
    document: &FeedDocument,
    icons_base_url: &str,
    fetcher: &F,
    cache: &mut C,
) -> Result<Vec<ForecastDay>>
where
    F: Fetcher + ?Sized,
    C: ImageCache + ?Sized,
{
    let mut days = Vec::new();

    for element in document.elements_named(tags::FORECAST) {
        let day = ForecastDay::from_element(element)?;

        if cache.exists(&day.code)? {
            debug!("Icon {} already cached", day.code);
        } else {
            let url = icon_url(icons_base_url, &day.code);
            info!("Downloading icon {} from {}", day.code, url);
            let bytes = fetcher.fetch(&url)?;
            cache.store(&day.code, &bytes)?;
        }

        days.push(day);
    }

    debug!("Extracted {} forecast days", days.len());
    Ok(days)
}

/// Coordinate from the first `geo:lat` and first `geo:long` elements
pub fn geo_coordinate(document: &FeedDocument) -> Result<GeoCoordinate> {
    let lat = document
        .first_named(tags::GEO_LAT)
        .ok_or_else(|| FeedError::missing_element(tags::GEO_LAT))?;
    let long = document
        .first_named(tags::GEO_LONG)
        .ok_or_else(|| FeedError::missing_element(tags::GEO_LONG))?;

    Ok(GeoCoordinate::new(lat.text(), long.text()))
}

/// One entry per `yweather:astronomy` element, in document order
pub fn astronomy_entries(document: &FeedDocument) -> Result<Vec<AstronomyEntry>> {
    document
        .elements_named(tags::ASTRONOMY)
        .map(AstronomyEntry::from_element)
        .collect()
}
