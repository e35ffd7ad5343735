//! Daily forecast record

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::feed::FeedElement;

/// One day of the forecast, attribute values copied verbatim from the feed
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ForecastDay {
    /// Weekday label (e.g. "Mon")
    pub day: String,
    /// Low temperature, in the units the location code selected
    pub low: String,
    /// High temperature
    pub high: String,
    /// Condition description (e.g. "Partly Cloudy")
    pub text: String,
    /// Condition code, also the icon's cache key
    pub code: String,
}

impl ForecastDay {
    /// Build a record from a `yweather:forecast` element.
    ///
    /// All five attributes are required.
    pub fn from_element(element: &FeedElement) -> Result<Self> {
        Ok(Self {
            code: element.required_attribute("code")?.to_string(),
            day: element.required_attribute("day")?.to_string(),
            low: element.required_attribute("low")?.to_string(),
            high: element.required_attribute("high")?.to_string(),
            text: element.required_attribute("text")?.to_string(),
        })
    }
}
