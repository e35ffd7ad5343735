//! Sunrise and sunset record

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::feed::FeedElement;

/// Sunrise/sunset times as the feed reports them ("7:43 am")
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AstronomyEntry {
    pub sunrise: String,
    pub sunset: String,
}

impl AstronomyEntry {
    /// Build an entry from a `yweather:astronomy` element
    pub fn from_element(element: &FeedElement) -> Result<Self> {
        Ok(Self {
            sunrise: element.required_attribute("sunrise")?.to_string(),
            sunset: element.required_attribute("sunset")?.to_string(),
        })
    }
}
