//! Geographic coordinate of the feed location

use serde::{Deserialize, Serialize};

/// Latitude/longitude in decimal degrees, kept as the feed's text
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GeoCoordinate {
    /// Latitude in decimal degrees
    pub lat: String,
    /// Longitude in decimal degrees
    pub long: String,
}

impl GeoCoordinate {
    #[must_use]
    pub fn new(lat: impl Into<String>, long: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            long: long.into(),
        }
    }

    /// Parse both values as numbers, when the caller needs them
    #[must_use]
    pub fn as_degrees(&self) -> Option<(f64, f64)> {
        let lat = self.lat.trim().parse::<f64>().ok()?;
        let long = self.long.trim().parse::<f64>().ok()?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&long) {
            return None;
        }
        Some((lat, long))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_degrees() {
        let coordinate = GeoCoordinate::new("51.75", "-1.25");
        assert_eq!(coordinate.as_degrees(), Some((51.75, -1.25)));
    }

    #[test]
    fn test_as_degrees_rejects_out_of_range() {
        assert_eq!(GeoCoordinate::new("91.0", "8.0").as_degrees(), None);
        assert_eq!(GeoCoordinate::new("north", "8.0").as_degrees(), None);
    }
}
