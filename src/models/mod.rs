//! Data models for the weatherfeed application
//!
//! Flat records extracted from the feed document:
//! - Forecast: one day of the multi-day forecast
//! - Astronomy: sunrise and sunset times
//! - Location: the feed's geographic coordinate

pub mod astronomy;
pub mod forecast;
pub mod location;

// Re-export all public types for convenient access
pub use astronomy::AstronomyEntry;
pub use forecast::ForecastDay;
pub use location::GeoCoordinate;
