//! Console presentation of the extracted records

use std::io::{self, Write};

use crate::models::{AstronomyEntry, ForecastDay, GeoCoordinate};

/// Text block for one forecast day, ending in a newline
#[must_use]
pub fn format_day(day: &ForecastDay) -> String {
    format!(
        "{}\n---\n High: {} Low: {} {}\n",
        day.day, day.high, day.low, day.text
    )
}

/// Coordinate line; the trailing space is part of the output format
#[must_use]
pub fn format_coordinate(coordinate: &GeoCoordinate) -> String {
    format!("lat: {} long {} ", coordinate.lat, coordinate.long)
}

#[must_use]
pub fn format_astronomy(entry: &AstronomyEntry) -> String {
    format!("Sunrise: {} Sunset: {}", entry.sunrise, entry.sunset)
}

/// Day blocks, each followed by an empty line
pub fn write_days<W: Write + ?Sized>(out: &mut W, days: &[ForecastDay]) -> io::Result<()> {
    for day in days {
        writeln!(out, "{}", format_day(day))?;
    }
    Ok(())
}

pub fn write_coordinate<W: Write + ?Sized>(out: &mut W, coordinate: &GeoCoordinate) -> io::Result<()> {
    writeln!(out, "{}", format_coordinate(coordinate))
}

pub fn write_astronomy<W: Write + ?Sized>(out: &mut W, entries: &[AstronomyEntry]) -> io::Result<()> {
    for entry in entries {
        writeln!(out, "{}", format_astronomy(entry))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> ForecastDay {
        ForecastDay {
            day: "Mon".to_string(),
            low: "5".to_string(),
            high: "12".to_string(),
            text: "Sunny".to_string(),
            code: "34".to_string(),
        }
    }

    #[test]
    fn test_format_day() {
        assert_eq!(format_day(&monday()), "Mon\n---\n High: 12 Low: 5 Sunny\n");
    }

    #[test]
    fn test_write_days_separates_blocks() {
        let mut tuesday = monday();
        tuesday.day = "Tue".to_string();

        let mut out = Vec::new();
        write_days(&mut out, &[monday(), tuesday]).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Mon\n---\n High: 12 Low: 5 Sunny\n\nTue\n---\n High: 12 Low: 5 Sunny\n\n"
        );
    }

    #[test]
    fn test_format_coordinate_and_astronomy() {
        assert_eq!(
            format_coordinate(&GeoCoordinate::new("51.75", "-1.25")),
            "lat: 51.75 long -1.25 "
        );
        assert_eq!(
            format_astronomy(&AstronomyEntry {
                sunrise: "7:43 am".to_string(),
                sunset: "4:12 pm".to_string(),
            }),
            "Sunrise: 7:43 am Sunset: 4:12 pm"
        );
    }
}
