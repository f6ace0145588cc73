// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for trip date parsing and formatting.

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a trip date as `YYYY-MM-DD`, or `YYYY-MM-DD HH:MM:SS` with the
/// time of day discarded.
pub fn parse_trip_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT)
                .ok()
                .map(|dt| dt.date())
        })
}

/// Format a trip date as `YYYY-MM-DD`.
pub fn format_trip_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trip_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 7, 14);

        assert_eq!(parse_trip_date("2025-07-14"), expected);
        assert_eq!(parse_trip_date(" 2025-07-14 "), expected);
        assert_eq!(parse_trip_date("2025-07-14 09:30:00"), expected);
        assert_eq!(parse_trip_date("14/07/2025"), None);
        assert_eq!(parse_trip_date("2025-02-30"), None);
    }

    #[test]
    fn test_format_trip_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert_eq!(format_trip_date(date), "2025-01-03");
    }
}
