// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use std::fmt;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Month name and day of month in `date`'s own offset, e.g. "April 14".
pub fn month_day<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    date.format("%B %-d").to_string()
}

/// [`month_day`] of a UTC timestamp as seen on the user's local calendar.
pub fn local_month_day(date: DateTime<Utc>) -> String {
    month_day(&date.with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_month_day_has_no_padding() {
        let date = Utc.with_ymd_and_hms(2024, 4, 4, 9, 30, 0).unwrap();
        assert_eq!(month_day(&date), "April 4");
    }

    #[test]
    fn test_month_day_follows_offset() {
        let late_evening = Utc.with_ymd_and_hms(2024, 4, 14, 22, 30, 0).unwrap();
        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        let west = FixedOffset::west_opt(5 * 3600).unwrap();

        assert_eq!(month_day(&late_evening), "April 14");
        assert_eq!(month_day(&late_evening.with_timezone(&east)), "April 15");
        assert_eq!(
            month_day(&Utc.with_ymd_and_hms(2024, 4, 15, 3, 0, 0).unwrap().with_timezone(&west)),
            "April 14"
        );
    }

    #[test]
    fn test_local_month_day_uses_local_calendar() {
        let date = Utc.with_ymd_and_hms(2024, 4, 14, 22, 30, 0).unwrap();
        assert_eq!(local_month_day(date), month_day(&date.with_timezone(&Local)));
    }

    #[test]
    fn test_format_utc_rfc3339() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2024-01-15T10:30:00.000Z");
    }
}
