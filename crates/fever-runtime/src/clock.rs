//! Wall clock capability
//!
//! Relative-date operators compare against "today". The clock is injected so
//! evaluation can be pinned to a known instant; calendar days are read in a
//! fixed offset chosen by the caller.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use std::fmt::Debug;

/// Source of the current instant
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Process wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Calendar date of `now` in `zone`, shifted by `offset_days`
pub fn shifted_today(now: DateTime<Utc>, zone: &FixedOffset, offset_days: i64) -> Option<NaiveDate> {
    let today = now.with_timezone(zone).date_naive();
    let days = Days::new(offset_days.unsigned_abs());
    if offset_days >= 0 {
        today.checked_add_days(days)
    } else {
        today.checked_sub_days(days)
    }
}

/// Parse `UTC`, `Z`, `+HH:MM`, `-HH:MM` or `+HHMM` into a fixed offset
pub fn parse_offset(s: &str) -> Option<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("utc") || s == "Z" {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => (rest.get(..2)?, rest.get(2..)?),
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Render an offset as `+HH:MM`
pub fn format_offset(zone: &FixedOffset) -> String {
    let secs = zone.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.abs();
    format!("{}{:02}:{:02}", sign, secs / 3600, (secs % 3600) / 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_shifted_today_crosses_midnight_by_zone() {
        // 2024-03-10 23:30 UTC is already 2024-03-11 in UTC+8
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 23, 30, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let shanghai = FixedOffset::east_opt(8 * 3600).unwrap();

        assert_eq!(
            shifted_today(now, &utc, 0),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
        assert_eq!(
            shifted_today(now, &shanghai, 0),
            NaiveDate::from_ymd_opt(2024, 3, 11)
        );
        assert_eq!(
            shifted_today(now, &shanghai, -1),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
        assert_eq!(
            shifted_today(now, &utc, 1),
            NaiveDate::from_ymd_opt(2024, 3, 11)
        );
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("UTC"), FixedOffset::east_opt(0));
        assert_eq!(parse_offset("+08:00"), FixedOffset::east_opt(8 * 3600));
        assert_eq!(parse_offset("-0530"), FixedOffset::west_opt(5 * 3600 + 30 * 60));
        assert_eq!(parse_offset("+9"), FixedOffset::east_opt(9 * 3600));
        assert_eq!(parse_offset("Asia/Shanghai"), None);
        assert_eq!(parse_offset("+25:00"), None);
    }

    #[test]
    fn test_parse_offset_rejects_non_ascii() {
        assert_eq!(parse_offset("+1é1"), None);
        assert_eq!(parse_offset("-é:00"), None);
        assert_eq!(parse_offset("+０８００"), None);
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(&FixedOffset::east_opt(0).unwrap()), "+00:00");
        assert_eq!(
            format_offset(&FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap()),
            "-05:30"
        );
    }

    #[test]
    fn test_fixed_clock() {
        let instant = Utc.with_ymd_and_hms(2017, 1, 1, 1, 1, 0).unwrap();
        assert_eq!(FixedClock(instant).now(), instant);
    }
}
