//! Timezone conversion and interval arithmetic.
//!
//! Every overlap comparison in the crate happens on absolute instants.
//! Local "HH:MM" strings are only a display/input form bound to the
//! mentor's IANA timezone; comparing them directly would break the moment
//! a weekly slot, an override, and a stored booking straddle a DST
//! boundary.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::ScheduleError;
use crate::types::DayOfWeek;

/// Parse a "YYYY-MM-DD" calendar date.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidDate(date_str.to_string()))
}

/// Parse a "HH:MM" 24-hour wall-clock time.
pub fn parse_clock(time_str: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(time_str, "%H:%M")
        .map_err(|_| ScheduleError::InvalidTime(time_str.to_string()))
}

/// Resolve an IANA timezone name.
pub fn parse_zone(timezone: &str) -> Result<Tz, ScheduleError> {
    timezone
        .parse::<Tz>()
        .map_err(|_| ScheduleError::UnknownTimezone(timezone.to_string()))
}

/// Compose a calendar date and a local wall-clock time in `tz` into an
/// absolute instant, applying that zone's offset (including DST) for that
/// specific date.
///
/// A local time repeated by the fall-back transition resolves to the
/// earlier offset. A local time skipped by the spring-forward gap does not
/// exist and is an error rather than an invented instant.
pub fn local_to_instant(
    date: NaiveDate,
    time: NaiveTime,
    tz: Tz,
) -> Result<DateTime<Utc>, ScheduleError> {
    match tz.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(ScheduleError::NonexistentLocalTime {
            date: date.to_string(),
            time: time.format("%H:%M").to_string(),
            timezone: tz.name().to_string(),
        }),
    }
}

/// String-contract form of [`local_to_instant`]: `date_str` is
/// "YYYY-MM-DD", `time_str` is "HH:MM", `timezone` an IANA name.
pub fn to_instant(
    date_str: &str,
    time_str: &str,
    timezone: &str,
) -> Result<DateTime<Utc>, ScheduleError> {
    let date = parse_date(date_str)?;
    let time = parse_clock(time_str)?;
    let tz = parse_zone(timezone)?;
    local_to_instant(date, time, tz)
}

/// Parse a stored ISO-8601 timestamp into an instant.
///
/// Stored timestamps carry an explicit offset or zone; an offset-less
/// datetime is malformed, not "probably UTC".
pub fn parse_instant(iso: &str) -> Result<DateTime<Utc>, ScheduleError> {
    DateTime::parse_from_rfc3339(iso)
        .or_else(|_| DateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%z"))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ScheduleError::InvalidTimestamp(iso.to_string()))
}

/// Two intervals overlap iff `start1 <= end2 && end1 >= start2`.
///
/// The boundary is inclusive: a slot ending exactly when another begins
/// counts as overlapping. Deliberate conservative policy, not a bug.
pub fn intervals_overlap(
    start1: DateTime<Utc>,
    end1: DateTime<Utc>,
    start2: DateTime<Utc>,
    end2: DateTime<Utc>,
) -> bool {
    start1 <= end2 && end1 >= start2
}

/// Day name of an instant's calendar day as observed in UTC.
///
/// Calculator code derives day-of-week from the calendar date instead
/// (`DayOfWeek::from_date`); this form exists for instant-keyed data.
pub fn day_of_week(instant: DateTime<Utc>) -> DayOfWeek {
    DayOfWeek::from_date(instant.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(iso: &str) -> DateTime<Utc> {
        iso.parse().unwrap()
    }

    #[test]
    fn test_to_instant_standard_time() {
        // New York is UTC-5 in January
        let instant = to_instant("2026-01-12", "09:00", "America/New_York").unwrap();
        assert_eq!(instant, utc("2026-01-12T14:00:00Z"));
    }

    #[test]
    fn test_to_instant_daylight_time() {
        // Same wall clock, July: UTC-4
        let instant = to_instant("2026-07-13", "09:00", "America/New_York").unwrap();
        assert_eq!(instant, utc("2026-07-13T13:00:00Z"));
    }

    #[test]
    fn test_to_instant_half_hour_offset() {
        let instant = to_instant("2026-01-12", "09:00", "Asia/Kolkata").unwrap();
        assert_eq!(instant, utc("2026-01-12T03:30:00Z"));
    }

    #[test]
    fn test_to_instant_rejects_malformed_input() {
        assert!(matches!(
            to_instant("12/01/2026", "09:00", "America/New_York"),
            Err(ScheduleError::InvalidDate(_))
        ));
        assert!(matches!(
            to_instant("2026-01-12", "9am", "America/New_York"),
            Err(ScheduleError::InvalidTime(_))
        ));
        assert!(matches!(
            to_instant("2026-01-12", "09:00", "Mars/Olympus"),
            Err(ScheduleError::UnknownTimezone(_))
        ));
    }

    #[test]
    fn test_to_instant_spring_forward_gap() {
        // 02:30 does not exist on 2026-03-08 in New York
        let result = to_instant("2026-03-08", "02:30", "America/New_York");
        assert!(matches!(
            result,
            Err(ScheduleError::NonexistentLocalTime { .. })
        ));
    }

    #[test]
    fn test_to_instant_fall_back_takes_earlier_offset() {
        // 01:30 happens twice on 2026-11-01 in New York; EDT (-4) wins
        let instant = to_instant("2026-11-01", "01:30", "America/New_York").unwrap();
        assert_eq!(instant, utc("2026-11-01T05:30:00Z"));
    }

    #[test]
    fn test_parse_instant_accepted_forms() {
        assert_eq!(
            parse_instant("2026-01-12T14:00:00Z").unwrap(),
            utc("2026-01-12T14:00:00Z")
        );
        assert_eq!(
            parse_instant("2026-01-12T09:00:00-05:00").unwrap(),
            utc("2026-01-12T14:00:00Z")
        );
        // No-colon offset variant
        assert_eq!(
            parse_instant("2026-01-12T14:30:00+0530").unwrap(),
            utc("2026-01-12T09:00:00Z")
        );
    }

    #[test]
    fn test_parse_instant_rejects_offsetless_timestamp() {
        assert!(matches!(
            parse_instant("2026-01-12T09:00:00"),
            Err(ScheduleError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            parse_instant("not a timestamp"),
            Err(ScheduleError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_intervals_overlap_inclusive_boundary() {
        let a1 = utc("2026-01-12T10:00:00Z");
        let a2 = utc("2026-01-12T11:00:00Z");
        let b1 = utc("2026-01-12T11:00:00Z");
        let b2 = utc("2026-01-12T12:00:00Z");

        // end1 == start2 counts as overlap, in both directions
        assert!(intervals_overlap(a1, a2, b1, b2));
        assert!(intervals_overlap(b1, b2, a1, a2));
    }

    #[test]
    fn test_intervals_overlap_disjoint_and_contained() {
        let nine = utc("2026-01-12T09:00:00Z");
        let ten = utc("2026-01-12T10:00:00Z");
        let noon = utc("2026-01-12T12:00:00Z");
        let one = utc("2026-01-12T13:00:00Z");

        assert!(!intervals_overlap(nine, ten, noon, one));
        // containment
        assert!(intervals_overlap(nine, one, ten, noon));
        // partial
        assert!(intervals_overlap(nine, noon, ten, one));
    }

    #[test]
    fn test_day_of_week_observed_in_utc() {
        // Monday 00:30 UTC is still Sunday in New York; the instant form
        // reads the UTC calendar day.
        let instant = utc("2026-01-12T00:30:00Z");
        assert_eq!(day_of_week(instant), DayOfWeek::Monday);
    }
}
