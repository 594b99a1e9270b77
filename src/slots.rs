//! Slot availability computation.
//!
//! For a mentor and a calendar date: take the weekly recurring windows for
//! that weekday, convert them to instants in the mentor's timezone, drop
//! anything touching an override or a confirmed booking, dedupe, sort.
//! Overrides only remove availability; no slot exists outside the weekly
//! pattern's own windows.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::ScheduleError;
use crate::store::BookingStore;
use crate::timezone::{intervals_overlap, local_to_instant, parse_clock, parse_date, parse_instant, parse_zone};
use crate::types::{AvailableDate, BookingFilter, DayOfWeek, Slot};

/// Compute the open, bookable windows for `mentor_id` on `date_str`.
///
/// `date_str` is "YYYY-MM-DD"; `mentor_timezone` an IANA name. The result
/// is ordered by start instant. Identical local-time windows from
/// duplicate weekly rows collapse to one entry.
pub fn available_slots_for_date(
    store: &BookingStore,
    mentor_id: &str,
    date_str: &str,
    mentor_timezone: &str,
) -> Result<Vec<Slot>, ScheduleError> {
    let date = parse_date(date_str)?;
    let tz = parse_zone(mentor_timezone)?;
    available_slots_on(store, mentor_id, date, tz)
}

/// Same computation on already-parsed inputs. The date-range scan calls
/// this once per day.
pub fn available_slots_on(
    store: &BookingStore,
    mentor_id: &str,
    date: NaiveDate,
    tz: Tz,
) -> Result<Vec<Slot>, ScheduleError> {
    // Day-of-week is a property of the calendar date itself; weekly rows
    // are timezone-naive.
    let day = DayOfWeek::from_date(date);
    let weekly: Vec<_> = store
        .weekly_availability(mentor_id)
        .into_iter()
        .filter(|a| a.day_of_week == day)
        .collect();
    if weekly.is_empty() {
        return Ok(Vec::new());
    }

    // Confirmed bookings landing on this mentor-local calendar day. The
    // comparison is on instants rendered into the mentor's zone, not on
    // stored date strings.
    let mut day_bookings = Vec::new();
    for booking in store.bookings(&BookingFilter::confirmed_for_mentor(mentor_id)) {
        let start = parse_instant(&booking.start_datetime)?;
        let end = parse_instant(&booking.end_datetime)?;
        if start.with_timezone(&tz).date_naive() == date {
            day_bookings.push((start, end));
        }
    }

    let mut blocked = Vec::new();
    for blocked_window in store
        .overrides(mentor_id)
        .into_iter()
        .filter(|o| o.date == date)
    {
        let start = local_to_instant(date, parse_clock(&blocked_window.slot_start)?, tz)?;
        let end = local_to_instant(date, parse_clock(&blocked_window.slot_end)?, tz)?;
        blocked.push((start, end));
    }

    let mut slots = Vec::new();
    for weekly_slot in weekly {
        let start = local_to_instant(date, parse_clock(&weekly_slot.slot_start)?, tz)?;
        let end = local_to_instant(date, parse_clock(&weekly_slot.slot_end)?, tz)?;

        // An override blocks the whole slot, even on partial overlap;
        // there is no interval splitting. Overrides win over booking
        // state.
        if blocked
            .iter()
            .any(|(bs, be)| intervals_overlap(start, end, *bs, *be))
        {
            continue;
        }
        if day_bookings
            .iter()
            .any(|(bs, be)| intervals_overlap(start, end, *bs, *be))
        {
            continue;
        }

        slots.push(Slot {
            start,
            end,
            start_time: weekly_slot.slot_start,
            end_time: weekly_slot.slot_end,
        });
    }

    // Duplicate weekly rows collapse to a single slot.
    let mut seen = HashSet::new();
    slots.retain(|s| seen.insert((s.start_time.clone(), s.end_time.clone())));
    slots.sort_by_key(|s| s.start);

    Ok(slots)
}

/// Degrade-to-empty form: any failure is logged and rendered as "no slots
/// available" so a display query never crashes the interaction flow.
pub fn available_slots_or_empty(
    store: &BookingStore,
    mentor_id: &str,
    date_str: &str,
    mentor_timezone: &str,
) -> Vec<Slot> {
    match available_slots_for_date(store, mentor_id, date_str, mentor_timezone) {
        Ok(slots) => slots,
        Err(e) => {
            log::warn!("availability for {mentor_id} on {date_str} failed: {e}");
            Vec::new()
        }
    }
}

/// Scan `weeks_ahead * 7` consecutive days starting at `from` and report
/// the dates with at least one open slot.
pub fn available_dates_from(
    store: &BookingStore,
    mentor_id: &str,
    mentor_timezone: &str,
    from: NaiveDate,
    weeks_ahead: u32,
) -> Result<Vec<AvailableDate>, ScheduleError> {
    let tz = parse_zone(mentor_timezone)?;
    let mut dates = Vec::new();
    for offset in 0..i64::from(weeks_ahead) * 7 {
        let date = from + Duration::days(offset);
        let slots = available_slots_on(store, mentor_id, date, tz)?;
        if !slots.is_empty() {
            dates.push(AvailableDate {
                date,
                slots_count: slots.len(),
            });
        }
    }
    Ok(dates)
}

/// Convenience form of [`available_dates_from`] starting from today in the
/// mentor's timezone.
pub fn available_dates(
    store: &BookingStore,
    mentor_id: &str,
    mentor_timezone: &str,
    weeks_ahead: u32,
) -> Result<Vec<AvailableDate>, ScheduleError> {
    let tz = parse_zone(mentor_timezone)?;
    let today = Utc::now().with_timezone(&tz).date_naive();
    available_dates_from(store, mentor_id, mentor_timezone, today, weeks_ahead)
}
