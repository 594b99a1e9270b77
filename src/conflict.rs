//! Conflict detection for candidate booking slots.
//!
//! The checker never trusts a previously computed slot. It re-validates
//! from the store, because time may have passed since the calculator ran.
//! Booking conflicts are checked before overrides; within a category the
//! first matching record wins.

use crate::error::ScheduleError;
use crate::store::BookingStore;
use crate::timezone::{intervals_overlap, local_to_instant, parse_clock, parse_date, parse_instant, parse_zone};
use crate::types::{BookingFilter, ConflictResult};

/// Decide whether booking `[slot_start, slot_end]` on `date_str` would
/// conflict with an existing confirmed booking or an override.
pub fn check_slot_conflict(
    store: &BookingStore,
    mentor_id: &str,
    date_str: &str,
    slot_start: &str,
    slot_end: &str,
    mentor_timezone: &str,
) -> Result<ConflictResult, ScheduleError> {
    let date = parse_date(date_str)?;
    let tz = parse_zone(mentor_timezone)?;
    let candidate_start = local_to_instant(date, parse_clock(slot_start)?, tz)?;
    let candidate_end = local_to_instant(date, parse_clock(slot_end)?, tz)?;

    // Every confirmed booking for the mentor is scanned, not just the
    // selected date's: a booking stored under another date string can
    // still overlap on the instant axis.
    for booking in store.bookings(&BookingFilter::confirmed_for_mentor(mentor_id)) {
        let start = parse_instant(&booking.start_datetime)?;
        let end = parse_instant(&booking.end_datetime)?;
        if intervals_overlap(candidate_start, candidate_end, start, end) {
            return Ok(ConflictResult::overlapping_booking(booking));
        }
    }

    for blocked in store
        .overrides(mentor_id)
        .into_iter()
        .filter(|o| o.date == date)
    {
        let start = local_to_instant(date, parse_clock(&blocked.slot_start)?, tz)?;
        let end = local_to_instant(date, parse_clock(&blocked.slot_end)?, tz)?;
        if intervals_overlap(candidate_start, candidate_end, start, end) {
            return Ok(ConflictResult::mentor_unavailable(blocked));
        }
    }

    Ok(ConflictResult::clear())
}
