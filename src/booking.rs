//! Booking creation with an atomic check-then-create guard.
//!
//! The slots the UI displays are advisory: by confirm time another mentee
//! may have taken the window. `confirm_booking` therefore re-runs the
//! conflict check under the mentor's write lock and only then appends the
//! booking, so two concurrent attempts for overlapping slots can never
//! both succeed. A conflict found inside the lock is the write race;
//! callers re-render the reschedule flow from the carried verdict.

use crate::conflict::check_slot_conflict;
use crate::error::ScheduleError;
use crate::store::BookingStore;
use crate::timezone::to_instant;
use crate::types::{Booking, DraftBooking, NewBooking};

/// Primitive-input request the UI shell assembles: a date string and
/// "HH:MM" times, typically from a slot the calculator returned.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub mentor_id: String,
    pub mentee_id: String,
    /// "YYYY-MM-DD".
    pub date: String,
    /// Local "HH:MM" in the mentor's timezone.
    pub slot_start: String,
    pub slot_end: String,
}

/// Re-check and persist a booking in one atomic section.
///
/// The mentor's timezone comes from their user record; a missing mentor or
/// a mentor without a timezone is an error, not an empty result, because
/// this is the write path.
pub fn confirm_booking(
    store: &BookingStore,
    request: &BookingRequest,
) -> Result<Booking, ScheduleError> {
    let mentor = store
        .user_by_id(&request.mentor_id)
        .ok_or_else(|| ScheduleError::UserNotFound(request.mentor_id.clone()))?;
    let timezone = mentor
        .timezone
        .ok_or_else(|| ScheduleError::MissingTimezone(request.mentor_id.clone()))?;

    let lock = store.mentor_lock(&request.mentor_id);
    let _guard = lock.lock();

    let conflict = check_slot_conflict(
        store,
        &request.mentor_id,
        &request.date,
        &request.slot_start,
        &request.slot_end,
        &timezone,
    )?;
    if conflict.has_conflict {
        log::warn!(
            "booking race lost for mentor {} on {} {}-{}",
            request.mentor_id,
            request.date,
            request.slot_start,
            request.slot_end
        );
        return Err(ScheduleError::SlotUnavailable { conflict });
    }

    let start = to_instant(&request.date, &request.slot_start, &timezone)?;
    let end = to_instant(&request.date, &request.slot_end, &timezone)?;

    store.update_draft_booking(DraftBooking {
        mentor_id: Some(request.mentor_id.clone()),
        mentee_id: Some(request.mentee_id.clone()),
        selected_date: Some(crate::timezone::parse_date(&request.date)?),
        slot_start: Some(request.slot_start.clone()),
        slot_end: Some(request.slot_end.clone()),
    });

    Ok(store.create_booking(NewBooking {
        mentor_id: request.mentor_id.clone(),
        mentee_id: request.mentee_id.clone(),
        start_datetime: start.to_rfc3339(),
        end_datetime: end.to_rfc3339(),
    }))
}
