//! Shared domain types for the booking core.
//!
//! Storage-facing structs mirror the fixture format (`database.json`)
//! bit-exact: snake_case field names, uppercase English day names, "HH:MM"
//! 24-hour local times, and ISO-8601 timestamps with an explicit offset.
//! Computed results (`Slot`, `ConflictResult`, `AvailableDate`) serialize
//! camelCase for the UI shell.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Day-of-week as stored in `mentor_weekly_availability` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Day-of-week of a calendar date.
    ///
    /// Weekly availability rows are timezone-naive, so this is a property
    /// of the date itself; the date is never reinterpreted through a zone
    /// boundary.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// A user record from the fixture. Mentors carry an IANA timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// A recurring weekly open window in the mentor's own timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAvailabilitySlot {
    pub mentor_id: String,
    pub day_of_week: DayOfWeek,
    /// Local wall-clock "HH:MM", 24-hour.
    pub slot_start: String,
    pub slot_end: String,
}

/// An explicit block on a specific calendar date, overriding the weekly
/// pattern for that interval only. Overrides remove availability, never
/// add it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityOverride {
    pub mentor_id: String,
    pub date: NaiveDate,
    pub slot_start: String,
    pub slot_end: String,
    /// Human-readable note, e.g. "maintenance".
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Pending,
}

/// A persisted booking. Timestamps are ISO-8601 strings with an explicit
/// offset; they are parsed to instants at the point of comparison so a
/// malformed row surfaces as a parse error instead of silently vanishing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    pub mentor_id: String,
    pub mentee_id: String,
    pub start_datetime: String,
    pub end_datetime: String,
    pub status: BookingStatus,
}

/// Store-level insert record: instants already composed by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub mentor_id: String,
    pub mentee_id: String,
    pub start_datetime: String,
    pub end_datetime: String,
}

/// The in-progress booking the UI carries between screens. Updates are
/// partial; unset fields keep their previous value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftBooking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_end: Option<String>,
}

impl DraftBooking {
    /// Merge a partial update into this draft, field by field.
    pub fn merge(&mut self, patch: DraftBooking) {
        if patch.mentor_id.is_some() {
            self.mentor_id = patch.mentor_id;
        }
        if patch.mentee_id.is_some() {
            self.mentee_id = patch.mentee_id;
        }
        if patch.selected_date.is_some() {
            self.selected_date = patch.selected_date;
        }
        if patch.slot_start.is_some() {
            self.slot_start = patch.slot_start;
        }
        if patch.slot_end.is_some() {
            self.slot_end = patch.slot_end;
        }
    }
}

/// Root of the `database.json` fixture. Every collection defaults so a
/// partial fixture still loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub mentor_weekly_availability: Vec<WeeklyAvailabilitySlot>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub mentor_availability_overrides: Vec<AvailabilityOverride>,
    #[serde(default)]
    pub draft_booking: DraftBooking,
}

/// Booking query filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    pub mentor_id: Option<String>,
    pub mentee_id: Option<String>,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    /// The filter both the calculator and the checker use: CONFIRMED
    /// bookings for one mentor.
    pub fn confirmed_for_mentor(mentor_id: &str) -> Self {
        BookingFilter {
            mentor_id: Some(mentor_id.to_string()),
            status: Some(BookingStatus::Confirmed),
            ..Default::default()
        }
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(ref mentor_id) = self.mentor_id {
            if booking.mentor_id != *mentor_id {
                return false;
            }
        }
        if let Some(ref mentee_id) = self.mentee_id {
            if booking.mentee_id != *mentee_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if booking.status != status {
                return false;
            }
        }
        true
    }
}

/// A concrete bookable window. Ephemeral: rebuilt on every query, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Local "HH:MM" in the mentor's timezone, for display.
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictReason {
    OverlappingBooking,
    MentorUnavailable,
}

/// Conflict verdict for a candidate slot. Always a value, never an error;
/// callers branch on data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResult {
    pub has_conflict: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ConflictReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_booking: Option<Booking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_override: Option<AvailabilityOverride>,
}

impl ConflictResult {
    pub fn clear() -> Self {
        ConflictResult {
            has_conflict: false,
            reason: None,
            conflicting_booking: None,
            conflicting_override: None,
        }
    }

    pub fn overlapping_booking(booking: Booking) -> Self {
        ConflictResult {
            has_conflict: true,
            reason: Some(ConflictReason::OverlappingBooking),
            conflicting_booking: Some(booking),
            conflicting_override: None,
        }
    }

    pub fn mentor_unavailable(blocked: AvailabilityOverride) -> Self {
        ConflictResult {
            has_conflict: true,
            reason: Some(ConflictReason::MentorUnavailable),
            conflicting_booking: None,
            conflicting_override: Some(blocked),
        }
    }
}

/// A calendar date with at least one open slot, from the date-range scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDate {
    pub date: NaiveDate,
    pub slots_count: usize,
}
