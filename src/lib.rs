//! Slot availability and conflict detection for a mentor/mentee booking
//! prototype.
//!
//! The UI shell is an external collaborator: it calls in with primitive
//! inputs (mentor id, "YYYY-MM-DD" date strings, "HH:MM" times) and gets
//! structured results back. The flow is: slot calculator to render
//! choices, conflict checker on confirm, booking orchestrator to write,
//! with the checker re-run under the mentor's write lock so two racing
//! confirms can never both land.
//!
//! All overlap comparisons happen on absolute instants; local time
//! strings are display/input forms bound to the mentor's IANA timezone.

pub mod booking;
pub mod config;
pub mod conflict;
pub mod error;
pub mod slots;
pub mod store;
pub mod timezone;
pub mod types;

pub use booking::{confirm_booking, BookingRequest};
pub use config::AppConfig;
pub use conflict::check_slot_conflict;
pub use error::ScheduleError;
pub use slots::{
    available_dates, available_dates_from, available_slots_for_date, available_slots_or_empty,
};
pub use store::BookingStore;
pub use types::{
    AvailabilityOverride, AvailableDate, Booking, BookingFilter, BookingStatus, ConflictReason,
    ConflictResult, Database, DayOfWeek, DraftBooking, NewBooking, Slot, User,
    WeeklyAvailabilitySlot,
};
