//! In-memory, file-backed booking store.
//!
//! The data source is a JSON fixture (`database.json`) loaded once and
//! served from memory. The store is an explicit object the hosting
//! application constructs and passes by reference, never a hidden module
//! global. Reads go through a shared `RwLock`; writes that must stay
//! atomic with a conflict check additionally take the per-mentor lock
//! (see `booking::confirm_booking`). Durability is out of scope: nothing
//! is written back to disk.

use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::config;
use crate::error::ScheduleError;
use crate::types::{
    AvailabilityOverride, Booking, BookingFilter, BookingStatus, Database, DraftBooking,
    NewBooking, User, WeeklyAvailabilitySlot,
};

pub struct BookingStore {
    data: RwLock<Database>,
    mentor_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl BookingStore {
    pub fn new(database: Database) -> Self {
        BookingStore {
            data: RwLock::new(database),
            mentor_locks: DashMap::new(),
        }
    }

    /// Load the fixture at an explicit path.
    pub fn load(path: &Path) -> Result<Self, ScheduleError> {
        let content = std::fs::read_to_string(path)?;
        let database: Database = serde_json::from_str(&content)?;
        log::debug!(
            "loaded fixture from {}: {} users, {} bookings",
            path.display(),
            database.users.len(),
            database.bookings.len()
        );
        Ok(Self::new(database))
    }

    /// Load the fixture at the config-resolved path.
    pub fn open() -> Result<Self, ScheduleError> {
        let cfg = config::load_config()?;
        Self::load(Path::new(&cfg.database_path))
    }

    pub fn users(&self) -> Vec<User> {
        self.data.read().users.clone()
    }

    pub fn user_by_id(&self, user_id: &str) -> Option<User> {
        self.data
            .read()
            .users
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned()
    }

    /// All recurring weekly rows for a mentor, every weekday.
    pub fn weekly_availability(&self, mentor_id: &str) -> Vec<WeeklyAvailabilitySlot> {
        self.data
            .read()
            .mentor_weekly_availability
            .iter()
            .filter(|a| a.mentor_id == mentor_id)
            .cloned()
            .collect()
    }

    pub fn bookings(&self, filter: &BookingFilter) -> Vec<Booking> {
        self.data
            .read()
            .bookings
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect()
    }

    /// All overrides for a mentor; callers narrow to a date.
    pub fn overrides(&self, mentor_id: &str) -> Vec<AvailabilityOverride> {
        self.data
            .read()
            .mentor_availability_overrides
            .iter()
            .filter(|o| o.mentor_id == mentor_id)
            .cloned()
            .collect()
    }

    pub fn draft_booking(&self) -> DraftBooking {
        self.data.read().draft_booking.clone()
    }

    /// Merge a partial update into the draft and return the merged record.
    pub fn update_draft_booking(&self, patch: DraftBooking) -> DraftBooking {
        let mut data = self.data.write();
        data.draft_booking.merge(patch);
        data.draft_booking.clone()
    }

    /// Append a CONFIRMED booking with a fresh id.
    ///
    /// No conflict check happens here; `booking::confirm_booking` is the
    /// guarded path and the only caller that should write during live
    /// operation.
    pub fn create_booking(&self, new_booking: NewBooking) -> Booking {
        let booking = Booking {
            booking_id: format!("booking_{}", Uuid::new_v4()),
            mentor_id: new_booking.mentor_id,
            mentee_id: new_booking.mentee_id,
            start_datetime: new_booking.start_datetime,
            end_datetime: new_booking.end_datetime,
            status: BookingStatus::Confirmed,
        };
        self.data.write().bookings.push(booking.clone());
        log::debug!(
            "created booking {} for mentor {}",
            booking.booking_id,
            booking.mentor_id
        );
        booking
    }

    /// One write lock per mentor. `confirm_booking` holds it across its
    /// conflict re-check and insert; plain reads never take it.
    pub(crate) fn mentor_lock(&self, mentor_id: &str) -> Arc<Mutex<()>> {
        self.mentor_locks
            .entry(mentor_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
