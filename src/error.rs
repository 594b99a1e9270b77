//! Error types for the booking core.
//!
//! Parse failures surface as explicit results and are never recovered
//! silently. Conflicts are not errors: they travel as `ConflictResult`
//! values so callers branch on data, not on control flow. The one
//! write-side failure is `SlotUnavailable`, raised when the re-check
//! inside `booking::confirm_booking` finds the slot taken.

use thiserror::Error;

use crate::types::ConflictResult;

#[derive(Debug, Error)]
pub enum ScheduleError {
    // Malformed caller input
    #[error("Invalid calendar date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid wall-clock time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Unknown IANA timezone '{0}'")]
    UnknownTimezone(String),

    #[error("Local time {time} on {date} does not exist in {timezone}")]
    NonexistentLocalTime {
        date: String,
        time: String,
        timezone: String,
    },

    #[error("Invalid ISO-8601 timestamp '{0}'")]
    InvalidTimestamp(String),

    // Missing records
    #[error("No user with id '{0}'")]
    UserNotFound(String),

    #[error("User '{0}' has no timezone on record")]
    MissingTimezone(String),

    // Write race: the slot was taken between the advisory check and the
    // guarded one. Carries the fresh verdict for the reschedule flow.
    #[error("Slot is no longer available")]
    SlotUnavailable { conflict: ConflictResult },

    // Fixture loading
    #[error("Failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse fixture: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,
}

impl ScheduleError {
    /// Returns true for malformed date/time/timezone/timestamp input.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidDate(_)
                | ScheduleError::InvalidTime(_)
                | ScheduleError::UnknownTimezone(_)
                | ScheduleError::NonexistentLocalTime { .. }
                | ScheduleError::InvalidTimestamp(_)
        )
    }

    /// Returns true for lookups that hit no record. Read paths treat these
    /// as "no availability" rather than hard failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ScheduleError::UserNotFound(_) | ScheduleError::MissingTimezone(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(ScheduleError::InvalidDate("x".to_string()).is_parse());
        assert!(ScheduleError::InvalidTimestamp("x".to_string()).is_parse());
        assert!(!ScheduleError::UserNotFound("x".to_string()).is_parse());
        assert!(ScheduleError::UserNotFound("x".to_string()).is_not_found());
        assert!(!ScheduleError::SlotUnavailable {
            conflict: ConflictResult::clear()
        }
        .is_parse());
    }

    #[test]
    fn test_display_names_offending_input() {
        let err = ScheduleError::UnknownTimezone("Mars/Olympus".to_string());
        assert!(err.to_string().contains("Mars/Olympus"));
    }
}
