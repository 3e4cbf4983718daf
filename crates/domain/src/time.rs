//! Time and timestamp helpers.

use chrono::{DateTime, TimeDelta, Utc};

/// UTC timestamp used for `createdAt`, `updatedAt`, event times, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return `candidate` if it is strictly after `previous`, otherwise the
/// instant one microsecond after `previous`.
///
/// Used to keep event timestamps strictly increasing even when the clock
/// stalls or steps backwards.
#[must_use]
pub fn strictly_after(candidate: Timestamp, previous: Option<Timestamp>) -> Timestamp {
    match previous {
        Some(prev) if candidate <= prev => prev + TimeDelta::microseconds(1),
        _ => candidate,
    }
}
