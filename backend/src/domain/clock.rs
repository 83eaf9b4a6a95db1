//! Wall-clock access for the domain layer.
//!
//! Everything that needs "now" (time stamping, today's window, the header
//! clock) asks an injected [`Clock`] so tests can pin the time.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveTime, TimeZone, Utc};
use std::sync::Mutex;

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;

    /// Start of the current local day, as a UTC instant
    fn today_start(&self) -> DateTime<Utc> {
        start_of_day(&self.now())
    }
}

/// The machine's local clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }

    /// Resolved in the local zone so a DST change earlier today is accounted for
    fn today_start(&self) -> DateTime<Utc> {
        start_of_day(&Local::now())
    }
}

/// A clock that always returns the time it was last set to
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Parse an RFC 3339 timestamp such as `2026-10-19T14:05:00+05:30`
    pub fn at(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self::new(DateTime::parse_from_rfc3339(rfc3339)?))
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// First instant of `now`'s calendar date in `now`'s own time zone.
///
/// When a DST jump skips local midnight the day starts at the first local
/// time that exists, probed in 15 minute steps.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    let zone = now.timezone();
    (0..=12)
        .map(|quarter| midnight + Duration::minutes(15 * quarter))
        .find_map(|local| zone.from_local_datetime(&local).earliest())
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| now.with_timezone(&Utc))
}

/// Header date, e.g. `Oct 19, 2026`
pub fn format_header_date(now: &DateTime<FixedOffset>) -> String {
    now.format("%b %-d, %Y").to_string()
}

/// Header time in 12-hour form, e.g. `02:05 PM`
pub fn format_header_time(now: &DateTime<FixedOffset>) -> String {
    now.format("%I:%M %p").to_string()
}
