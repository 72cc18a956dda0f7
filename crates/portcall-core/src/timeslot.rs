//! Weekdays and time-slot labels -- parsing, ordering, formatting.
//!
//! Availability is sampled on a fixed 15-minute grid. Each sample is labeled
//! `"<Weekday> <H:MM:SS> <AM/PM>"` (e.g. `"Sunday 9:00:00 AM"`); that label is
//! the join key between tables, so parsing it is strict: anything that does
//! not match fails with [`PortcallError::MalformedTimeLabel`] rather than
//! silently miscomparing downstream.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{PortcallError, Result};

/// Fixed sampling cadence of the availability grid, in minutes.
pub const SLOT_MINUTES: i64 = 15;

/// Day of week, ordered Sunday-first to match report order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All weekdays in report order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Full English name, as it appears in slot labels.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = PortcallError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sunday" => Ok(Weekday::Sunday),
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            _ => Err(PortcallError::MalformedTimeLabel(s.to_string())),
        }
    }
}

/// One sampling point: a weekday plus a 12-hour wall-clock time.
///
/// Ordering is `(weekday, time)` with weekdays Sunday-first and times in
/// chronological order within the day. Ranges never span a weekday boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeSlot {
    pub weekday: Weekday,
    pub time: NaiveTime,
}

impl TimeSlot {
    /// Parse a `"<Weekday> <H:MM:SS> <AM/PM>"` label.
    ///
    /// Accepts both padded and unpadded hours (`"9:00:00 AM"`, `"09:00:00 AM"`).
    ///
    /// # Errors
    /// [`PortcallError::MalformedTimeLabel`] carrying the offending label.
    pub fn parse_label(label: &str) -> Result<Self> {
        let malformed = || PortcallError::MalformedTimeLabel(label.to_string());

        let mut parts = label.splitn(2, ' ');
        let (Some(day), Some(clock)) = (parts.next(), parts.next()) else {
            return Err(malformed());
        };
        let weekday = Weekday::from_str(day).map_err(|_| malformed())?;
        let time =
            NaiveTime::parse_from_str(clock.trim(), "%I:%M:%S %p").map_err(|_| malformed())?;
        Ok(TimeSlot { weekday, time })
    }

    /// Render the label in zero-padded form, e.g. `"Sunday 09:00:00 AM"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.weekday, self.clock_label())
    }

    /// The clock portion only, e.g. `"09:00:00 AM"`.
    pub fn clock_label(&self) -> String {
        self.time.format("%I:%M:%S %p").to_string()
    }

    /// Signed distance in minutes from `prev` to `self`, or `None` when the
    /// two slots fall on different weekdays.
    pub fn minutes_since(&self, prev: &TimeSlot) -> Option<i64> {
        (self.weekday == prev.weekday)
            .then(|| self.time.signed_duration_since(prev.time).num_minutes())
    }
}
