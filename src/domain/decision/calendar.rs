//! Civil-day bucketing.
//!
//! A civil day runs from local midnight to the next local midnight in the
//! calendar the service is configured with. The calendar carries an explicit
//! UTC offset so that day boundaries never depend on the host's time zone
//! settings at the moment of a request.
//!
//! Fixed offsets do not follow daylight-saving transitions; every civil day is
//! exactly 24 hours long.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Maps instants onto civil days under a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilCalendar {
    offset: FixedOffset,
}

impl CivilCalendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Calendar whose days run midnight-to-midnight UTC.
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Calendar using the host's current UTC offset.
    ///
    /// Captured once; later changes to the host zone are not observed.
    pub fn host_local() -> Self {
        Self::new(*chrono::Local::now().offset())
    }

    /// Parses offsets written as `+08:00`, `-0530`, `+8` or `Z`.
    pub fn from_offset_str(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }

        let invalid = || ValidationError::invalid_format("utc_offset", format!("'{}'", raw));

        let (sign, rest) = match raw.chars().next() {
            Some('+') => (1, &raw[1..]),
            Some('-') => (-1, &raw[1..]),
            _ => return Err(invalid()),
        };

        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
            return Err(invalid());
        }

        let (hours, minutes) = match rest.split_once(':') {
            Some((h, m)) => (h, m),
            None if rest.len() == 4 => rest.split_at(2),
            None => (rest, "0"),
        };

        let hours: i32 = hours.parse().map_err(|_| invalid())?;
        let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
        if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
            return Err(invalid());
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Self::new)
            .ok_or_else(invalid)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The civil day an instant falls into.
    pub fn day_of(&self, ts: &Timestamp) -> NaiveDate {
        ts.as_datetime().with_timezone(&self.offset).date_naive()
    }
}

impl Default for CivilCalendar {
    fn default() -> Self {
        Self::utc()
    }
}
