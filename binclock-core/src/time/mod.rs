//! Wall-clock time
//!
//! The clock face and the bin rota only ever look at local calendar fields,
//! so the core works on a validated local [`Instant`] rather than raw Unix
//! seconds. Conversion from network time happens in [`tz`] and [`clock`].

pub mod clock;
pub mod tz;

pub use clock::SyncedClock;
pub use tz::{Transition, TzRule};

use time::{Date, PrimitiveDateTime, Time};

pub use time::{Month, Weekday};

/// Seconds in one civil day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Errors produced while building or converting instants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeError {
    /// Year, month, or day does not name a real calendar date
    InvalidDate,
    /// Hour, minute, or second out of range
    InvalidTime,
    /// Timestamp outside the representable range
    OutOfRange,
    /// Timezone rule string could not be parsed
    InvalidTimezone,
}

/// Local wall-clock reading, taken once per tick
///
/// Always a valid calendar date and time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(PrimitiveDateTime);

impl Instant {
    /// Build an instant from calendar fields
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, TimeError> {
        let month = Month::try_from(month).map_err(|_| TimeError::InvalidDate)?;
        let date =
            Date::from_calendar_date(year, month, day).map_err(|_| TimeError::InvalidDate)?;
        let time = Time::from_hms(hour, minute, second).map_err(|_| TimeError::InvalidTime)?;
        Ok(Self(PrimitiveDateTime::new(date, time)))
    }

    /// Midnight of a date fixed at compile time
    ///
    /// Fails const evaluation if the date does not exist.
    pub const fn from_const_date(year: i32, month: Month, day: u8) -> Self {
        match Date::from_calendar_date(year, month, day) {
            Ok(date) => Self(PrimitiveDateTime::new(date, Time::MIDNIGHT)),
            Err(_) => panic!("invalid calendar date"),
        }
    }

    /// Build an instant at local midnight of the given date
    pub fn date(year: i32, month: u8, day: u8) -> Result<Self, TimeError> {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Interpret seconds since 1970-01-01 00:00:00 as a naive calendar reading
    ///
    /// No timezone is applied; callers shift by the local offset first.
    pub fn from_epoch_seconds(seconds: i64) -> Result<Self, TimeError> {
        let utc =
            time::OffsetDateTime::from_unix_timestamp(seconds).map_err(|_| TimeError::OutOfRange)?;
        Ok(Self(PrimitiveDateTime::new(utc.date(), utc.time())))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of year, 1-12
    pub fn month(&self) -> u8 {
        self.0.month() as u8
    }

    /// Day of month, 1-31
    pub fn day(&self) -> u8 {
        self.0.day()
    }

    pub fn hour(&self) -> u8 {
        self.0.hour()
    }

    pub fn minute(&self) -> u8 {
        self.0.minute()
    }

    pub fn second(&self) -> u8 {
        self.0.second()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// The same calendar day at 00:00:00
    pub fn midnight(&self) -> Self {
        Self(self.0.date().midnight())
    }

    /// Seconds since 1970-01-01 00:00:00, reading the fields as-is
    pub fn epoch_seconds(&self) -> i64 {
        self.0.assume_utc().unix_timestamp()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Instant {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{}-{}-{} {}:{}:{}",
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute(),
            self.second()
        );
    }
}

/// Whole days from `anchor` to `now`
///
/// Both instants are reduced to their calendar midnight before differencing,
/// so every instant within one calendar day yields the same count. The
/// division rounds to nearest to absorb any sub-day drift between the two
/// readings. Negative when `now` precedes `anchor`.
pub fn days_between(anchor: &Instant, now: &Instant) -> i32 {
    let delta = now.midnight().epoch_seconds() - anchor.midnight().epoch_seconds();
    let days = (delta + SECONDS_PER_DAY / 2).div_euclid(SECONDS_PER_DAY);
    days.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u8, d: u8, h: u8, mi: u8, s: u8) -> Instant {
        Instant::new(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_rejects_invalid_fields() {
        assert_eq!(Instant::new(2024, 2, 30, 0, 0, 0), Err(TimeError::InvalidDate));
        assert_eq!(Instant::new(2024, 13, 1, 0, 0, 0), Err(TimeError::InvalidDate));
        assert_eq!(Instant::new(2024, 1, 1, 24, 0, 0), Err(TimeError::InvalidTime));
        assert_eq!(Instant::new(2024, 1, 1, 0, 60, 0), Err(TimeError::InvalidTime));
        assert!(Instant::new(2024, 2, 29, 23, 59, 59).is_ok());
    }

    #[test]
    fn test_epoch_seconds() {
        assert_eq!(at(1970, 1, 1, 0, 0, 0).epoch_seconds(), 0);
        assert_eq!(at(2024, 1, 3, 0, 0, 0).epoch_seconds(), 1_704_240_000);

        let back = Instant::from_epoch_seconds(1_704_240_000 + 3661).unwrap();
        assert_eq!(back, at(2024, 1, 3, 1, 1, 1));
    }

    #[test]
    fn test_days_between_same_day_is_zero() {
        let anchor = Instant::date(2024, 1, 3).unwrap();
        assert_eq!(days_between(&anchor, &at(2024, 1, 3, 0, 0, 0)), 0);
        assert_eq!(days_between(&anchor, &at(2024, 1, 3, 11, 59, 59)), 0);
        assert_eq!(days_between(&anchor, &at(2024, 1, 3, 12, 0, 0)), 0);
        assert_eq!(days_between(&anchor, &at(2024, 1, 3, 23, 59, 59)), 0);
    }

    #[test]
    fn test_days_between_forward_and_backward() {
        let anchor = Instant::date(2024, 1, 3).unwrap();
        assert_eq!(days_between(&anchor, &at(2024, 1, 17, 8, 30, 0)), 14);
        // Leap day is counted
        assert_eq!(days_between(&anchor, &at(2024, 3, 1, 0, 0, 0)), 58);
        assert_eq!(days_between(&anchor, &at(2024, 1, 2, 23, 0, 0)), -1);
        // Unsynchronized clock reads the epoch
        assert_eq!(days_between(&anchor, &at(1970, 1, 1, 0, 0, 5)), -19_725);
    }

    #[test]
    fn test_anchor_time_of_day_is_ignored() {
        let anchor = at(2024, 1, 3, 18, 0, 0);
        assert_eq!(days_between(&anchor, &at(2024, 1, 4, 6, 0, 0)), 1);
    }

    #[test]
    fn test_weekday() {
        assert_eq!(at(2024, 1, 3, 0, 0, 0).weekday(), Weekday::Wednesday);
    }
}
