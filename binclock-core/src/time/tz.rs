//! Fixed timezone rule
//!
//! Supports the POSIX `TZ` form used by most embedded SNTP clients, e.g.
//! `NZST-12NZDT,M9.5.0,M4.1.0/3`. Only the `Mm.w.d[/time]` transition form
//! is accepted; Julian-day transitions are rejected.

use time::{Date, Month};

use super::{Instant, TimeError};

/// Default transition time of day when a rule omits `/time` (02:00)
const DEFAULT_TRANSITION_SECONDS: i32 = 2 * 3600;

/// A daylight-saving transition: weekday `weekday` of week `week` in `month`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// Month of year, 1-12
    pub month: u8,
    /// Week of month, 1-5 where 5 means the last one
    pub week: u8,
    /// Day of week, 0 = Sunday
    pub weekday: u8,
    /// Local time of day the change happens, in seconds
    pub at_seconds: i32,
}

impl Transition {
    /// Calendar date of this transition in `year`
    pub fn date_in(&self, year: i32) -> Result<Date, TimeError> {
        let month = Month::try_from(self.month).map_err(|_| TimeError::InvalidTimezone)?;
        let first = Date::from_calendar_date(year, month, 1).map_err(|_| TimeError::OutOfRange)?;
        let first_weekday = first.weekday().number_days_from_sunday();

        let mut day = 1 + (7 + self.weekday - first_weekday) % 7 + 7 * self.week.saturating_sub(1);
        let month_len = month.length(year);
        while day > month_len {
            day -= 7;
        }

        Date::from_calendar_date(year, month, day).map_err(|_| TimeError::OutOfRange)
    }

    /// Local wall-clock moment of the transition, as naive epoch seconds
    fn local_epoch_seconds(&self, year: i32) -> Result<i64, TimeError> {
        let midnight = self.date_in(year)?.midnight().assume_utc().unix_timestamp();
        Ok(midnight + self.at_seconds as i64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct DaylightSaving {
    offset: i32,
    start: Transition,
    end: Transition,
}

/// A single fixed timezone rule
///
/// Offsets are stored in seconds east of UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TzRule {
    std_offset: i32,
    dst: Option<DaylightSaving>,
}

impl TzRule {
    /// Coordinated Universal Time, no daylight saving
    pub const UTC: Self = Self::fixed(0);

    /// `NZST-12NZDT,M9.5.0,M4.1.0/3`
    pub const NEW_ZEALAND: Self = Self {
        std_offset: 12 * 3600,
        dst: Some(DaylightSaving {
            offset: 13 * 3600,
            start: Transition {
                month: 9,
                week: 5,
                weekday: 0,
                at_seconds: 2 * 3600,
            },
            end: Transition {
                month: 4,
                week: 1,
                weekday: 0,
                at_seconds: 3 * 3600,
            },
        }),
    };

    /// A rule with a constant offset east of UTC
    pub const fn fixed(offset_seconds: i32) -> Self {
        Self {
            std_offset: offset_seconds,
            dst: None,
        }
    }

    /// Parse a POSIX `TZ` rule string
    pub fn parse(input: &str) -> Result<Self, TimeError> {
        let mut cursor = Cursor::new(input);

        cursor.name()?;
        // POSIX offsets count west of UTC
        let std_offset = -cursor.offset()?;
        if cursor.is_empty() {
            return Ok(Self::fixed(std_offset));
        }

        cursor.name()?;
        let dst_offset = if cursor.peek() == Some(b',') {
            std_offset + 3600
        } else {
            -cursor.offset()?
        };

        cursor.expect(b',')?;
        let start = cursor.transition()?;
        cursor.expect(b',')?;
        let end = cursor.transition()?;
        if !cursor.is_empty() {
            return Err(TimeError::InvalidTimezone);
        }

        Ok(Self {
            std_offset,
            dst: Some(DaylightSaving {
                offset: dst_offset,
                start,
                end,
            }),
        })
    }

    /// Standard-time offset in seconds east of UTC
    pub fn std_offset(&self) -> i32 {
        self.std_offset
    }

    /// Whether the rule has a daylight-saving period at all
    pub fn observes_dst(&self) -> bool {
        self.dst.is_some()
    }

    /// Offset from UTC in force at `unix_seconds`
    pub fn offset_at(&self, unix_seconds: i64) -> Result<i32, TimeError> {
        let Some(dst) = &self.dst else {
            return Ok(self.std_offset);
        };

        let year = Instant::from_epoch_seconds(unix_seconds + self.std_offset as i64)?.year();
        let start = dst.start.local_epoch_seconds(year)? - self.std_offset as i64;
        let end = dst.end.local_epoch_seconds(year)? - dst.offset as i64;

        let in_dst = if start < end {
            unix_seconds >= start && unix_seconds < end
        } else {
            // Southern hemisphere: the saving period wraps the new year
            unix_seconds >= start || unix_seconds < end
        };

        Ok(if in_dst { dst.offset } else { self.std_offset })
    }

    /// Local wall-clock reading for a Unix timestamp
    pub fn to_local(&self, unix_seconds: i64) -> Result<Instant, TimeError> {
        let offset = self.offset_at(unix_seconds)?;
        Instant::from_epoch_seconds(unix_seconds + offset as i64)
    }
}

impl Default for TzRule {
    fn default() -> Self {
        Self::NEW_ZEALAND
    }
}

/// Byte cursor over a rule string
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.trim().as_bytes(),
            pos: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn expect(&mut self, byte: u8) -> Result<(), TimeError> {
        match self.bump() {
            Some(b) if b == byte => Ok(()),
            _ => Err(TimeError::InvalidTimezone),
        }
    }

    /// Zone abbreviation, either alphabetic or `<...>` quoted
    fn name(&mut self) -> Result<(), TimeError> {
        let start = self.pos;
        if self.peek() == Some(b'<') {
            self.pos += 1;
            while let Some(b) = self.bump() {
                if b == b'>' {
                    return if self.pos - start > 2 {
                        Ok(())
                    } else {
                        Err(TimeError::InvalidTimezone)
                    };
                }
            }
            return Err(TimeError::InvalidTimezone);
        }

        while matches!(self.peek(), Some(b) if b.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        if self.pos - start < 3 {
            return Err(TimeError::InvalidTimezone);
        }
        Ok(())
    }

    fn number(&mut self) -> Result<i32, TimeError> {
        let start = self.pos;
        let mut value: i32 = 0;
        while let Some(b) = self.peek() {
            if !b.is_ascii_digit() || self.pos - start >= 3 {
                break;
            }
            value = value * 10 + (b - b'0') as i32;
            self.pos += 1;
        }
        if self.pos == start {
            return Err(TimeError::InvalidTimezone);
        }
        Ok(value)
    }

    /// `[+|-]hh[:mm[:ss]]` in seconds
    fn offset(&mut self) -> Result<i32, TimeError> {
        let sign = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                -1
            }
            Some(b'+') => {
                self.pos += 1;
                1
            }
            _ => 1,
        };

        let hours = self.number()?;
        let mut seconds = hours * 3600;
        if self.peek() == Some(b':') {
            self.pos += 1;
            let minutes = self.number()?;
            if minutes > 59 {
                return Err(TimeError::InvalidTimezone);
            }
            seconds += minutes * 60;
            if self.peek() == Some(b':') {
                self.pos += 1;
                let secs = self.number()?;
                if secs > 59 {
                    return Err(TimeError::InvalidTimezone);
                }
                seconds += secs;
            }
        }
        if hours > 167 {
            return Err(TimeError::InvalidTimezone);
        }
        Ok(sign * seconds)
    }

    /// `Mm.w.d[/time]`
    fn transition(&mut self) -> Result<Transition, TimeError> {
        self.expect(b'M')?;
        let month = self.number()?;
        self.expect(b'.')?;
        let week = self.number()?;
        self.expect(b'.')?;
        let weekday = self.number()?;

        if !(1..=12).contains(&month) || !(1..=5).contains(&week) || weekday > 6 {
            return Err(TimeError::InvalidTimezone);
        }

        let at_seconds = if self.peek() == Some(b'/') {
            self.pos += 1;
            self.offset()?
        } else {
            DEFAULT_TRANSITION_SECONDS
        };

        Ok(Transition {
            month: month as u8,
            week: week as u8,
            weekday: weekday as u8,
            at_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u8, d: u8, h: u8, mi: u8, s: u8) -> i64 {
        Instant::new(y, mo, d, h, mi, s).unwrap().epoch_seconds()
    }

    fn local(y: i32, mo: u8, d: u8, h: u8, mi: u8, s: u8) -> Instant {
        Instant::new(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_parse_new_zealand() {
        let rule = TzRule::parse("NZST-12NZDT,M9.5.0,M4.1.0/3").unwrap();
        assert_eq!(rule, TzRule::NEW_ZEALAND);
        assert_eq!(rule.std_offset(), 12 * 3600);
        assert!(rule.observes_dst());
    }

    #[test]
    fn test_parse_fixed_and_quoted() {
        assert_eq!(TzRule::parse("UTC0").unwrap(), TzRule::UTC);
        assert_eq!(
            TzRule::parse("<+1030>-10:30").unwrap(),
            TzRule::fixed(10 * 3600 + 30 * 60)
        );
        assert_eq!(TzRule::parse("EST5").unwrap(), TzRule::fixed(-5 * 3600));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(TzRule::parse(""), Err(TimeError::InvalidTimezone));
        assert_eq!(TzRule::parse("NZ-12"), Err(TimeError::InvalidTimezone));
        assert_eq!(TzRule::parse("NZST-12NZDT"), Err(TimeError::InvalidTimezone));
        assert_eq!(
            TzRule::parse("NZST-12NZDT,J60,M4.1.0"),
            Err(TimeError::InvalidTimezone)
        );
        assert_eq!(
            TzRule::parse("NZST-12NZDT,M13.1.0,M4.1.0"),
            Err(TimeError::InvalidTimezone)
        );
        assert_eq!(
            TzRule::parse("NZST-12NZDT,M9.5.0,M4.1.0/3x"),
            Err(TimeError::InvalidTimezone)
        );
    }

    #[test]
    fn test_transition_dates() {
        let rule = TzRule::NEW_ZEALAND;
        let dst = rule.dst.unwrap();
        assert_eq!(
            dst.start.date_in(2024).unwrap(),
            Date::from_calendar_date(2024, Month::September, 29).unwrap()
        );
        assert_eq!(
            dst.end.date_in(2024).unwrap(),
            Date::from_calendar_date(2024, Month::April, 7).unwrap()
        );
        assert_eq!(
            dst.start.date_in(2025).unwrap(),
            Date::from_calendar_date(2025, Month::September, 28).unwrap()
        );
    }

    #[test]
    fn test_last_week_follows_february_length() {
        // M2.5.4: last Thursday of February
        let last_thursday = Transition {
            month: 2,
            week: 5,
            weekday: 4,
            at_seconds: DEFAULT_TRANSITION_SECONDS,
        };
        assert_eq!(
            last_thursday.date_in(2024).unwrap(),
            Date::from_calendar_date(2024, Month::February, 29).unwrap()
        );
        assert_eq!(
            last_thursday.date_in(2023).unwrap(),
            Date::from_calendar_date(2023, Month::February, 23).unwrap()
        );
    }

    #[test]
    fn test_new_zealand_spring_forward() {
        let rule = TzRule::NEW_ZEALAND;
        // 02:00 NZST on 2024-09-29 is 14:00 UTC the day before
        let change = utc(2024, 9, 28, 14, 0, 0);
        assert_eq!(rule.to_local(change - 1).unwrap(), local(2024, 9, 29, 1, 59, 59));
        assert_eq!(rule.to_local(change).unwrap(), local(2024, 9, 29, 3, 0, 0));
    }

    #[test]
    fn test_new_zealand_fall_back() {
        let rule = TzRule::NEW_ZEALAND;
        // 03:00 NZDT on 2024-04-07 is 14:00 UTC the day before
        let change = utc(2024, 4, 6, 14, 0, 0);
        assert_eq!(rule.to_local(change - 1).unwrap(), local(2024, 4, 7, 2, 59, 59));
        assert_eq!(rule.to_local(change).unwrap(), local(2024, 4, 7, 2, 0, 0));
    }

    #[test]
    fn test_new_zealand_summer_and_winter() {
        let rule = TzRule::NEW_ZEALAND;
        assert_eq!(rule.offset_at(utc(2024, 1, 15, 0, 0, 0)).unwrap(), 13 * 3600);
        assert_eq!(rule.offset_at(utc(2024, 7, 15, 0, 0, 0)).unwrap(), 12 * 3600);
        assert_eq!(rule.offset_at(utc(2024, 12, 31, 12, 0, 0)).unwrap(), 13 * 3600);
    }

    #[test]
    fn test_northern_hemisphere_rule() {
        let rule = TzRule::parse("CET-1CEST,M3.5.0,M10.5.0/3").unwrap();
        // 02:00 CET on 2024-03-31 is 01:00 UTC
        let change = utc(2024, 3, 31, 1, 0, 0);
        assert_eq!(rule.to_local(change - 1).unwrap(), local(2024, 3, 31, 1, 59, 59));
        assert_eq!(rule.to_local(change).unwrap(), local(2024, 3, 31, 3, 0, 0));
        assert_eq!(rule.offset_at(utc(2024, 12, 1, 0, 0, 0)).unwrap(), 3600);
    }
}
