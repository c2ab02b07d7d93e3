//! Text for the clock face

use core::fmt::Write;

use heapless::String;

use crate::time::{Instant, Weekday};

/// Longest date line: "Wed 31 Jan"
pub const DATE_LEN: usize = 10;

/// Placeholder that lights every segment of the time glyphs
pub const GHOST_TIME: &str = "88:88";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

/// Date line in `strftime("%a %e %b")` form, e.g. `"Wed  3 Jan"`
pub fn format_date(now: &Instant) -> String<DATE_LEN> {
    let mut line = String::new();
    let month = MONTHS
        .get(usize::from(now.month()).saturating_sub(1))
        .copied()
        .unwrap_or("???");
    // Cannot overflow: every part has a fixed width
    let _ = write!(
        line,
        "{} {:>2} {}",
        weekday_abbrev(now.weekday()),
        now.day(),
        month
    );
    line
}

/// Zero-padded `HHMM` digits, one glyph each
pub fn time_digits(now: &Instant) -> [char; 4] {
    let digit = |n: u8| char::from(b'0' + n % 10);
    [
        digit(now.hour() / 10),
        digit(now.hour()),
        digit(now.minute() / 10),
        digit(now.minute()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u8, d: u8, h: u8, mi: u8) -> Instant {
        Instant::new(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_date_pads_single_digit_day() {
        assert_eq!(format_date(&at(2024, 1, 3, 0, 0)).as_str(), "Wed  3 Jan");
    }

    #[test]
    fn test_date_two_digit_day() {
        assert_eq!(format_date(&at(2024, 12, 25, 0, 0)).as_str(), "Wed 25 Dec");
        assert_eq!(format_date(&at(2024, 3, 31, 0, 0)).as_str(), "Sun 31 Mar");
    }

    #[test]
    fn test_time_digits_zero_padded() {
        assert_eq!(time_digits(&at(2024, 1, 3, 7, 5)), ['0', '7', '0', '5']);
        assert_eq!(time_digits(&at(2024, 1, 3, 23, 59)), ['2', '3', '5', '9']);
        assert_eq!(time_digits(&at(2024, 1, 3, 0, 0)), ['0', '0', '0', '0']);
    }
}
