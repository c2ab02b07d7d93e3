//! Clock face redraw state machine
//!
//! Decides, once per tick, which parts of the face need repainting. Only
//! changed fields are redrawn to keep the TFT from flickering:
//!
//! - the date line at start-up and when a minute rolls over to second 0
//! - the hour and minute digits when the minute changes
//! - the colon on every tick, alternating tone with the second's parity

pub mod format;

pub use format::{format_date, time_digits, DATE_LEN, GHOST_TIME};

use crate::time::Instant;

/// Where the face is in its redraw cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceState {
    /// Nothing drawn yet
    Uninitialized,
    /// Date redrawn this tick, digits unchanged
    DateShown,
    /// Digits redrawn this tick
    MinuteChanged,
    /// Only the colon redrawn this tick
    MinuteStable,
}

/// Tone of the flashing colon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColonTone {
    /// Same colour as the digits (even seconds)
    Lit,
    /// Background ghost colour (odd seconds)
    Ghost,
}

impl ColonTone {
    pub fn for_second(second: u8) -> Self {
        if second % 2 == 1 {
            ColonTone::Ghost
        } else {
            ColonTone::Lit
        }
    }
}

/// What to repaint on this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FacePlan {
    pub redraw_date: bool,
    pub redraw_time: bool,
    /// The colon is always redrawn
    pub colon: ColonTone,
}

/// Last rendered state of the clock face
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockRenderState {
    state: FaceState,
    /// (hour, minute) currently shown by the digits
    time_shown: Option<(u8, u8)>,
    /// (hour, minute) during which the date was last drawn
    date_drawn_at: Option<(u8, u8)>,
    /// Colon tone drawn on the last tick
    last_colon: Option<ColonTone>,
}

impl Default for ClockRenderState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockRenderState {
    /// Create a state that forces a full redraw on the first tick
    pub const fn new() -> Self {
        Self {
            state: FaceState::Uninitialized,
            time_shown: None,
            date_drawn_at: None,
            last_colon: None,
        }
    }

    pub fn state(&self) -> FaceState {
        self.state
    }

    pub fn last_minute(&self) -> Option<u8> {
        self.time_shown.map(|(_, minute)| minute)
    }

    pub fn last_colon(&self) -> Option<ColonTone> {
        self.last_colon
    }

    /// Work out what `now` requires and record it as drawn
    ///
    /// Feeding the same instant twice only repeats the colon.
    pub fn plan(&mut self, now: &Instant) -> FacePlan {
        let stamp = (now.hour(), now.minute());

        let redraw_date = match self.date_drawn_at {
            None => true,
            Some(drawn) => now.second() == 0 && drawn != stamp,
        };
        if redraw_date {
            self.date_drawn_at = Some(stamp);
        }

        let redraw_time = self.time_shown != Some(stamp);
        if redraw_time {
            self.time_shown = Some(stamp);
        }

        let colon = ColonTone::for_second(now.second());
        self.last_colon = Some(colon);

        self.state = if redraw_time {
            FaceState::MinuteChanged
        } else if redraw_date {
            FaceState::DateShown
        } else {
            FaceState::MinuteStable
        };

        FacePlan {
            redraw_date,
            redraw_time,
            colon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u8, mi: u8, s: u8) -> Instant {
        Instant::new(2024, 1, 3, h, mi, s).unwrap()
    }

    #[test]
    fn test_first_tick_draws_everything() {
        let mut face = ClockRenderState::new();
        assert_eq!(face.state(), FaceState::Uninitialized);

        let plan = face.plan(&at(10, 11, 37));
        assert!(plan.redraw_date);
        assert!(plan.redraw_time);
        assert_eq!(plan.colon, ColonTone::Ghost);
        assert_eq!(face.state(), FaceState::MinuteChanged);
        assert_eq!(face.last_minute(), Some(11));
    }

    #[test]
    fn test_repeated_instant_only_flashes_colon() {
        let mut face = ClockRenderState::new();
        face.plan(&at(10, 12, 0));

        let again = face.plan(&at(10, 12, 0));
        assert!(!again.redraw_date);
        assert!(!again.redraw_time);
        assert_eq!(again.colon, ColonTone::Lit);
        assert_eq!(face.state(), FaceState::MinuteStable);
    }

    #[test]
    fn test_minute_redraw_once_per_minute() {
        let mut face = ClockRenderState::new();
        face.plan(&at(10, 11, 59));

        let mut time_redraws = 0;
        let mut date_redraws = 0;
        for second in 0..60 {
            let plan = face.plan(&at(10, 12, second));
            if plan.redraw_time {
                time_redraws += 1;
                assert_eq!(second, 0);
            }
            if plan.redraw_date {
                date_redraws += 1;
            }
        }
        assert_eq!(time_redraws, 1);
        assert_eq!(date_redraws, 1);
    }

    #[test]
    fn test_colon_alternates_every_second() {
        let mut face = ClockRenderState::new();
        let tones: [ColonTone; 4] = [20, 21, 22, 23].map(|s| face.plan(&at(8, 0, s)).colon);
        assert_eq!(
            tones,
            [ColonTone::Lit, ColonTone::Ghost, ColonTone::Lit, ColonTone::Ghost]
        );
        assert_eq!(face.last_colon(), Some(ColonTone::Ghost));
    }

    #[test]
    fn test_skipped_second_zero_still_redraws_digits() {
        let mut face = ClockRenderState::new();
        face.plan(&at(10, 11, 59));

        // Tick jitter can skip second 0 entirely
        let plan = face.plan(&at(10, 12, 1));
        assert!(plan.redraw_time);
        assert!(!plan.redraw_date);
    }

    #[test]
    fn test_clock_step_to_same_minute_redraws_hour() {
        let mut face = ClockRenderState::new();
        face.plan(&at(0, 0, 5));

        // First sync steps the clock by whole hours
        let plan = face.plan(&at(13, 0, 6));
        assert!(plan.redraw_time);
        assert_eq!(face.state(), FaceState::MinuteChanged);
        assert_eq!(face.last_minute(), Some(0));
    }

    #[test]
    fn test_date_redraw_without_minute_change() {
        let mut face = ClockRenderState::new();
        face.plan(&at(9, 59, 30));
        // Digits already showing 10:00 from an earlier pass
        face.time_shown = Some((10, 0));

        let plan = face.plan(&at(10, 0, 0));
        assert!(plan.redraw_date);
        assert!(!plan.redraw_time);
        assert_eq!(face.state(), FaceState::DateShown);
    }
}
