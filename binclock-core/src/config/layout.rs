//! Screen layout for a 160x128 landscape panel

use crate::schedule::{BinKind, BIN_COUNT};

/// Where one bin indicator sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorSlot {
    /// Centre of the circle
    pub x: u16,
    pub y: u16,
    /// Overlay the whole weeks remaining when not due this week
    pub show_weeks: bool,
    /// Fill the circle while fewer than this many days remain; 0 fills on
    /// collection day only
    pub due_within_days: u16,
}

/// Pixel positions of everything on the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    /// Top-left of the first time digit
    pub time_x: u16,
    pub time_y: u16,
    /// Top-left of the date line
    pub date_x: u16,
    pub date_y: u16,
    /// Indicator per bin, in [`BinKind::ALL`] order
    pub indicators: [IndicatorSlot; BIN_COUNT],
    pub indicator_radius: u16,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            time_x: 6,
            time_y: 30,
            date_x: 50,
            date_y: 90,
            indicators: [
                IndicatorSlot {
                    x: 40,
                    y: 114,
                    show_weeks: false,
                    due_within_days: 0,
                },
                IndicatorSlot {
                    x: 80,
                    y: 114,
                    show_weeks: false,
                    due_within_days: 0,
                },
                IndicatorSlot {
                    x: 120,
                    y: 114,
                    show_weeks: true,
                    due_within_days: 7,
                },
            ],
            indicator_radius: 9,
        }
    }
}

impl Layout {
    pub fn indicator(&self, kind: BinKind) -> &IndicatorSlot {
        &self.indicators[kind.index()]
    }
}
