//! Bin indicators

use crate::config::{Colour, IndicatorSlot, Palette};
use crate::schedule::{CyclePhase, DAYS_PER_WEEK};
use crate::traits::{DrawSurface, Font};

/// How a bin indicator looks on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorStyle {
    /// Collection falls inside the slot's due window: filled circle
    Due,
    /// Outline circle, optionally with whole weeks remaining drawn inside
    Pending { weeks: Option<u16> },
}

impl IndicatorStyle {
    /// Style for `phase` in `slot`; weeks are shown only when at least one
    /// week remains
    pub fn for_phase(phase: CyclePhase, slot: &IndicatorSlot) -> Self {
        let days = phase.days_remaining();
        if phase.is_due() || days < slot.due_within_days {
            IndicatorStyle::Due
        } else if slot.show_weeks && days >= DAYS_PER_WEEK {
            IndicatorStyle::Pending {
                weeks: Some(phase.weeks_remaining()),
            }
        } else {
            IndicatorStyle::Pending { weeks: None }
        }
    }
}

/// Erase and redraw one bin indicator
pub fn draw_indicator<S: DrawSurface>(
    surface: &mut S,
    slot: &IndicatorSlot,
    radius: u16,
    style: IndicatorStyle,
    colour: Colour,
    palette: &Palette,
) -> Result<(), S::Error> {
    surface.draw_circle(slot.x, slot.y, radius, palette.background, true)?;

    match style {
        IndicatorStyle::Due => surface.draw_circle(slot.x, slot.y, radius, colour, true)?,
        IndicatorStyle::Pending { weeks } => {
            surface.draw_circle(slot.x, slot.y, radius, colour, false)?;
            if let Some(weeks) = weeks {
                let x = slot.x.saturating_sub(radius / 3);
                let y = slot.y.saturating_sub(radius / 2);
                surface.draw_number(x, y, weeks as u32, Font::Text, palette.overlay)?;
            }
        }
    }
    Ok(())
}
