//! Render driver
//!
//! Runs one tick of the clock: date, minute digits, colon and bin
//! indicators, evaluated in that order and each gated independently, so a
//! minute rollover and a day rollover seen on the same tick both land.

use crate::backlight::{BacklightPolicy, CachedBacklight, Intensity};
use crate::config::{ClockConfig, Colour, Layout, Palette};
use crate::face::{format_date, time_digits, ClockRenderState, ColonTone, GHOST_TIME};
use crate::schedule::{BinKind, ScheduleState};
use crate::time::Instant;
use crate::traits::{BacklightOutput, DrawSurface, Font};

use super::indicator::{draw_indicator, IndicatorStyle};

/// What a tick changed on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub date_redrawn: bool,
    pub time_redrawn: bool,
    pub colon: ColonTone,
    /// Bin indicators were redrawn for a new day
    pub day_changed: bool,
    /// Level written to the backlight, if it changed
    pub backlight: Option<Intensity>,
}

/// Owns the clock state and drives the display
pub struct RenderDriver<S: DrawSurface, B: BacklightOutput> {
    surface: S,
    backlight: CachedBacklight<B>,
    policy: BacklightPolicy,
    face: ClockRenderState,
    schedule: ScheduleState,
    palette: Palette,
    layout: Layout,
    /// Where the colon was last drawn
    colon_x: u16,
}

impl<S: DrawSurface, B: BacklightOutput> RenderDriver<S, B> {
    pub fn new(surface: S, backlight: B, config: &ClockConfig) -> Self {
        Self {
            surface,
            backlight: CachedBacklight::new(backlight),
            policy: BacklightPolicy::new(&config.backlight),
            face: ClockRenderState::new(),
            schedule: ScheduleState::new(&config.schedule),
            palette: config.palette,
            layout: config.layout,
            colon_x: config.layout.time_x,
        }
    }

    /// Clear the screen before the first tick
    pub fn clear(&mut self) -> Result<(), S::Error> {
        self.surface.fill_screen(self.palette.background)
    }

    /// Render one tick for the local time `now`
    pub fn tick(&mut self, now: &Instant) -> Result<TickReport, S::Error> {
        let plan = self.face.plan(now);
        let mut backlight = None;

        if plan.redraw_date {
            self.draw_date(now)?;
        }

        if plan.redraw_time {
            self.draw_time(now)?;
            let level = self.policy.target_for(now.hour());
            if self.backlight.apply(level) {
                backlight = Some(level);
            }
        }

        self.draw_colon(plan.colon)?;

        let day_changed = self.schedule.on_tick(now).is_changed();
        if day_changed {
            self.draw_indicators()?;
        }

        Ok(TickReport {
            date_redrawn: plan.redraw_date,
            time_redrawn: plan.redraw_time,
            colon: plan.colon,
            day_changed,
            backlight,
        })
    }

    pub fn schedule(&self) -> &ScheduleState {
        &self.schedule
    }

    pub fn face(&self) -> &ClockRenderState {
        &self.face
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn backlight(&self) -> &CachedBacklight<B> {
        &self.backlight
    }

    fn draw_date(&mut self, now: &Instant) -> Result<(), S::Error> {
        let line = format_date(now);
        self.surface.draw_text(
            self.layout.date_x,
            self.layout.date_y,
            &line,
            Font::Text,
            self.palette.date,
        )
    }

    fn draw_time(&mut self, now: &Instant) -> Result<(), S::Error> {
        let (x0, y) = (self.layout.time_x, self.layout.time_y);
        let colour = self.palette.digits;

        // Light every segment dimly, then the real digits on top
        self.surface
            .draw_text(x0, y, GHOST_TIME, Font::Numeral, self.palette.ghost)?;

        let [h1, h2, m1, m2] = time_digits(now);
        let mut x = x0;
        x += self.surface.draw_glyph(x, y, h1, Font::Numeral, colour)?;
        x += self.surface.draw_glyph(x, y, h2, Font::Numeral, colour)?;
        self.colon_x = x;
        x += self.surface.draw_glyph(x, y, ':', Font::Numeral, colour)?;
        x += self.surface.draw_glyph(x, y, m1, Font::Numeral, colour)?;
        self.surface.draw_glyph(x, y, m2, Font::Numeral, colour)?;
        Ok(())
    }

    fn draw_colon(&mut self, tone: ColonTone) -> Result<(), S::Error> {
        let colour = self.colon_colour(tone);
        self.surface
            .draw_glyph(self.colon_x, self.layout.time_y, ':', Font::Numeral, colour)?;
        Ok(())
    }

    fn colon_colour(&self, tone: ColonTone) -> Colour {
        match tone {
            ColonTone::Lit => self.palette.digits,
            ColonTone::Ghost => self.palette.ghost,
        }
    }

    fn draw_indicators(&mut self) -> Result<(), S::Error> {
        for kind in BinKind::ALL {
            let slot = self.layout.indicator(kind);
            let style = IndicatorStyle::for_phase(self.schedule.phase(kind), slot);
            draw_indicator(
                &mut self.surface,
                slot,
                self.layout.indicator_radius,
                style,
                self.palette.bin(kind),
                &self.palette,
            )?;
        }
        Ok(())
    }
}
