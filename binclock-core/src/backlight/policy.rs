//! Backlight policy
//!
//! Dims the display overnight. The policy itself is a pure hour-to-level
//! mapping; [`CachedBacklight`] makes applying it idempotent.

use crate::config::BacklightConfig;
use crate::traits::BacklightOutput;

/// Backlight duty on a 0-255 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Intensity(pub u8);

impl Intensity {
    /// Default overnight level
    pub const LOW: Self = Self(32);
    /// Default daytime level
    pub const HIGH: Self = Self(255);

    pub fn level(&self) -> u8 {
        self.0
    }

    /// Duty cycle scaled to a PWM `top` value
    pub fn duty(&self, top: u16) -> u16 {
        ((self.0 as u32 * top as u32) / 255) as u16
    }
}

/// Maps the hour of day to a backlight level
///
/// Hours in `[night_start, 24)` and `[0, night_end)` are night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BacklightPolicy {
    low: Intensity,
    high: Intensity,
    night_start: u8,
    night_end: u8,
}

impl Default for BacklightPolicy {
    fn default() -> Self {
        Self::new(&BacklightConfig::default())
    }
}

impl BacklightPolicy {
    pub fn new(config: &BacklightConfig) -> Self {
        Self {
            low: config.low,
            high: config.high,
            night_start: config.night_start,
            night_end: config.night_end,
        }
    }

    /// Is `hour` inside the night window
    pub fn is_night(&self, hour: u8) -> bool {
        if self.night_start <= self.night_end {
            // Window does not wrap midnight
            hour >= self.night_start && hour < self.night_end
        } else {
            hour >= self.night_start || hour < self.night_end
        }
    }

    /// Target level for the given hour
    pub fn target_for(&self, hour: u8) -> Intensity {
        if self.is_night(hour) {
            self.low
        } else {
            self.high
        }
    }
}

/// Backlight output that only writes when the level changes
pub struct CachedBacklight<B: BacklightOutput> {
    output: B,
    applied: Option<Intensity>,
}

impl<B: BacklightOutput> CachedBacklight<B> {
    pub fn new(output: B) -> Self {
        Self {
            output,
            applied: None,
        }
    }

    /// Set `level` unless it is already applied
    ///
    /// Returns true if the output was written.
    pub fn apply(&mut self, level: Intensity) -> bool {
        if self.applied == Some(level) {
            return false;
        }
        self.output.set_level(level);
        self.applied = Some(level);
        true
    }

    /// Last level written to the output
    pub fn applied(&self) -> Option<Intensity> {
        self.applied
    }

    pub fn output(&self) -> &B {
        &self.output
    }
}
