//! Backlight actuation trait

use crate::backlight::Intensity;

/// Trait for display backlight drivers
///
/// Implementations drive the LED via PWM or a plain GPIO.
pub trait BacklightOutput {
    /// Set the backlight to the given intensity
    fn set_level(&mut self, level: Intensity);
}
