//! Capability traits
//!
//! These traits define the interface between the clock logic and the
//! platform: time source, drawing surface, backlight and firmware update.

pub mod backlight;
pub mod clock;
pub mod surface;
pub mod update;

pub use backlight::BacklightOutput;
pub use clock::ClockSource;
pub use surface::{DrawSurface, Font};
pub use update::{progress_percent, UpdateError, UpdateHooks, UpdateTarget};
