//! Time-of-day backlight control

pub mod policy;

pub use policy::{BacklightPolicy, CachedBacklight, Intensity};
