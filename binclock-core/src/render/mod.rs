//! Per-tick rendering
//!
//! [`RenderDriver`] owns all clock state and turns each tick into calls on
//! the drawing surface and backlight.

pub mod driver;
pub mod indicator;

pub use driver::{RenderDriver, TickReport};
pub use indicator::{draw_indicator, IndicatorStyle};
