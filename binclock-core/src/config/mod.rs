//! Configuration
//!
//! Board-agnostic configuration structures. The firmware embeds a
//! `clock.toml` and parses it with [`parse_config`]; [`ClockConfig::default`]
//! reproduces the stock device.

pub mod layout;
pub mod palette;
pub mod toml;
pub mod types;

pub use layout::{IndicatorSlot, Layout};
pub use palette::{Colour, Palette};
pub use toml::{parse_config, ParseError};
pub use types::*;

/// Errors in configuration values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Cycle period is zero or its offset is not below the period
    InvalidCycle,
    /// Anchor is not a valid calendar date
    InvalidAnchor,
    /// Timezone rule could not be parsed
    InvalidTimezone,
    /// Night window hours out of range
    InvalidHour,
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// String longer than its fixed capacity
    ValueTooLong,
}
