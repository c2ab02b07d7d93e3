//! Board-agnostic core logic for the bin-rota desk clock
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Calendar instants, timezone rules and the network-synced clock
//! - Bin collection cycles and the per-day schedule state
//! - Clock face redraw state machine
//! - Backlight policy
//! - Render driver tying the above to a drawing surface
//! - Capability traits (clock source, drawing surface, backlight, updates)
//! - Configuration types and the `clock.toml` parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backlight;
pub mod config;
pub mod face;
pub mod render;
pub mod schedule;
pub mod time;
pub mod traits;
