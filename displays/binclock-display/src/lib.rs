//! embedded-graphics drawing surface for the clock face
//!
//! This crate provides:
//! - [`GraphicsSurface`], an implementation of the core `DrawSurface`
//!   capability over any RGB565 `DrawTarget` (the ST7735 panel on the board,
//!   or a framebuffer in tests)
//! - Seven-segment numerals drawn from filled rectangles
//!
//! Text uses the 6x10 mono font; numerals are drawn segment by segment so
//! that an "88:88" under-paint shows through unlit segments as a ghost image.

#![cfg_attr(not(test), no_std)]

pub mod segments;
pub mod surface;

pub use segments::{
    SegmentGeometry, COLON_ADVANCE, DIGIT_ADVANCE, DIGIT_HEIGHT, DIGIT_WIDTH, SEGMENT_THICKNESS,
};
pub use surface::{DisplayError, GraphicsSurface, TEXT_ADVANCE};
