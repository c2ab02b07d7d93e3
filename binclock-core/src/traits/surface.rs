//! Drawing surface trait

use crate::config::Colour;

/// Font selection for text and glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// Small proportional text used for the date line
    Text,
    /// Large seven-segment numerals used for the time
    Numeral,
}

/// Trait for pixel-addressable displays
///
/// Coordinates are the top-left corner of the drawn item, except for
/// circles which take their centre. [`Font::Text`] is drawn on the
/// background colour so it overwrites what was there. [`Font::Numeral`]
/// only paints lit segments, leaving unlit ones as they were.
pub trait DrawSurface {
    /// Error returned by the underlying display
    type Error;

    /// Fill the whole screen with one colour
    fn fill_screen(&mut self, colour: Colour) -> Result<(), Self::Error>;

    /// Draw a string
    fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        font: Font,
        colour: Colour,
    ) -> Result<(), Self::Error>;

    /// Draw a single glyph, returning its advance width in pixels
    fn draw_glyph(
        &mut self,
        x: u16,
        y: u16,
        glyph: char,
        font: Font,
        colour: Colour,
    ) -> Result<u16, Self::Error>;

    /// Draw a decimal number, returning its width in pixels
    fn draw_number(
        &mut self,
        x: u16,
        y: u16,
        value: u32,
        font: Font,
        colour: Colour,
    ) -> Result<u16, Self::Error>;

    /// Draw a circle centred on (x, y), filled or as an outline
    fn draw_circle(
        &mut self,
        x: u16,
        y: u16,
        radius: u16,
        colour: Colour,
        filled: bool,
    ) -> Result<(), Self::Error>;
}
