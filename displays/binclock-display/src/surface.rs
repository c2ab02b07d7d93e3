//! `DrawSurface` over an embedded-graphics draw target

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use binclock_core::config::Colour;
use binclock_core::traits::{DrawSurface, Font};

use crate::segments::{SegmentGeometry, COLON_ADVANCE, DIGIT_ADVANCE};

/// Horizontal advance of one character of [`Font::Text`]
pub const TEXT_ADVANCE: u16 = 6;

/// Drawing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// The draw target failed
    Draw(E),
    /// Character has no seven-segment glyph
    UnsupportedGlyph,
}

fn to_rgb(colour: Colour) -> Rgb565 {
    Rgb565::from(RawU16::new(colour.raw()))
}

fn point(x: u16, y: u16) -> Point {
    Point::new(x as i32, y as i32)
}

/// Clock face renderer for RGB565 panels
pub struct GraphicsSurface<D> {
    display: D,
    background: Rgb565,
    segments: SegmentGeometry,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap a display; `background` is painted behind [`Font::Text`]
    pub fn new(display: D, background: Colour) -> Self {
        Self {
            display,
            background: to_rgb(background),
            segments: SegmentGeometry::default(),
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_inner(self) -> D {
        self.display
    }

    fn numeral(
        &mut self,
        x: u16,
        y: u16,
        glyph: char,
        colour: Rgb565,
    ) -> Result<u16, DisplayError<D::Error>> {
        let origin = point(x, y);
        let style = PrimitiveStyle::with_fill(colour);

        match glyph {
            ':' => {
                for dot in self.segments.colon(origin) {
                    dot.into_styled(style)
                        .draw(&mut self.display)
                        .map_err(DisplayError::Draw)?;
                }
                Ok(COLON_ADVANCE)
            }
            ' ' => Ok(DIGIT_ADVANCE),
            _ => {
                let rects = self
                    .segments
                    .digit(origin, glyph)
                    .ok_or(DisplayError::UnsupportedGlyph)?;
                for rect in rects {
                    rect.into_styled(style)
                        .draw(&mut self.display)
                        .map_err(DisplayError::Draw)?;
                }
                Ok(DIGIT_ADVANCE)
            }
        }
    }

    fn text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        colour: Rgb565,
    ) -> Result<u16, DisplayError<D::Error>> {
        let style = MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(colour)
            .background_color(self.background)
            .build();
        Text::with_baseline(text, point(x, y), style, Baseline::Top)
            .draw(&mut self.display)
            .map_err(DisplayError::Draw)?;
        Ok(text.chars().count() as u16 * TEXT_ADVANCE)
    }
}

impl<D> DrawSurface for GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = DisplayError<D::Error>;

    fn fill_screen(&mut self, colour: Colour) -> Result<(), Self::Error> {
        self.display.clear(to_rgb(colour)).map_err(DisplayError::Draw)
    }

    fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        font: Font,
        colour: Colour,
    ) -> Result<(), Self::Error> {
        let colour = to_rgb(colour);
        match font {
            Font::Text => {
                self.text(x, y, text, colour)?;
            }
            Font::Numeral => {
                let mut cursor = x;
                for glyph in text.chars() {
                    cursor += self.numeral(cursor, y, glyph, colour)?;
                }
            }
        }
        Ok(())
    }

    fn draw_glyph(
        &mut self,
        x: u16,
        y: u16,
        glyph: char,
        font: Font,
        colour: Colour,
    ) -> Result<u16, Self::Error> {
        let colour = to_rgb(colour);
        match font {
            Font::Numeral => self.numeral(x, y, glyph, colour),
            Font::Text => {
                let mut buf = [0u8; 4];
                self.text(x, y, glyph.encode_utf8(&mut buf), colour)
            }
        }
    }

    fn draw_number(
        &mut self,
        x: u16,
        y: u16,
        value: u32,
        font: Font,
        colour: Colour,
    ) -> Result<u16, Self::Error> {
        let mut digits: String<10> = String::new();
        // u32::MAX has ten digits
        let _ = write!(digits, "{}", value);

        let colour = to_rgb(colour);
        match font {
            Font::Text => self.text(x, y, &digits, colour),
            Font::Numeral => {
                let mut cursor = x;
                for glyph in digits.chars() {
                    cursor += self.numeral(cursor, y, glyph, colour)?;
                }
                Ok(cursor - x)
            }
        }
    }

    fn draw_circle(
        &mut self,
        x: u16,
        y: u16,
        radius: u16,
        colour: Colour,
        filled: bool,
    ) -> Result<(), Self::Error> {
        let colour = to_rgb(colour);
        let style = if filled {
            PrimitiveStyle::with_fill(colour)
        } else {
            PrimitiveStyle::with_stroke(colour, 1)
        };
        Circle::with_center(point(x, y), 2 * radius as u32 + 1)
            .into_styled(style)
            .draw(&mut self.display)
            .map_err(DisplayError::Draw)
    }
}
